//! Common types and data structures

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Deserializer};
use std::fmt;

/// Shipment identifier - the data may use numbers or strings
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(untagged)]
pub enum ShipmentId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ShipmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShipmentId::Number(n) => write!(f, "{}", n),
            ShipmentId::Text(s) => f.write_str(s),
        }
    }
}

/// One tracked parcel as delivered by the shipment source
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shipment {
    pub id: ShipmentId,
    #[serde(default, deserialize_with = "blank_if_null")]
    pub tracking_number: String,
    #[serde(default, deserialize_with = "blank_if_null")]
    pub status: String,
    #[serde(default, deserialize_with = "blank_if_null")]
    pub last_location: String,
    #[serde(default, deserialize_with = "blank_if_null")]
    pub estimated_delivery: String,
    #[serde(default, deserialize_with = "blank_if_null")]
    pub sender: String,
    #[serde(default, deserialize_with = "blank_if_null")]
    pub receiver: String,
}

impl Shipment {
    /// Parsed estimated delivery, `None` if the timestamp is unreadable
    pub fn delivery_time(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.estimated_delivery)
    }
}

fn blank_if_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parse a delivery timestamp.
///
/// Accepts RFC 3339 and RFC 2822 (any offset, normalized to UTC),
/// offset-less date-times (taken as UTC) and bare dates (midnight UTC).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    const NAIVE_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
    ];
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
}

/// Sort order for the estimated delivery column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    None,
    Ascending,
    Descending,
}

impl SortOrder {
    pub const ALL: [SortOrder; 3] = [SortOrder::None, SortOrder::Ascending, SortOrder::Descending];

    pub fn label(self) -> &'static str {
        match self {
            SortOrder::None => "None",
            SortOrder::Ascending => "Earliest First",
            SortOrder::Descending => "Latest First",
        }
    }
}

/// Visual category for a status badge.
///
/// Only the five known statuses have their own treatment; any other value,
/// including blank or misspelled ones, is shown like `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTreatment {
    Delivered,
    InTransit,
    OutForDelivery,
    Pending,
    Cancelled,
}

impl StatusTreatment {
    pub fn for_status(status: &str) -> Self {
        match status {
            "Delivered" => StatusTreatment::Delivered,
            "In Transit" => StatusTreatment::InTransit,
            "Out for Delivery" => StatusTreatment::OutForDelivery,
            "Pending" => StatusTreatment::Pending,
            "Cancelled" => StatusTreatment::Cancelled,
            _ => StatusTreatment::Pending,
        }
    }
}

/// Where the shipment load currently stands. Exactly one of these holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Failed(String),
    Ready,
}
