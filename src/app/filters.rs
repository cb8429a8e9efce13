//! Filtering and sorting logic

use super::App;
use crate::constants::STATUS_ALL;
use crate::types::*;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use tracing::debug;

/// Indices into `shipments` that survive `filter_status`, ordered by `sort_order`.
///
/// Filtering is an exact, case-sensitive status match ("All" keeps everything).
/// Sorting is stable. Shipments whose delivery time cannot be parsed always
/// go after the dated ones, whichever direction is chosen.
pub fn derive_visible(shipments: &[Shipment], filter_status: &str, sort_order: SortOrder) -> Vec<usize> {
    let filtered = shipments
        .iter()
        .enumerate()
        .filter(|(_, s)| filter_status == STATUS_ALL || s.status == filter_status);

    if sort_order == SortOrder::None {
        return filtered.map(|(i, _)| i).collect();
    }

    let mut keyed: Vec<(usize, Option<DateTime<Utc>>)> =
        filtered.map(|(i, s)| (i, s.delivery_time())).collect();
    keyed.sort_by(|(_, a), (_, b)| compare_delivery(*a, *b, sort_order));
    keyed.into_iter().map(|(i, _)| i).collect()
}

fn compare_delivery(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>, order: SortOrder) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => match order {
            SortOrder::Descending => b.cmp(&a),
            _ => a.cmp(&b),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// "All" followed by each distinct status in the order it first appears
pub fn status_options(shipments: &[Shipment]) -> Vec<String> {
    let mut options = vec![STATUS_ALL.to_string()];
    for shipment in shipments {
        if !options.iter().any(|o| *o == shipment.status) {
            options.push(shipment.status.clone());
        }
    }
    options
}

impl App {
    pub fn apply_filters(&mut self) {
        self.filtered_indices = derive_visible(&self.shipments, &self.filter_status, self.sort_order);
        debug!(
            filter = %self.filter_status,
            sort = ?self.sort_order,
            visible = self.filtered_indices.len(),
            total = self.shipments.len(),
            "Visible shipments derived"
        );
    }

    pub fn set_filter_status(&mut self, status: String) {
        if status != self.filter_status {
            self.filter_status = status;
            self.apply_filters();
        }
    }

    pub fn set_sort_order(&mut self, order: SortOrder) {
        if order != self.sort_order {
            self.sort_order = order;
            self.apply_filters();
        }
    }

    pub fn status_options(&self) -> Vec<String> {
        status_options(&self.shipments)
    }

    /// Shipments currently on screen, in display order
    pub fn visible_shipments(&self) -> impl Iterator<Item = &Shipment> + '_ {
        self.filtered_indices.iter().map(|&i| &self.shipments[i])
    }
}
