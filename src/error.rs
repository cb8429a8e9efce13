//! Load failure causes
//!
//! Every way a shipment load can go wrong ends up as a [`LoadError`]. The
//! dashboard shows its message in the error view and offers a retry; nothing
//! else in the app can fail.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    /// The source answered with `null` or nothing at all.
    #[error("Invalid data format: no shipment data was returned")]
    Missing,

    /// The source answered with JSON that is not an array.
    #[error("Invalid data format: expected an array of shipments, found {found}")]
    NotAnArray { found: &'static str },

    /// One element of the array does not look like a shipment.
    #[error("Invalid shipment at position {index}: {source}")]
    InvalidRecord {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    /// Two shipments share an id.
    #[error("Duplicate shipment id {id}")]
    DuplicateId { id: String },

    #[error("Failed to reach shipment service: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Shipment data is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Raised by the mock failure source.
    #[error("{0}")]
    Injected(String),

    /// The load task stopped without reporting a result (panic or runtime shutdown).
    #[error("Shipment loader stopped before returning a result")]
    Interrupted,
}

impl LoadError {
    pub fn injected(message: impl Into<String>) -> Self {
        Self::Injected(message.into())
    }

    /// JSON type name used in [`LoadError::NotAnArray`] messages.
    pub fn json_kind(value: &serde_json::Value) -> &'static str {
        match value {
            serde_json::Value::Null => "null",
            serde_json::Value::Bool(_) => "a boolean",
            serde_json::Value::Number(_) => "a number",
            serde_json::Value::String(_) => "a string",
            serde_json::Value::Array(_) => "an array",
            serde_json::Value::Object(_) => "an object",
        }
    }
}
