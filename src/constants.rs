//! Application constants and configuration

pub const APP_NAME: &str = "Shipment Dashboard";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Sentinel filter value that keeps every shipment
pub const STATUS_ALL: &str = "All";

/// Injected delay for the bundled dataset, standing in for a network round trip
pub const DEFAULT_LATENCY_MS: u64 = 800;

/// Upper bound on one HTTP shipment request, connect through body
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

/// Bundled shipment fixture
pub const BUNDLED_SHIPMENTS: &str = include_str!("../data/shipments.json");

/// Set to make every load fail (exercises the error view and retry)
pub const MOCK_LOAD_FAILURE_ENV: &str = "MOCK_LOAD_FAILURE";
