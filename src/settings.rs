//! User settings read from settings.json in the app data directory
//!
//! The dashboard only reads this file. Nothing the user does in the window
//! is written back.

use crate::constants::{APP_NAME, DEFAULT_LATENCY_MS, DEFAULT_REQUEST_TIMEOUT_MS};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Initial window size
    pub window_w: Option<f32>,
    pub window_h: Option<f32>,

    /// HTTP endpoint returning the shipment array. Bundled data is used when unset.
    pub data_url: Option<String>,

    /// Delay injected before the bundled data is handed over
    pub simulated_latency_ms: u64,

    /// Give up on `data_url` after this long
    pub request_timeout_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_w: None,
            window_h: None,
            data_url: None,
            simulated_latency_ms: DEFAULT_LATENCY_MS,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
        }
    }
}

impl Settings {
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join("settings.json");
        match std::fs::read_to_string(&path) {
            Ok(s) => Self::parse(&s).unwrap_or_else(|e| {
                warn!(error = %e, path = %path.display(), "Failed to parse settings, using defaults");
                Self::default()
            }),
            Err(_) => {
                debug!("No settings file found, using defaults");
                Self::default()
            }
        }
    }

    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        let settings: Self = serde_json::from_str(json)?;
        debug!(?settings, "Settings loaded");
        Ok(settings)
    }

    /// Request timeout for the HTTP source. Zero falls back to the default.
    pub fn request_timeout(&self) -> Duration {
        match self.request_timeout_ms {
            0 => Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
            ms => Duration::from_millis(ms),
        }
    }

    /// Configured data URL, ignoring blank strings
    pub fn data_url(&self) -> Option<&str> {
        self.data_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

/// Get the app data directory path
pub fn get_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert!(settings.data_url.is_none());
        assert_eq!(settings.simulated_latency_ms, 800);
        assert!(settings.window_w.is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings = Settings::parse(r#"{ "window_w": 1200.0 }"#).unwrap();
        assert_eq!(settings.window_w, Some(1200.0));
        assert_eq!(settings.simulated_latency_ms, 800);
    }

    #[test]
    fn test_blank_data_url_is_ignored() {
        let settings = Settings::parse(r#"{ "data_url": "   " }"#).unwrap();
        assert_eq!(settings.data_url(), None);

        let settings =
            Settings::parse(r#"{ "data_url": "http://localhost:8080/api/shipments" }"#).unwrap();
        assert_eq!(settings.data_url(), Some("http://localhost:8080/api/shipments"));
    }

    #[test]
    fn test_request_timeout() {
        assert_eq!(Settings::default().request_timeout(), Duration::from_secs(10));

        let settings = Settings::parse(r#"{ "request_timeout_ms": 2500 }"#).unwrap();
        assert_eq!(settings.request_timeout(), Duration::from_millis(2500));

        let settings = Settings::parse(r#"{ "request_timeout_ms": 0 }"#).unwrap();
        assert_eq!(settings.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = std::env::temp_dir().join("shipment-dashboard-no-such-dir");
        assert_eq!(Settings::load(&dir), Settings::default());
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(Settings::parse("{ not json").is_err());
    }
}
