//! Shipment data sources
//!
//! A source hands back raw JSON. Deciding whether that JSON is a usable
//! shipment list is the loader's job, so every source is held to the same
//! validation.

use crate::constants::{BUNDLED_SHIPMENTS, MOCK_LOAD_FAILURE_ENV};
use crate::error::LoadError;
use crate::settings::Settings;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

#[async_trait]
pub trait ShipmentSource: Send + Sync {
    /// Short description for logs
    fn describe(&self) -> String;

    async fn fetch(&self) -> Result<serde_json::Value, LoadError>;
}

/// Embedded JSON handed over after an artificial delay
pub struct BundledSource {
    json: String,
    latency: Duration,
}

impl BundledSource {
    pub fn new(json: impl Into<String>, latency: Duration) -> Self {
        Self {
            json: json.into(),
            latency,
        }
    }

    pub fn bundled(latency: Duration) -> Self {
        Self::new(BUNDLED_SHIPMENTS, latency)
    }
}

#[async_trait]
impl ShipmentSource for BundledSource {
    fn describe(&self) -> String {
        format!("bundled ({} ms latency)", self.latency.as_millis())
    }

    async fn fetch(&self) -> Result<serde_json::Value, LoadError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        Ok(serde_json::from_str(&self.json)?)
    }
}

/// Plain GET against a shipment endpoint
pub struct HttpSource {
    client: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self::with_client(reqwest::Client::new(), url, timeout)
    }

    pub fn with_client(client: reqwest::Client, url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client,
            url: url.into(),
            timeout,
        }
    }
}

#[async_trait]
impl ShipmentSource for HttpSource {
    fn describe(&self) -> String {
        format!("http {}", self.url)
    }

    async fn fetch(&self) -> Result<serde_json::Value, LoadError> {
        // Covers connect, headers and body, so a silent server still fails the load
        let response = self
            .client
            .get(&self.url)
            .timeout(self.timeout)
            .send()
            .await?;
        debug!(status = %response.status(), url = %self.url, "Shipment response received");
        let value = response.error_for_status()?.json().await?;
        Ok(value)
    }
}

/// Always fails. Selected by `MOCK_LOAD_FAILURE`.
pub struct FailingSource {
    message: String,
}

impl FailingSource {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl ShipmentSource for FailingSource {
    fn describe(&self) -> String {
        "mock failure".to_string()
    }

    async fn fetch(&self) -> Result<serde_json::Value, LoadError> {
        Err(LoadError::injected(self.message.clone()))
    }
}

/// Pick the source the settings and environment ask for
pub fn from_settings(settings: &Settings) -> Arc<dyn ShipmentSource> {
    if std::env::var(MOCK_LOAD_FAILURE_ENV).is_ok() {
        info!("Mock load failure enabled");
        return Arc::new(FailingSource::new("Simulated shipment service outage"));
    }
    match settings.data_url() {
        Some(url) => Arc::new(HttpSource::new(url, settings.request_timeout())),
        None => Arc::new(BundledSource::bundled(Duration::from_millis(
            settings.simulated_latency_ms,
        ))),
    }
}

/// Loopback HTTP endpoints that answer one request
#[cfg(test)]
pub(crate) mod test_server {
    use super::HttpSource;
    use std::io::{BufRead, BufReader, Write};
    use std::net::{TcpListener, TcpStream};
    use std::time::Duration;

    fn bind() -> (TcpListener, String) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/api/shipments", listener.local_addr().unwrap());
        (listener, url)
    }

    fn read_request(stream: &TcpStream) {
        let mut reader = BufReader::new(stream);
        let mut line = String::new();
        while reader.read_line(&mut line).map(|n| n > 0).unwrap_or(false) {
            if line == "\r\n" {
                break;
            }
            line.clear();
        }
    }

    /// Reply to the next request with `status` and `body`, then hang up.
    pub fn respond_once(status: &'static str, body: &'static str) -> String {
        let (listener, url) = bind();
        std::thread::spawn(move || {
            let Ok((mut stream, _)) = listener.accept() else {
                return;
            };
            read_request(&stream);
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(response.as_bytes());
        });
        url
    }

    /// Accept the next connection and say nothing for `hold`.
    pub fn silent(hold: Duration) -> String {
        let (listener, url) = bind();
        std::thread::spawn(move || {
            if let Ok((stream, _)) = listener.accept() {
                read_request(&stream);
                std::thread::sleep(hold);
                drop(stream);
            }
        });
        url
    }

    /// HTTP source that ignores proxy settings from the environment
    pub fn source(url: String, timeout: Duration) -> HttpSource {
        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        HttpSource::with_client(client, url, timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::loader::fetch_shipments;

    #[tokio::test]
    async fn test_bundled_fixture_is_a_json_array() {
        let source = BundledSource::bundled(Duration::ZERO);
        let value = source.fetch().await.unwrap();
        let records = value.as_array().unwrap();
        assert!(!records.is_empty());
        assert!(records.iter().all(|r| r.get("trackingNumber").is_some()));
    }

    #[tokio::test]
    async fn test_bundled_source_reports_bad_json() {
        let source = BundledSource::new("[{\"id\": 1,", Duration::ZERO);
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, LoadError::Json(_)));
    }

    #[tokio::test]
    async fn test_bundled_source_waits_for_latency() {
        let source = BundledSource::new("[]", Duration::from_millis(30));
        let started = std::time::Instant::now();
        source.fetch().await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(30));
    }

    #[tokio::test]
    async fn test_failing_source() {
        let source = FailingSource::new("down for maintenance");
        let err = source.fetch().await.unwrap_err();
        assert_eq!(err.to_string(), "down for maintenance");
    }

    #[tokio::test]
    async fn test_http_source_returns_json_array() {
        let url = test_server::respond_once(
            "200 OK",
            r#"[{"id": 1, "trackingNumber": "TRK-1", "status": "Pending"}]"#,
        );
        let source = test_server::source(url, Duration::from_secs(5));
        let value = source.fetch().await.unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(1));
        assert_eq!(value[0]["trackingNumber"], "TRK-1");
    }

    #[tokio::test]
    async fn test_http_source_server_error() {
        let url = test_server::respond_once("500 Internal Server Error", r#"{"error": "boom"}"#);
        let source = test_server::source(url, Duration::from_secs(5));
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(
            err,
            LoadError::Http(ref e) if e.status() == Some(reqwest::StatusCode::INTERNAL_SERVER_ERROR)
        ));
        assert!(err.to_string().starts_with("Failed to reach shipment service"));
    }

    #[tokio::test]
    async fn test_http_source_body_not_json() {
        let url = test_server::respond_once("200 OK", "<html>maintenance</html>");
        let source = test_server::source(url, Duration::from_secs(5));
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, LoadError::Http(ref e) if e.is_decode()));
    }

    #[tokio::test]
    async fn test_http_object_body_is_not_an_array() {
        let url = test_server::respond_once("200 OK", r#"{"shipments": []}"#);
        let source = test_server::source(url, Duration::from_secs(5));
        let err = fetch_shipments(&source).await.unwrap_err();
        assert!(matches!(err, LoadError::NotAnArray { found: "an object" }));
    }

    #[tokio::test]
    async fn test_http_source_times_out_on_silent_server() {
        let url = test_server::silent(Duration::from_secs(3));
        let source = test_server::source(url, Duration::from_millis(200));
        let started = std::time::Instant::now();
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, LoadError::Http(ref e) if e.is_timeout()));
        assert!(started.elapsed() < Duration::from_secs(3));
    }

    #[test]
    fn test_describe() {
        assert_eq!(
            BundledSource::bundled(Duration::from_millis(800)).describe(),
            "bundled (800 ms latency)"
        );
        assert_eq!(
            HttpSource::new("http://localhost/api/shipments", Duration::from_secs(1)).describe(),
            "http http://localhost/api/shipments"
        );
    }
}
