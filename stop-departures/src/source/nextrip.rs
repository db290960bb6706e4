//! Metro Transit NexTrip HTTP client.

use std::time::Duration;

use tracing::{debug, warn};

use crate::domain::StopDeparture;
use crate::error::{StopError, Unavailable};

/// Default base URL for the NexTrip API.
const DEFAULT_BASE_URL: &str = "http://svc.metrotransit.org/NexTrip";

/// Default request timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// How much of an error or unparseable body to keep for diagnostics.
const BODY_EXCERPT_CHARS: usize = 500;

/// Configuration for the NexTrip client.
#[derive(Debug, Clone, PartialEq)]
pub struct NexTripConfig {
    /// Base URL; the stop ID is appended as a path segment.
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl NexTripConfig {
    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for NexTripConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// NexTrip departures client.
///
/// Makes exactly one request per call; no retries and no caching.
#[derive(Debug, Clone)]
pub struct NexTripClient {
    http: reqwest::Client,
    base_url: String,
}

impl NexTripClient {
    /// Create a new client with the given configuration.
    pub fn new(config: NexTripConfig) -> Result<Self, StopError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn departures_url(&self, stop_id: i64) -> String {
        format!("{}/{}", self.base_url, stop_id)
    }

    /// Get departures for a stop.
    ///
    /// A 4xx response is a [`StopError::BadRequest`]; a 5xx or a transport
    /// failure is [`StopError::SourceUnavailable`]. If any departure fails to
    /// decode the whole call fails with [`StopError::MalformedPayload`].
    #[tracing::instrument(skip(self))]
    pub async fn get_departures(&self, stop_id: i64) -> Result<Vec<StopDeparture>, StopError> {
        let response = self
            .http
            .get(self.departures_url(stop_id))
            .query(&[("format", "json")])
            .send()
            .await?;

        let status = response.status();

        if status.is_client_error() {
            return Err(StopError::BadRequest {
                status: status.as_u16(),
                message: error_body(response).await,
            });
        }

        if status.is_server_error() {
            return Err(Unavailable::Upstream {
                status: status.as_u16(),
                message: error_body(response).await,
            }
            .into());
        }

        let body = response.text().await?;

        let departures: Vec<StopDeparture> =
            serde_json::from_str(&body).map_err(|e| StopError::MalformedPayload {
                message: e.to_string(),
                body: Some(excerpt(&body)),
            })?;

        debug!(count = departures.len(), "fetched departures");
        Ok(departures)
    }
}

/// The leading part of `body` kept in errors.
fn excerpt(body: &str) -> String {
    body.chars().take(BODY_EXCERPT_CHARS).collect()
}

/// Excerpt of an error response body. The status already says what went
/// wrong, so a body that cannot be read is logged and left empty.
async fn error_body(response: reqwest::Response) -> String {
    match response.text().await {
        Ok(body) => excerpt(&body),
        Err(e) => {
            warn!(error = %e, "could not read error response body");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = NexTripConfig::default()
            .with_base_url("http://localhost:8080")
            .with_timeout(3);

        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 3);
    }

    #[test]
    fn config_defaults() {
        let config = NexTripConfig::default();

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn excerpt_keeps_leading_chars() {
        assert_eq!(excerpt("short"), "short");

        let long = "é".repeat(BODY_EXCERPT_CHARS + 10);
        assert_eq!(excerpt(&long).chars().count(), BODY_EXCERPT_CHARS);
    }

    #[test]
    fn url_is_base_plus_stop_id() {
        let config = NexTripConfig::default().with_base_url("http://localhost:8080/NexTrip/");
        let client = NexTripClient::new(config).unwrap();

        assert_eq!(
            client.departures_url(5611),
            "http://localhost:8080/NexTrip/5611"
        );
    }
}
