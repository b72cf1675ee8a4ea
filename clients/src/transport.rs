//! Request transport and response envelope
//!
//! [`Transport`] owns one lazily-built `reqwest::Client` per gateway
//! instance, attaches a fixed header set computed at construction, and maps
//! every outcome of a single request into an [`ApiResponse`]. Nothing is
//! retried and nothing panics past this boundary.

use reqwest::header::HeaderMap;
use reqwest::{Client, Method};
use std::sync::Mutex;
use std::time::Duration;
use tracing::{debug, warn};

/// Default per-call timeout applied when a client does not override it
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Uniform envelope produced by every remote call
///
/// `success == true` implies `error` is `None`; `success == false` implies
/// `error` is `Some`. `data` may still be present on failure (the parsed
/// failure body, useful for diagnostics) but is not authoritative there.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse {
    /// Whether the upstream answered with a 2xx status
    pub success: bool,
    /// Parsed response body; empty JSON object when the body was empty
    pub data: Option<serde_json::Value>,
    /// Failure description when `success` is false
    pub error: Option<String>,
    /// Actual HTTP status, when a response was received at all
    pub status_code: Option<u16>,
}

impl ApiResponse {
    fn failure(error: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
            status_code: None,
        }
    }
}

/// HTTP gateway with a fixed base URL, header set and timeout
///
/// The underlying connection pool is allocated on first use and can be
/// released early with [`Transport::close`]; dropping the transport releases
/// it on every exit path regardless.
#[derive(Debug)]
pub struct Transport {
    base_url: String,
    headers: HeaderMap,
    timeout: Duration,
    http: Mutex<Option<Client>>,
}

impl Transport {
    /// Create a gateway for `base_url` with the given default headers
    #[must_use]
    pub fn new(base_url: impl Into<String>, headers: HeaderMap, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            headers,
            timeout,
            http: Mutex::new(None),
        }
    }

    /// Get or build the shared HTTP client
    #[allow(clippy::expect_used)]
    fn http_client(&self) -> Result<Client, reqwest::Error> {
        let mut slot = self
            .http
            .lock()
            .expect("Transport lock poisoned - indicates a panic in another thread");

        if let Some(client) = slot.as_ref() {
            return Ok(client.clone());
        }

        let client = Client::builder()
            .default_headers(self.headers.clone())
            .timeout(self.timeout)
            .build()?;
        *slot = Some(client.clone());
        Ok(client)
    }

    /// Release the underlying connection pool
    ///
    /// Safe to call any number of times; the next request rebuilds the
    /// client lazily.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned (indicates a panic in another thread)
    #[allow(clippy::expect_used)]
    pub fn close(&self) {
        let mut slot = self
            .http
            .lock()
            .expect("Transport lock poisoned - indicates a panic in another thread");
        *slot = None;
    }

    /// Issue one request and normalize its outcome
    ///
    /// The target URL is the base joined with `path`, with the base's
    /// trailing slash and the path's leading slash both trimmed so exactly
    /// one separator appears. Transport failures map to
    /// `"Request failed: …"`, unparseable non-empty bodies to
    /// `"Unexpected error: …"`; both leave `status_code` unset.
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&serde_json::Value>,
    ) -> ApiResponse {
        let client = match self.http_client() {
            Ok(client) => client,
            Err(e) => return ApiResponse::failure(format!("Unexpected error: {e}")),
        };

        let url = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        debug!(%method, %url, "issuing request");

        let mut request = client.request(method, &url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(%url, error = %e, "request failed before a response arrived");
                return ApiResponse::failure(format!("Request failed: {e}"));
            }
        };

        let status = response.status();
        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(%url, error = %e, "response body read failed");
                return ApiResponse::failure(format!("Request failed: {e}"));
            }
        };

        let data = if bytes.is_empty() {
            serde_json::Value::Object(serde_json::Map::new())
        } else {
            match serde_json::from_slice(&bytes) {
                Ok(value) => value,
                Err(e) => {
                    warn!(%url, status = status.as_u16(), error = %e, "response body is not JSON");
                    return ApiResponse::failure(format!("Unexpected error: {e}"));
                }
            }
        };

        let success = status.is_success();
        let error = if success {
            None
        } else {
            warn!(%url, status = status.as_u16(), "upstream rejected request");
            Some(
                data.get("message")
                    .and_then(serde_json::Value::as_str)
                    .map_or_else(|| "API request failed".to_string(), str::to_string),
            )
        };

        ApiResponse {
            success,
            data: Some(data),
            error,
            status_code: Some(status.as_u16()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_envelope_invariant() {
        let envelope = ApiResponse::failure("Request failed: connection refused".to_string());

        assert!(!envelope.success);
        assert!(envelope.error.is_some());
        assert!(envelope.data.is_none());
        assert_eq!(envelope.status_code, None);
    }

    #[test]
    fn test_close_is_idempotent_before_first_use() {
        let transport = Transport::new("http://localhost", HeaderMap::new(), DEFAULT_TIMEOUT);

        transport.close();
        transport.close();
    }
}
