//! Tavily web-search client
//!
//! Thin pass-through over the Tavily search API: one POST per query, typed
//! decode of the result list. Shares the [`Transport`] outcome policy with
//! the TikTok client.

use crate::error::ClientError;
use crate::transport::{Transport, DEFAULT_TIMEOUT};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use tracing::warn;

/// Production base URL of the Tavily API
pub const BASE_URL: &str = "https://api.tavily.com";

/// Environment variable holding the API credential
pub const API_KEY_VAR: &str = "TAVILY_API_KEY";

const SEARCH: &str = "/search";

/// One web search hit
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    /// Page title
    pub title: String,
    /// Page URL
    pub url: String,
    /// Extracted content snippet
    #[serde(default)]
    pub content: String,
    /// Relevance score
    #[serde(default)]
    pub score: f64,
}

/// Result set for one search query
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SearchResults {
    /// The query as the upstream echoed it
    #[serde(default)]
    pub query: String,
    /// Hits in relevance order
    #[serde(default)]
    pub results: Vec<SearchResult>,
    /// Upstream processing time in seconds
    #[serde(default)]
    pub response_time: f64,
}

/// Client for the Tavily search API
#[derive(Debug)]
pub struct TavilyClient {
    transport: Transport,
}

impl TavilyClient {
    /// Create a client with the API key from the environment
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingApiKey`] if `TAVILY_API_KEY` is not set.
    pub fn from_env() -> Result<Self, ClientError> {
        let api_key =
            std::env::var(API_KEY_VAR).map_err(|_| ClientError::MissingApiKey(API_KEY_VAR))?;
        Ok(Self::new(&api_key))
    }

    /// Create a client with an explicit API key
    #[must_use]
    pub fn new(api_key: &str) -> Self {
        Self::with_base_url(api_key, BASE_URL)
    }

    /// Create a client against a non-default base URL
    #[must_use]
    pub fn with_base_url(api_key: &str, base_url: impl Into<String>) -> Self {
        Self::with_timeout(api_key, base_url, DEFAULT_TIMEOUT)
    }

    /// Create a client with an explicit per-call timeout
    #[must_use]
    pub fn with_timeout(api_key: &str, base_url: impl Into<String>, timeout: Duration) -> Self {
        let mut headers = HeaderMap::new();
        match HeaderValue::from_str(&format!("Bearer {api_key}")) {
            Ok(mut value) => {
                value.set_sensitive(true);
                headers.insert("Authorization", value);
            }
            Err(_) => {
                warn!("API key is not a valid header value; requests will not authenticate");
            }
        }

        Self {
            transport: Transport::new(base_url, headers, timeout),
        }
    }

    /// Release the underlying connection pool early
    ///
    /// Dropping the client has the same effect; `close` is idempotent.
    pub fn close(&self) {
        self.transport.close();
    }

    /// Search the web for `query`, returning up to `max_results` hits
    ///
    /// Returns `Ok(None)` when the request failed in any ordinary way
    /// (network failure, rejected credential, non-2xx status).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Malformed`] when the upstream answered with a
    /// payload that does not match the expected schema.
    pub async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Option<SearchResults>, ClientError> {
        let body = json!({
            "query": query,
            "max_results": max_results,
        });

        let response = self
            .transport
            .execute(Method::POST, SEARCH, &[], Some(&body))
            .await;

        if !response.success {
            return Ok(None);
        }
        let Some(data) = response.data else {
            return Ok(None);
        };

        let results = serde_json::from_value(data)
            .map_err(|e| ClientError::Malformed(e.to_string()))?;
        Ok(Some(results))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_api_key_error_names_the_variable() {
        let error = ClientError::MissingApiKey(API_KEY_VAR);
        assert_eq!(
            error.to_string(),
            "Missing TAVILY_API_KEY environment variable"
        );
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_search_results_decode_with_defaults() {
        let results: SearchResults = serde_json::from_value(serde_json::json!({
            "results": [
                {"title": "Rust", "url": "https://rust-lang.org"}
            ]
        }))
        .unwrap();

        assert_eq!(results.results.len(), 1);
        assert_eq!(results.results[0].title, "Rust");
        assert_eq!(results.results[0].content, "");
        assert_eq!(results.query, "");
    }
}
