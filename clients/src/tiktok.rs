//! TikTok scraper API client
//!
//! Covers the two challenge endpoints: hashtag info and paged challenge
//! posts. The client is stateless besides its [`Transport`] and safe to
//! reuse across many sequential calls.

use crate::error::ClientError;
use crate::models::{
    ChallengePostsResponse, ChallengeResponse, HashtagInfo, HashtagSearch, VideoInfo,
};
use crate::paginate::{fetch_at_least, Page, PER_CALL_MAX};
use crate::transport::{Transport, DEFAULT_TIMEOUT};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Method;
use std::time::Duration;
use tracing::warn;

/// Production base URL of the scraper API
pub const BASE_URL: &str = "https://tiktok-scraper7.p.rapidapi.com";

/// Host identification header value required by the API gateway
pub const RAPIDAPI_HOST: &str = "tiktok-scraper7.p.rapidapi.com";

/// Environment variable holding the API credential
pub const API_KEY_VAR: &str = "RAPIDAPI_KEY";

const CHALLENGE_INFO: &str = "/challenge/info";
const CHALLENGE_POSTS: &str = "/challenge/posts";

/// Client for TikTok hashtag and challenge-post data
#[derive(Debug)]
pub struct TikTokClient {
    transport: Transport,
}

impl TikTokClient {
    /// Create a client with the API key from the environment
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingApiKey`] if `RAPIDAPI_KEY` is not set.
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
    pub fn with_timeout(
        api_key: &str,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let mut headers = HeaderMap::new();
        match HeaderValue::from_str(api_key) {
            Ok(mut value) => {
                value.set_sensitive(true);
                headers.insert("X-RapidAPI-Key", value);
            }
            Err(_) => {
                warn!("API key is not a valid header value; requests will not authenticate");
            }
        }
        headers.insert("X-RapidAPI-Host", HeaderValue::from_static(RAPIDAPI_HOST));

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

    /// Look up a hashtag by name (a leading `#` is stripped)
    ///
    /// Returns `Ok(None)` when the upstream has no such hashtag or the
    /// request failed in any ordinary way.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Malformed`] when the upstream answered with a
    /// payload that does not match the expected schema.
    pub async fn get_hashtag_info(
        &self,
        hashtag_name: &str,
    ) -> Result<Option<HashtagInfo>, ClientError> {
        let clean_hashtag = hashtag_name.trim_start_matches('#');

        let response = self
            .transport
            .execute(
                Method::GET,
                CHALLENGE_INFO,
                &[("challenge_name", clean_hashtag.to_string())],
                None,
            )
            .await;

        if !response.success {
            return Ok(None);
        }
        let Some(data) = response.data else {
            return Ok(None);
        };

        let outer: ChallengeResponse =
            serde_json::from_value(data).map_err(|e| ClientError::Malformed(e.to_string()))?;
        if outer.code != 0 {
            return Ok(None);
        }
        let Some(payload) = outer.data else {
            return Ok(None);
        };

        let info = serde_json::from_value(payload)
            .map_err(|e| ClientError::Malformed(e.to_string()))?;
        Ok(Some(info))
    }

    /// Search hashtags related to a query
    ///
    /// The upstream offers no search endpoint, so this resolves the query
    /// as a single hashtag name and wraps the lookup as a result list.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Malformed`] when the lookup payload does not
    /// match the expected schema.
    pub async fn search_hashtags(&self, query: &str) -> Result<HashtagSearch, ClientError> {
        let results = match self.get_hashtag_info(query).await? {
            Some(info) => vec![info],
            None => Vec::new(),
        };
        let total_count = results.len();

        Ok(HashtagSearch {
            query: query.to_string(),
            results,
            total_count,
        })
    }

    /// Fetch a single page of videos from a hashtag challenge
    ///
    /// `count` is clamped to the API's per-call maximum of
    /// [`PER_CALL_MAX`] records; callers asking for more silently get the
    /// maximum.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Malformed`] when the upstream answered with a
    /// payload that does not match the expected schema.
    pub async fn get_hashtag_posts_page(
        &self,
        challenge_id: &str,
        count: usize,
        cursor: u64,
    ) -> Result<Option<Page<VideoInfo>>, ClientError> {
        let count = count.min(PER_CALL_MAX);

        let response = self
            .transport
            .execute(
                Method::GET,
                CHALLENGE_POSTS,
                &[
                    ("challenge_id", challenge_id.to_string()),
                    ("count", count.to_string()),
                    ("cursor", cursor.to_string()),
                ],
                None,
            )
            .await;

        if !response.success {
            return Ok(None);
        }
        let Some(data) = response.data else {
            return Ok(None);
        };

        let outer: ChallengePostsResponse =
            serde_json::from_value(data).map_err(|e| ClientError::Malformed(e.to_string()))?;
        if outer.code != 0 {
            return Ok(None);
        }
        let Some(payload) = outer.data else {
            return Ok(None);
        };

        Ok(Some(Page::new(
            payload.videos,
            payload.cursor,
            payload.has_more,
        )))
    }

    /// Fetch at least `target_count` videos from a hashtag challenge
    ///
    /// Drives [`fetch_at_least`] over [`Self::get_hashtag_posts_page`],
    /// issuing at most `max_pages` sequential calls.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Malformed`] when the first page's payload
    /// does not match the expected schema; after the first page a malformed
    /// payload ends the run and the partial result is returned.
    pub async fn get_hashtag_posts(
        &self,
        challenge_id: &str,
        target_count: usize,
        max_pages: usize,
    ) -> Result<Option<Page<VideoInfo>>, ClientError> {
        fetch_at_least(
            |cursor, page_size| self.get_hashtag_posts_page(challenge_id, page_size, cursor),
            target_count,
            max_pages,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_api_key_error_names_the_variable() {
        let error = ClientError::MissingApiKey(API_KEY_VAR);
        assert_eq!(error.to_string(), "Missing RAPIDAPI_KEY environment variable");
    }

    #[test]
    fn test_from_env_requires_credential() {
        // Only meaningful when the environment does not provide a key.
        if std::env::var(API_KEY_VAR).is_err() {
            assert!(matches!(
                TikTokClient::from_env(),
                Err(ClientError::MissingApiKey(API_KEY_VAR))
            ));
        }
    }
}
