//! Error types for the researcher's HTTP clients

use thiserror::Error;

/// Errors surfaced by the TikTok and Tavily clients
///
/// Everything else an upstream can do wrong (network failure, non-2xx
/// status, non-zero provider code, missing payload) is reported as an
/// absent value, not an error.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Required credential environment variable is not set
    #[error("Missing {0} environment variable")]
    MissingApiKey(&'static str),

    /// Upstream sent a payload that does not match the expected schema
    #[error("Malformed response: {0}")]
    Malformed(String),
}
