//! HTTP clients for the video researcher agent
//!
//! Two thin clients over one shared transport:
//!
//! - [`TikTokClient`]: hashtag (challenge) info and paged challenge posts
//!   from the TikTok scraper API
//! - [`TavilyClient`]: generic web search pass-through
//!
//! Every remote call is normalized into an [`ApiResponse`] envelope by the
//! [`Transport`] gateway, and paged endpoints are driven by the bounded
//! accumulation loop in [`paginate`].
//!
//! ## Error policy
//!
//! Ordinary upstream problems (network failures, non-2xx statuses, non-zero
//! provider result codes, missing payloads) are absorbed into `Ok(None)`.
//! Only two things surface as errors: a missing credential before any
//! network attempt ([`ClientError::MissingApiKey`]) and a payload that was
//! present but did not match the expected schema
//! ([`ClientError::Malformed`]).

pub mod error;
pub mod format;
pub mod models;
pub mod paginate;
pub mod tavily;
pub mod tiktok;
pub mod transport;

pub use error::ClientError;
pub use paginate::{fetch_at_least, Page, PER_CALL_MAX};
pub use tavily::TavilyClient;
pub use tiktok::TikTokClient;
pub use transport::{ApiResponse, Transport};
