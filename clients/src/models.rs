//! Typed records decoded from TikTok scraper API payloads
//!
//! Decoding is schema-first: fields the upstream always sends are required,
//! everything it is known to omit carries `#[serde(default)]`. A payload
//! missing a required field fails to decode instead of producing a
//! partially-populated record.

use crate::format::{format_count, format_video_url};
use serde::{Deserialize, Serialize};

/// Outer provider shape for single-object endpoints
///
/// `code` is the provider's own result code; zero means success and `data`
/// carries the payload.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ChallengeResponse {
    /// Provider result code (0 on success)
    pub code: i64,
    /// Provider status message
    pub msg: String,
    /// Server-side processing time in seconds
    pub processed_time: f64,
    /// Payload, absent on provider-side failure
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

/// Hashtag (challenge) information
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct HashtagInfo {
    /// Challenge id, used as the key for the posts endpoint
    pub id: String,
    /// Hashtag name without the leading `#`
    pub cha_name: String,
    /// Description text
    #[serde(default)]
    pub desc: String,
    /// How many users posted with this hashtag
    #[serde(default)]
    pub user_count: u64,
    /// Total views across videos with this hashtag
    #[serde(default)]
    pub view_count: u64,
    /// Professionally-generated-content flag
    #[serde(default)]
    pub is_pgcshow: bool,
    /// Commerce flag
    #[serde(default)]
    pub is_commerce: bool,
    /// Challenge flag
    #[serde(default)]
    pub is_challenge: bool,
    /// Strong-music flag
    #[serde(default)]
    pub is_strong_music: bool,
    /// Provider hashtag type
    #[serde(default, rename = "type")]
    pub kind: i64,
    /// Cover image URL
    #[serde(default)]
    pub cover: String,
}

impl HashtagInfo {
    /// Clean hashtag name
    #[must_use]
    pub fn hashtag_name(&self) -> &str {
        &self.cha_name
    }

    /// User count humanized with units
    #[must_use]
    pub fn formatted_user_count(&self) -> String {
        format_count(self.user_count, "users")
    }

    /// View count humanized with units
    #[must_use]
    pub fn formatted_view_count(&self) -> String {
        format_count(self.view_count, "views")
    }
}

/// Degraded hashtag search: a single lookup wrapped as a result list
///
/// The upstream has no search endpoint yet, so a search resolves the query
/// as one hashtag name and reports zero or one results.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct HashtagSearch {
    /// The query as given
    pub query: String,
    /// Matching hashtags (at most one today)
    pub results: Vec<HashtagInfo>,
    /// Number of results
    pub total_count: usize,
}

/// Author of a video
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct VideoAuthor {
    /// Author user id
    pub id: String,
    /// Handle used in profile and video URLs
    pub unique_id: String,
    /// Display name
    pub nickname: String,
    /// Avatar URL
    #[serde(default)]
    pub avatar: String,
}

/// Music attached to a video
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MusicInfo {
    /// Music id
    pub id: String,
    /// Track title
    pub title: String,
    /// Play URL
    #[serde(default)]
    pub play: String,
    /// Cover image URL
    #[serde(default)]
    pub cover: String,
    /// Track author
    #[serde(default)]
    pub author: String,
    /// Whether this is an original sound
    #[serde(default)]
    pub original: bool,
    /// Duration in seconds
    #[serde(default)]
    pub duration: u64,
    /// Album name
    #[serde(default)]
    pub album: String,
}

/// One video record from a challenge posts page
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct VideoInfo {
    /// Provider-internal video id
    pub aweme_id: String,
    /// Public video id used in share URLs
    pub video_id: String,
    /// Region code
    #[serde(default)]
    pub region: String,
    /// Title / caption
    #[serde(default)]
    pub title: String,
    /// Cover image URL
    #[serde(default)]
    pub cover: String,
    /// Duration in seconds
    #[serde(default)]
    pub duration: u64,
    /// Play URL
    #[serde(default)]
    pub play: String,
    /// File size in bytes
    #[serde(default)]
    pub size: u64,
    /// Play count
    #[serde(default)]
    pub play_count: u64,
    /// Like count
    #[serde(default)]
    pub digg_count: u64,
    /// Comment count
    #[serde(default)]
    pub comment_count: u64,
    /// Share count
    #[serde(default)]
    pub share_count: u64,
    /// Download count
    #[serde(default)]
    pub download_count: u64,
    /// Collect (bookmark) count
    #[serde(default)]
    pub collect_count: u64,
    /// Creation time as a unix timestamp
    #[serde(default)]
    pub create_time: i64,
    /// Attached music, when reported
    #[serde(default)]
    pub music_info: Option<MusicInfo>,
    /// Author, when reported
    #[serde(default)]
    pub author: Option<VideoAuthor>,
    /// Pinned-post marker
    #[serde(default)]
    pub is_top: i64,
}

impl VideoInfo {
    /// Play count humanized with units
    #[must_use]
    pub fn formatted_play_count(&self) -> String {
        format_count(self.play_count, "plays")
    }

    /// Like count humanized with units
    #[must_use]
    pub fn formatted_digg_count(&self) -> String {
        format_count(self.digg_count, "likes")
    }

    /// Comment count humanized with units
    #[must_use]
    pub fn formatted_comment_count(&self) -> String {
        format_count(self.comment_count, "comments")
    }

    /// Share count humanized with units
    #[must_use]
    pub fn formatted_share_count(&self) -> String {
        format_count(self.share_count, "shares")
    }

    /// Canonical share URL, when the author handle is known
    #[must_use]
    pub fn share_url(&self) -> Option<String> {
        self.author
            .as_ref()
            .map(|author| format_video_url(&author.unique_id, &self.video_id))
    }
}

/// Inner payload of the challenge posts endpoint
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ChallengePostsData {
    /// Videos on this page
    #[serde(default)]
    pub videos: Vec<VideoInfo>,
    /// Continuation cursor for the next page
    #[serde(default)]
    pub cursor: u64,
    /// Whether the upstream reports further pages
    #[serde(default, rename = "hasMore")]
    pub has_more: bool,
}

/// Outer provider shape for the challenge posts endpoint
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ChallengePostsResponse {
    /// Provider result code (0 on success)
    pub code: i64,
    /// Provider status message
    pub msg: String,
    /// Server-side processing time in seconds
    pub processed_time: f64,
    /// Payload, absent on provider-side failure
    #[serde(default)]
    pub data: Option<ChallengePostsData>,
}
