//! TikTok hashtag research tools
//!
//! Two tools over the [`TikTokClient`]: `hashtag_info` resolves a hashtag
//! name into challenge metadata, `hashtag_posts` gathers videos from a
//! challenge with automatic pagination. Both read the API credential from
//! the environment per call and report a missing credential as a structured
//! failure without touching the network.

use serde_json::json;
use std::sync::Arc;
use video_researcher_clients::models::VideoInfo;
use video_researcher_clients::{TikTokClient, PER_CALL_MAX};
use video_researcher_core::agent::{Tool, ToolError, ToolExecutorFn, ToolResult};

/// Page budget ceiling for one `hashtag_posts` invocation
const MAX_PAGE_BUDGET: usize = 50;

/// Create the `hashtag_info` tool
///
/// Looks up metadata for one hashtag: user and view counts, challenge
/// characteristics and the challenge id needed by `hashtag_posts`.
///
/// Returns JSON:
/// ```json
/// {
///   "success": true,
///   "hashtag": "rustlang",
///   "challenge_id": "129384",
///   "stats": {"user_count": 15000, "formatted_user_count": "15.0K users"}
/// }
/// ```
#[must_use]
pub fn hashtag_info_tool() -> (Tool, ToolExecutorFn) {
    let tool = Tool {
        name: "hashtag_info".to_string(),
        description: "Get information about a TikTok hashtag: user count, view count, \
                      characteristics, and the challenge id used to fetch its posts"
            .to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "hashtag": {
                    "type": "string",
                    "description": "The hashtag name to look up (with or without #)"
                }
            },
            "required": ["hashtag"]
        }),
    };

    let executor = Arc::new(|input: String| {
        Box::pin(async move {
            let parsed: serde_json::Value = serde_json::from_str(&input).map_err(|e| {
                ToolError {
                    message: format!("Invalid input JSON: {e}"),
                }
            })?;

            let hashtag = parsed["hashtag"]
                .as_str()
                .ok_or_else(|| ToolError {
                    message: "Missing 'hashtag' field".to_string(),
                })?
                .to_string();

            let client = match TikTokClient::from_env() {
                Ok(client) => client,
                Err(e) => {
                    return Ok(json!({
                        "success": false,
                        "error": e.to_string(),
                        "hashtag": hashtag,
                    })
                    .to_string());
                }
            };

            let result = client.get_hashtag_info(&hashtag).await;
            client.close();

            let output = match result {
                Ok(Some(info)) => json!({
                    "success": true,
                    "hashtag": info.hashtag_name(),
                    "challenge_id": info.id,
                    "description": if info.desc.is_empty() {
                        "No description available"
                    } else {
                        info.desc.as_str()
                    },
                    "stats": {
                        "user_count": info.user_count,
                        "formatted_user_count": info.formatted_user_count(),
                        "view_count": info.view_count,
                        "formatted_view_count": info.formatted_view_count(),
                    },
                    "characteristics": {
                        "is_challenge": info.is_challenge,
                        "is_commerce": info.is_commerce,
                        "is_pgcshow": info.is_pgcshow,
                        "is_strong_music": info.is_strong_music,
                        "type": info.kind,
                    },
                    "cover": info.cover,
                }),
                Ok(None) => json!({
                    "success": false,
                    "error": format!("Hashtag '{hashtag}' not found or API request failed"),
                    "hashtag": hashtag,
                }),
                Err(e) => json!({
                    "success": false,
                    "error": format!("Failed to search TikTok hashtag: {e}"),
                    "hashtag": hashtag,
                }),
            };

            Ok(output.to_string())
        }) as std::pin::Pin<
            Box<dyn std::future::Future<Output = ToolResult> + Send>,
        >
    }) as ToolExecutorFn;

    (tool, executor)
}

/// Create the `hashtag_posts` tool
///
/// Gathers videos from a hashtag challenge with automatic pagination: each
/// upstream call returns at most 20 videos, so the tool keeps calling with
/// the returned cursor until the requested count is reached or the data
/// runs out.
///
/// Returns JSON:
/// ```json
/// {
///   "success": true,
///   "challenge_id": "129384",
///   "total_fetched": 50,
///   "has_more": true,
///   "next_cursor": 60,
///   "videos": [{"video_id": "…", "title": "…"}]
/// }
/// ```
#[must_use]
pub fn hashtag_posts_tool() -> (Tool, ToolExecutorFn) {
    let tool = Tool {
        name: "hashtag_posts".to_string(),
        description: "Get videos from a TikTok hashtag challenge with automatic pagination. \
                      Use hashtag_info first to resolve the challenge id."
            .to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "challenge_id": {
                    "type": "string",
                    "description": "The hashtag challenge id (from hashtag_info)"
                },
                "count": {
                    "type": "number",
                    "description": "Number of videos to fetch (default 50; fetched in pages of 20)"
                },
                "max_pages": {
                    "type": "number",
                    "description": "Optional page budget override (capped at 50 calls)"
                }
            },
            "required": ["challenge_id"]
        }),
    };

    let executor = Arc::new(|input: String| {
        Box::pin(async move {
            let parsed: serde_json::Value = serde_json::from_str(&input).map_err(|e| {
                ToolError {
                    message: format!("Invalid input JSON: {e}"),
                }
            })?;

            let challenge_id = parsed["challenge_id"]
                .as_str()
                .ok_or_else(|| ToolError {
                    message: "Missing 'challenge_id' field".to_string(),
                })?
                .to_string();

            #[allow(clippy::cast_possible_truncation)]
            let count = parsed["count"].as_u64().map_or(50, |c| c as usize).max(1);
            #[allow(clippy::cast_possible_truncation)]
            let max_pages = parsed["max_pages"]
                .as_u64()
                .map_or(count / PER_CALL_MAX + 1, |p| (p as usize).max(1))
                .min(MAX_PAGE_BUDGET);

            let client = match TikTokClient::from_env() {
                Ok(client) => client,
                Err(e) => {
                    return Ok(json!({
                        "success": false,
                        "error": e.to_string(),
                        "challenge_id": challenge_id,
                    })
                    .to_string());
                }
            };

            let result = client.get_hashtag_posts(&challenge_id, count, max_pages).await;
            client.close();

            let output = match result {
                Ok(Some(page)) => {
                    let videos: Vec<serde_json::Value> =
                        page.records.iter().map(format_video).collect();
                    json!({
                        "success": true,
                        "challenge_id": challenge_id,
                        "requested_count": count,
                        "video_count": videos.len(),
                        "total_fetched": page.count,
                        "has_more": page.has_more,
                        "next_cursor": page.cursor,
                        "videos": videos,
                        "message": format!(
                            "Successfully fetched {} videos from hashtag challenge (requested: {count})",
                            page.count
                        ),
                    })
                }
                Ok(None) => json!({
                    "success": false,
                    "error": format!(
                        "No videos found for challenge_id '{challenge_id}' or API request failed"
                    ),
                    "challenge_id": challenge_id,
                }),
                Err(e) => json!({
                    "success": false,
                    "error": format!("Failed to get hashtag posts: {e}"),
                    "challenge_id": challenge_id,
                }),
            };

            Ok(output.to_string())
        }) as std::pin::Pin<
            Box<dyn std::future::Future<Output = ToolResult> + Send>,
        >
    }) as ToolExecutorFn;

    (tool, executor)
}

/// Flatten one video record into the shape handed back to the agent
fn format_video(video: &VideoInfo) -> serde_json::Value {
    json!({
        "video_id": video.video_id,
        "title": video.title,
        "tiktok_url": video.share_url().unwrap_or_default(),
        "play_url": video.play,
        "cover_url": video.cover,
        "duration": video.duration,
        "author": {
            "username": video.author.as_ref().map_or("unknown", |a| a.unique_id.as_str()),
            "nickname": video.author.as_ref().map_or("unknown", |a| a.nickname.as_str()),
            "avatar": video.author.as_ref().map_or("", |a| a.avatar.as_str()),
        },
        "stats": {
            "play_count": video.play_count,
            "formatted_play_count": video.formatted_play_count(),
            "like_count": video.digg_count,
            "formatted_like_count": video.formatted_digg_count(),
            "comment_count": video.comment_count,
            "formatted_comment_count": video.formatted_comment_count(),
            "share_count": video.share_count,
            "formatted_share_count": video.formatted_share_count(),
            "collect_count": video.collect_count,
        },
        "music": {
            "title": video.music_info.as_ref().map_or("", |m| m.title.as_str()),
            "author": video.music_info.as_ref().map_or("", |m| m.author.as_str()),
            "duration": video.music_info.as_ref().map_or(0, |m| m.duration),
            "original": video.music_info.as_ref().is_some_and(|m| m.original),
        },
        "create_time": video.create_time,
        "is_top": video.is_top != 0,
    })
}
