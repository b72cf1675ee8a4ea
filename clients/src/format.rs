//! Display helpers for counts and video links

/// Humanize a count with K/M/B units and an optional suffix
///
/// ```
/// use video_researcher_clients::format::format_count;
///
/// assert_eq!(format_count(950, "views"), "950 views");
/// assert_eq!(format_count(1_500, "views"), "1.5K views");
/// assert_eq!(format_count(2_300_000, ""), "2.3M");
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_count(count: u64, suffix: &str) -> String {
    let formatted = if count >= 1_000_000_000 {
        format!("{:.1}B", count as f64 / 1_000_000_000.0)
    } else if count >= 1_000_000 {
        format!("{:.1}M", count as f64 / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{:.1}K", count as f64 / 1_000.0)
    } else {
        count.to_string()
    };

    if suffix.is_empty() {
        formatted
    } else {
        format!("{formatted} {suffix}")
    }
}

/// Build the canonical share URL for a video
#[must_use]
pub fn format_video_url(username: &str, video_id: &str) -> String {
    format!("https://www.tiktok.com/@{username}/video/{video_id}")
}
