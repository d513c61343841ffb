//! Formatting helpers for display values.

use marquee_core::time::unix_now;
use marquee_core::watchlist::FALLBACK_POSTER;

/// Relative time for trending rows: "Just now", "5 mins ago", "2 days ago".
pub fn relative_time(timestamp: u64) -> String {
    if timestamp == 0 {
        return "Unknown".to_string();
    }
    let elapsed = unix_now().saturating_sub(timestamp);
    format_elapsed(elapsed)
}

fn format_elapsed(elapsed: u64) -> String {
    match elapsed {
        0..=59 => "Just now".to_string(),
        60..=3_599 => plural(elapsed / 60, "min"),
        3_600..=86_399 => plural(elapsed / 3_600, "hour"),
        _ => plural(elapsed / 86_400, "day"),
    }
}

fn plural(count: u64, unit: &str) -> String {
    if count == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", count, unit)
    }
}

/// Poster URL for an optional poster, substituting the bundled fallback.
pub fn poster_or_fallback(poster: Option<&str>) -> &str {
    poster.unwrap_or(FALLBACK_POSTER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_elapsed_buckets() {
        assert_eq!(format_elapsed(0), "Just now");
        assert_eq!(format_elapsed(59), "Just now");
        assert_eq!(format_elapsed(60), "1 min ago");
        assert_eq!(format_elapsed(150), "2 mins ago");
        assert_eq!(format_elapsed(3_600), "1 hour ago");
        assert_eq!(format_elapsed(7_300), "2 hours ago");
        assert_eq!(format_elapsed(90_000), "1 day ago");
        assert_eq!(format_elapsed(200_000), "2 days ago");
    }

    #[test]
    fn test_zero_timestamp_is_unknown() {
        assert_eq!(relative_time(0), "Unknown");
    }

    #[test]
    fn test_poster_fallback() {
        assert_eq!(poster_or_fallback(None), "/fallback.png");
        assert_eq!(
            poster_or_fallback(Some("https://img.example/p.jpg")),
            "https://img.example/p.jpg"
        );
    }
}
