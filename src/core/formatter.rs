//! Display formatting helpers for gotry.
//!
//! Relative ages for the entry list and width-aware padding/truncation so that the age
//! column lines up regardless of wide characters in directory names.

use std::time::{Duration, SystemTime};

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;
const WEEK: u64 = 7 * DAY;

/// Formats how long ago `modified` was, relative to `now`.
///
/// Buckets: under a minute is `now`, then whole minutes (`5m`), hours (`3h`),
/// days (`2d`) and finally weeks (`1w`). Timestamps in the future count as `now`.
pub fn format_age(modified: SystemTime, now: SystemTime) -> String {
    let elapsed = now.duration_since(modified).unwrap_or(Duration::ZERO);
    format_elapsed(elapsed)
}

/// Same buckets as [format_age] for an already computed duration.
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    match secs {
        s if s < MINUTE => "now".to_string(),
        s if s < HOUR => format!("{}m", s / MINUTE),
        s if s < DAY => format!("{}h", s / HOUR),
        s if s < WEEK => format!("{}d", s / DAY),
        s => format!("{}w", s / WEEK),
    }
}

/// Number of spaces to put between a name and its age so ages line up at `column`.
/// Never less than `min_gap`.
pub fn gap_to_column(text: &str, column: usize, min_gap: usize) -> usize {
    column.saturating_sub(text.width()).max(min_gap)
}

/// Truncates `text` to at most `max_width` terminal cells, ending with `…` when cut.
/// Control characters are dropped.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.chars().filter(|c| !c.is_control()).collect();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::with_capacity(max_width);
    let mut current_w = 0;
    for ch in text.chars() {
        if ch.is_control() {
            continue;
        }
        let w = ch.width().unwrap_or(0);
        // keep one cell for the ellipsis
        if current_w + w > max_width - 1 {
            break;
        }
        out.push(ch);
        current_w += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ago(secs: u64) -> String {
        let now = SystemTime::now();
        format_age(now - Duration::from_secs(secs), now)
    }

    #[test]
    fn age_buckets() {
        assert_eq!(ago(30), "now");
        assert_eq!(ago(5 * 60), "5m");
        assert_eq!(ago(3 * 3600), "3h");
        assert_eq!(ago(2 * 86400), "2d");
        assert_eq!(ago(10 * 86400), "1w");
    }

    #[test]
    fn age_bucket_edges() {
        assert_eq!(ago(59), "now");
        assert_eq!(ago(60), "1m");
        assert_eq!(ago(3599), "59m");
        assert_eq!(ago(3600), "1h");
        assert_eq!(ago(86399), "23h");
        assert_eq!(ago(86400), "1d");
        assert_eq!(ago(7 * 86400 - 1), "6d");
        assert_eq!(ago(7 * 86400), "1w");
        assert_eq!(ago(30 * 86400), "4w");
    }

    #[test]
    fn future_timestamps_are_now() {
        let now = SystemTime::now();
        assert_eq!(format_age(now + Duration::from_secs(600), now), "now");
    }

    #[test]
    fn gap_aligns_and_respects_minimum() {
        assert_eq!(gap_to_column("abc", 10, 2), 7);
        assert_eq!(gap_to_column("abcdefghij", 10, 2), 2);
        // a crab is two cells wide
        assert_eq!(gap_to_column("🦀", 10, 2), 8);
    }

    #[test]
    fn truncation_is_width_aware() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("abcdefghijkl", 6), "abcde…");
        let cut = truncate_to_width("🦀🦀🦀🦀", 5);
        assert_eq!(cut, "🦀🦀…");
        assert!(cut.width() <= 5);
        assert_eq!(truncate_to_width("a\tb", 10), "ab");
    }
}
