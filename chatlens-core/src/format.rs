//! Formatting helpers for human-readable report output.

use chrono::{DateTime, Utc};

/// Format a duration in seconds compactly (e.g., "45s", "3m 20s", "2h 05m").
pub fn format_duration_secs(secs: f64) -> String {
    if !secs.is_finite() || secs < 0.0 {
        return "0s".to_string();
    }
    if secs < 60.0 {
        return format!("{:.0}s", secs);
    }

    let total = secs.round() as u64;
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);
    if hours > 0 {
        format!("{}h {:02}m", hours, minutes)
    } else {
        format!("{}m {:02}s", minutes, seconds)
    }
}

/// Two-decimal rendering of averages.
pub fn format_average(value: f64) -> String {
    format!("{:.2}", value)
}

/// Format a message timestamp (milliseconds since epoch) as UTC, or "-" if out of range.
pub fn format_timestamp_ms(timestamp_ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(timestamp_ms)
        .map(|ts| ts.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Shorten `text` to at most `max_chars` characters, marking the cut with "...".
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", kept)
}
