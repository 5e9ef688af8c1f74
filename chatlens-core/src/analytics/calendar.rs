//! Day boundary policy for calendar bucketing.
//!
//! Every metric that buckets by date, hour, month or weekday converts
//! timestamps through the same [`DayBoundary`], so results near midnight
//! agree across metrics.

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, TimeZone, Utc};
use serde::Deserialize;
use std::fmt;

/// Time zone used to cut timestamps into calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum DayBoundary {
    /// Dates are UTC dates
    #[default]
    Utc,
    /// Dates follow the machine's local time zone
    Local,
    /// Dates follow a fixed UTC offset (e.g. `-03:00`)
    Fixed(FixedOffset),
}

impl DayBoundary {
    /// Convert a millisecond timestamp to wall-clock time under this policy.
    ///
    /// Returns `None` when the timestamp is outside chrono's representable range.
    pub fn local_datetime(&self, timestamp_ms: i64) -> Option<NaiveDateTime> {
        match self {
            DayBoundary::Utc => {
                DateTime::<Utc>::from_timestamp_millis(timestamp_ms).map(|dt| dt.naive_utc())
            }
            DayBoundary::Local => Local
                .timestamp_millis_opt(timestamp_ms)
                .single()
                .map(|dt| dt.naive_local()),
            DayBoundary::Fixed(offset) => offset
                .timestamp_millis_opt(timestamp_ms)
                .single()
                .map(|dt| dt.naive_local()),
        }
    }
}

impl std::str::FromStr for DayBoundary {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "utc" | "z" => Ok(DayBoundary::Utc),
            "local" => Ok(DayBoundary::Local),
            other => parse_offset(other)
                .map(DayBoundary::Fixed)
                .ok_or_else(|| format!("invalid day boundary: {} (use utc, local or +HH:MM)", s)),
        }
    }
}

impl TryFrom<String> for DayBoundary {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for DayBoundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayBoundary::Utc => write!(f, "utc"),
            DayBoundary::Local => write!(f, "local"),
            DayBoundary::Fixed(offset) => write!(f, "{}", offset),
        }
    }
}

/// Parse `+HH:MM`, `-HH:MM` or `+HHMM`.
fn parse_offset(s: &str) -> Option<FixedOffset> {
    let (sign, rest) = match s.as_bytes().first()? {
        b'+' => (1, &s[1..]),
        b'-' => (-1, &s[1..]),
        _ => return None,
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let hours: i32 = digits[..2].parse().ok()?;
    let minutes: i32 = digits[2..].parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
