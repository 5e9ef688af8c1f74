//! Metric result types and the aggregated conversation report.

use super::metrics_registry::Metric;
use crate::types::Message;
use chrono::{NaiveDate, Weekday};
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use thiserror::Error;

// ============================================
// Per-metric failures
// ============================================

/// Why a single metric could not be computed.
///
/// Stored in the report next to the metric instead of aborting the others.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum MetricError {
    #[error("message {message_id} has timestamp {timestamp} outside the supported date range")]
    TimestampOutOfRange { message_id: i64, timestamp: i64 },
}

/// Result of a metric that buckets by calendar time.
pub type MetricResult<T> = std::result::Result<T, MetricError>;

// ============================================
// Typed metric results
// ============================================

/// Messages per sender.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SenderCounts {
    pub from_me: usize,
    pub from_them: usize,
}

/// Messages per elapsed day, overall and per sender.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DailyAverage {
    pub overall: f64,
    pub from_me: f64,
    pub from_them: f64,
}

/// A calendar date and its message count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayCount {
    pub date: NaiveDate,
    pub count: usize,
}

/// Messages carrying a greeting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GreetingCounts {
    pub bom_dia: usize,
    pub boa_noite: usize,
}

/// Happy and sad keyword tallies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MoodCounts {
    pub happy: usize,
    pub sad: usize,
}

/// Average gaps in seconds between consecutive messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ResponseTimes {
    /// Gaps ending in a message from me
    pub me: f64,
    /// Gaps ending in a message from them
    pub them: f64,
    /// All attributed gaps
    pub overall: f64,
}

/// Messages per media kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MediaCounts {
    pub photo: usize,
    pub sticker: usize,
    pub audio: usize,
    pub video: usize,
    pub call: usize,
    pub location: usize,
}

impl MediaCounts {
    pub fn total(&self) -> usize {
        self.photo + self.sticker + self.audio + self.video + self.call + self.location
    }
}

// ============================================
// Metric values
// ============================================

/// Closed set of metric value shapes, as stored in a report.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricValue {
    Count(usize),
    Average(f64),
    /// Ordered label/count rows
    Table(Vec<(String, usize)>),
    /// Ordered label/value rows
    Averages(Vec<(String, f64)>),
    Day(Option<DayCount>),
    Message(Option<Message>),
    Dates(Vec<NaiveDate>),
}

impl MetricValue {
    /// JSON rendering. Tables become arrays of `[label, value]` pairs so
    /// that ranking order survives.
    pub fn to_json(&self) -> Value {
        match self {
            MetricValue::Count(n) => json!(n),
            MetricValue::Average(v) => json!(v),
            MetricValue::Table(rows) => json!(rows),
            MetricValue::Averages(rows) => json!(rows),
            MetricValue::Day(day) => json!(day),
            MetricValue::Message(message) => json!(message),
            MetricValue::Dates(dates) => json!(dates
                .iter()
                .map(|d| d.to_string())
                .collect::<Vec<_>>()),
        }
    }

    /// Two-column key/value rows, one entry per line of a table artifact.
    pub fn rows(&self) -> Vec<(String, String)> {
        match self {
            MetricValue::Count(n) => vec![("value".to_string(), n.to_string())],
            MetricValue::Average(v) => vec![("value".to_string(), format_float(*v))],
            MetricValue::Table(rows) => rows
                .iter()
                .map(|(label, count)| (label.clone(), count.to_string()))
                .collect(),
            MetricValue::Averages(rows) => rows
                .iter()
                .map(|(label, value)| (label.clone(), format_float(*value)))
                .collect(),
            MetricValue::Day(Some(day)) => vec![
                ("date".to_string(), day.date.to_string()),
                ("count".to_string(), day.count.to_string()),
            ],
            MetricValue::Message(Some(message)) => vec![
                ("id".to_string(), message.id.to_string()),
                ("timestamp".to_string(), message.timestamp.to_string()),
                ("from_me".to_string(), message.from_me.to_string()),
                ("text".to_string(), message.text.clone().unwrap_or_default()),
            ],
            MetricValue::Day(None) | MetricValue::Message(None) => Vec::new(),
            MetricValue::Dates(dates) => dates
                .iter()
                .map(|d| (d.to_string(), "0".to_string()))
                .collect(),
        }
    }
}

fn format_float(value: f64) -> String {
    format!("{:.2}", value)
}

impl From<usize> for MetricValue {
    fn from(value: usize) -> Self {
        MetricValue::Count(value)
    }
}

impl From<f64> for MetricValue {
    fn from(value: f64) -> Self {
        MetricValue::Average(value)
    }
}

impl From<SenderCounts> for MetricValue {
    fn from(value: SenderCounts) -> Self {
        MetricValue::Table(vec![
            ("from_me".to_string(), value.from_me),
            ("from_them".to_string(), value.from_them),
        ])
    }
}

impl From<DailyAverage> for MetricValue {
    fn from(value: DailyAverage) -> Self {
        MetricValue::Averages(vec![
            ("overall".to_string(), value.overall),
            ("from_me".to_string(), value.from_me),
            ("from_them".to_string(), value.from_them),
        ])
    }
}

impl From<GreetingCounts> for MetricValue {
    fn from(value: GreetingCounts) -> Self {
        MetricValue::Table(vec![
            ("bom_dia".to_string(), value.bom_dia),
            ("boa_noite".to_string(), value.boa_noite),
        ])
    }
}

impl From<MoodCounts> for MetricValue {
    fn from(value: MoodCounts) -> Self {
        MetricValue::Table(vec![
            ("happy".to_string(), value.happy),
            ("sad".to_string(), value.sad),
        ])
    }
}

impl From<ResponseTimes> for MetricValue {
    fn from(value: ResponseTimes) -> Self {
        MetricValue::Averages(vec![
            ("average_response_time_me".to_string(), value.me),
            ("average_response_time_them".to_string(), value.them),
            ("average_response_time_overall".to_string(), value.overall),
        ])
    }
}

impl From<Option<DayCount>> for MetricValue {
    fn from(value: Option<DayCount>) -> Self {
        MetricValue::Day(value)
    }
}

impl From<Option<Message>> for MetricValue {
    fn from(value: Option<Message>) -> Self {
        MetricValue::Message(value)
    }
}

impl From<Vec<NaiveDate>> for MetricValue {
    fn from(value: Vec<NaiveDate>) -> Self {
        MetricValue::Dates(value)
    }
}

impl From<Vec<(String, usize)>> for MetricValue {
    fn from(value: Vec<(String, usize)>) -> Self {
        MetricValue::Table(value)
    }
}

impl From<Vec<(char, usize)>> for MetricValue {
    fn from(value: Vec<(char, usize)>) -> Self {
        MetricValue::Table(
            value
                .into_iter()
                .map(|(c, count)| (c.to_string(), count))
                .collect(),
        )
    }
}

impl From<Vec<(Weekday, usize)>> for MetricValue {
    fn from(value: Vec<(Weekday, usize)>) -> Self {
        MetricValue::Table(
            value
                .into_iter()
                .map(|(day, count)| (weekday_name(day).to_string(), count))
                .collect(),
        )
    }
}

impl<K: ToString> From<BTreeMap<K, usize>> for MetricValue {
    fn from(value: BTreeMap<K, usize>) -> Self {
        MetricValue::Table(
            value
                .into_iter()
                .map(|(key, count)| (key.to_string(), count))
                .collect(),
        )
    }
}

/// Full English weekday name.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

// ============================================
// Report
// ============================================

/// One metric and its outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportEntry {
    pub metric: Metric,
    pub value: MetricResult<MetricValue>,
}

impl ReportEntry {
    pub fn to_json(&self) -> Value {
        match &self.value {
            Ok(value) => json!({
                "key": self.metric.key(),
                "name": self.metric.name(),
                "value": value.to_json(),
            }),
            Err(error) => json!({
                "key": self.metric.key(),
                "name": self.metric.name(),
                "error": error.to_string(),
            }),
        }
    }
}

/// Every metric computed for one conversation, in [`Metric::ALL`] order.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationReport {
    pub conversation_id: i64,
    pub message_count: usize,
    pub entries: Vec<ReportEntry>,
}

impl ConversationReport {
    /// Outcome of a single metric.
    pub fn get(&self, metric: Metric) -> Option<&MetricResult<MetricValue>> {
        self.entries
            .iter()
            .find(|entry| entry.metric == metric)
            .map(|entry| &entry.value)
    }

    /// Entries whose metric failed.
    pub fn failures(&self) -> impl Iterator<Item = &ReportEntry> {
        self.entries.iter().filter(|entry| entry.value.is_err())
    }

    pub fn to_json(&self) -> Value {
        json!({
            "conversation_id": self.conversation_id,
            "message_count": self.message_count,
            "metrics": self.entries.iter().map(ReportEntry::to_json).collect::<Vec<_>>(),
        })
    }
}
