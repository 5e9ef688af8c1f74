//! Analytics module for chatlens
//!
//! Computes conversation statistics over an ordered message sequence:
//! - Volume and sender split
//! - Word, emoji and keyword tallies
//! - Media counts by type code
//! - Hourly, daily, weekday and monthly distributions
//! - Response times between the two participants
//!
//! [`Analyzer`] computes each metric on demand; [`Analyzer::analyze`] runs
//! every metric in [`Metric::ALL`] and collects a [`ConversationReport`].

pub mod analyzer;
pub mod calendar;
pub mod metrics_registry;
pub mod report;
pub mod text;
pub mod vocabulary;

pub use analyzer::{AnalysisSettings, Analyzer};
pub use calendar::DayBoundary;
pub use metrics_registry::{
    list_metrics, list_metrics_of_type, Metric, MetricDescriptor, MetricValueType, METRICS,
};
pub use report::{
    ConversationReport, DailyAverage, DayCount, GreetingCounts, MediaCounts, MetricError,
    MetricResult, MetricValue, MoodCounts, ReportEntry, ResponseTimes, SenderCounts,
};
pub use vocabulary::{SpecialDate, Vocabulary};
