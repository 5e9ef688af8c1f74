//! Report sinks
//!
//! A [`ReportSink`] renders or persists a [`ConversationReport`]. The
//! analyzer never prints; the CLI picks a sink from `--format`.

use crate::analytics::{ConversationReport, Metric, MetricValue, ReportEntry};
use crate::error::Result;
use crate::format::{format_average, format_duration_secs, format_timestamp_ms, truncate_chars};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Longest message preview shown on the console.
const CONSOLE_PREVIEW_CHARS: usize = 120;

/// What a sink produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emitted {
    /// Written to the sink's stream
    Stream,
    /// Written to these files
    Files(Vec<PathBuf>),
}

pub trait ReportSink {
    fn emit(&mut self, report: &ConversationReport) -> Result<Emitted>;
}

// ============================================
// Console
// ============================================

/// Human-readable text, one block per metric.
pub struct ConsoleSink<W: Write> {
    out: W,
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_entry(&mut self, entry: &ReportEntry) -> Result<()> {
        let name = entry.metric.name();
        let value = match &entry.value {
            Ok(value) => value,
            Err(e) => {
                writeln!(self.out, "{}: error: {}", name, e)?;
                return Ok(());
            }
        };

        match value {
            MetricValue::Count(n) => writeln!(self.out, "{}: {}", name, n)?,
            MetricValue::Average(v) => writeln!(self.out, "{}: {}", name, format_average(*v))?,
            MetricValue::Day(Some(day)) => writeln!(
                self.out,
                "{}: {} ({} messages)",
                name, day.date, day.count
            )?,
            MetricValue::Day(None) => writeln!(self.out, "{}: none", name)?,
            MetricValue::Message(Some(message)) => {
                writeln!(self.out, "{}:", name)?;
                writeln!(
                    self.out,
                    "  {} ({}, {} chars)",
                    format_timestamp_ms(message.timestamp),
                    if message.from_me { "me" } else { "them" },
                    message.text().map_or(0, |t| t.chars().count())
                )?;
                writeln!(
                    self.out,
                    "  \"{}\"",
                    truncate_chars(message.text().unwrap_or_default(), CONSOLE_PREVIEW_CHARS)
                )?;
            }
            MetricValue::Message(None) => writeln!(self.out, "{}: none", name)?,
            MetricValue::Table(rows) => {
                writeln!(self.out, "{}:", name)?;
                for (label, count) in rows {
                    writeln!(self.out, "  {}: {}", label, count)?;
                }
            }
            MetricValue::Averages(rows) => {
                writeln!(self.out, "{}:", name)?;
                for (label, v) in rows {
                    let shown = if entry.metric == Metric::AverageResponseTime {
                        format_duration_secs(*v)
                    } else {
                        format_average(*v)
                    };
                    writeln!(self.out, "  {}: {}", label, shown)?;
                }
            }
            MetricValue::Dates(dates) => {
                writeln!(self.out, "{}: {}", name, dates.len())?;
                for date in dates {
                    writeln!(self.out, "  {}", date)?;
                }
            }
        }
        Ok(())
    }
}

impl<W: Write> ReportSink for ConsoleSink<W> {
    fn emit(&mut self, report: &ConversationReport) -> Result<Emitted> {
        writeln!(
            self.out,
            "Statistics for Conversation {}:",
            report.conversation_id
        )?;
        writeln!(self.out)?;
        for entry in &report.entries {
            self.write_entry(entry)?;
        }
        self.out.flush()?;
        Ok(Emitted::Stream)
    }
}

// ============================================
// JSON
// ============================================

/// One pretty-printed JSON document.
pub struct JsonSink<W: Write> {
    out: W,
}

impl<W: Write> JsonSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportSink for JsonSink<W> {
    fn emit(&mut self, report: &ConversationReport) -> Result<Emitted> {
        serde_json::to_writer_pretty(&mut self.out, &report.to_json())?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(Emitted::Stream)
    }
}

// ============================================
// TSV directory
// ============================================

/// One `{metric_key}_{conversation_id}.tsv` file per metric.
pub struct TsvDirectorySink {
    dir: PathBuf,
}

impl TsvDirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn file_path(&self, metric: Metric, conversation_id: i64) -> PathBuf {
        self.dir
            .join(format!("{}_{}.tsv", metric.key(), conversation_id))
    }
}

/// Tabs and newlines would break the two-column layout.
fn tsv_field(value: &str) -> String {
    value.replace(['\t', '\n', '\r'], " ")
}

impl ReportSink for TsvDirectorySink {
    fn emit(&mut self, report: &ConversationReport) -> Result<Emitted> {
        std::fs::create_dir_all(&self.dir)?;

        let mut written = Vec::with_capacity(report.entries.len());
        for entry in &report.entries {
            let path = self.file_path(entry.metric, report.conversation_id);
            let mut file = BufWriter::new(File::create(&path)?);

            match &entry.value {
                Ok(value) => {
                    for (key, value) in value.rows() {
                        writeln!(file, "{}\t{}", tsv_field(&key), tsv_field(&value))?;
                    }
                }
                Err(e) => writeln!(file, "error\t{}", tsv_field(&e.to_string()))?,
            }
            file.flush()?;
            written.push(path);
        }

        tracing::info!(
            conversation_id = report.conversation_id,
            count = written.len(),
            dir = %self.dir.display(),
            "Wrote metric files"
        );

        Ok(Emitted::Files(written))
    }
}
