//! chatlens - conversation statistics for a WhatsApp chat archive
//!
//! Loads one conversation from `msgstore.db`, computes every metric and
//! prints the report (or writes it as per-metric TSV files).

use anyhow::{Context, Result};
use chatlens_core::{
    Analyzer, Config, ConsoleSink, Database, Emitted, JsonSink, MessageSource, ReportSink,
    TsvDirectorySink,
};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "chatlens")]
#[command(about = "Conversation statistics for a WhatsApp chat archive")]
#[command(version)]
struct Args {
    /// Conversation (chat row) id to analyze
    conversation_id: i64,

    /// Path to the archive (overrides [database] path)
    #[arg(long)]
    db: Option<PathBuf>,

    /// Config file (default: ~/.config/chatlens/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Directory for per-metric files (tsv format only)
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
    Tsv,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("failed to load configuration")?;
    let _log_guard = chatlens_core::logging::init(&config.logging).ok();

    let db_path = args.db.clone().unwrap_or_else(|| config.database.path.clone());
    let db = Database::open(&db_path)
        .with_context(|| format!("failed to open chat archive {}", db_path.display()))?;

    let messages = db
        .load_messages(args.conversation_id)
        .with_context(|| format!("failed to load conversation {}", args.conversation_id))?;
    tracing::info!(
        conversation_id = args.conversation_id,
        count = messages.len(),
        "Analyzing conversation"
    );
    if messages.is_empty() {
        tracing::warn!(
            conversation_id = args.conversation_id,
            "Conversation has no messages"
        );
    }

    let report = Analyzer::new(&messages, args.conversation_id)
        .with_settings(config.analysis)
        .with_vocabulary(config.vocabulary)
        .analyze();

    let emitted = match args.format {
        OutputFormat::Text => ConsoleSink::new(std::io::stdout().lock()).emit(&report),
        OutputFormat::Json => JsonSink::new(std::io::stdout().lock()).emit(&report),
        OutputFormat::Tsv => TsvDirectorySink::new(&args.output_dir).emit(&report),
    }
    .context("failed to write report")?;

    if let Emitted::Files(paths) = emitted {
        println!(
            "Wrote {} metric files to {}",
            paths.len(),
            args.output_dir.display()
        );
    }

    for entry in report.failures() {
        eprintln!("warning: {} could not be computed", entry.metric.name());
    }

    Ok(())
}
