//! # chatlens-core
//!
//! Core library for chatlens - conversation statistics for WhatsApp chat archives.
//!
//! This library provides:
//! - Domain types for messages and media kinds
//! - Read-only access to a `msgstore.db` archive
//! - The conversation analyzer and its report
//! - Report sinks (console, JSON, per-metric TSV files)
//! - Configuration management
//! - Logging infrastructure
//!
//! ## Example
//!
//! ```rust,no_run
//! use chatlens_core::{Analyzer, Config, ConsoleSink, Database, MessageSource, ReportSink};
//!
//! let config = Config::load().expect("failed to load config");
//! let db = Database::open(&config.database.path).expect("failed to open archive");
//! let messages = db.load_messages(42).expect("failed to load messages");
//!
//! let report = Analyzer::new(&messages, 42)
//!     .with_settings(config.analysis)
//!     .with_vocabulary(config.vocabulary)
//!     .analyze();
//! ConsoleSink::new(std::io::stdout()).emit(&report).expect("failed to print report");
//! ```

// Re-export commonly used items at the crate root
pub use analytics::{AnalysisSettings, Analyzer, ConversationReport, Metric, Vocabulary};
pub use config::Config;
pub use db::{Database, InMemorySource, MessageSource};
pub use error::{Error, Result};
pub use sink::{ConsoleSink, Emitted, JsonSink, ReportSink, TsvDirectorySink};
pub use types::*;

// Public modules
pub mod analytics;
pub mod config;
pub mod db;
pub mod error;
pub mod format;
pub mod logging;
pub mod sink;
pub mod types;
