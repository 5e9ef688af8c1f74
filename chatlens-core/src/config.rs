//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/chatlens/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/chatlens/` (~/.config/chatlens/)
//! - State/Logs: `$XDG_STATE_HOME/chatlens/` (~/.local/state/chatlens/)

use crate::analytics::{AnalysisSettings, Vocabulary};
use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Chat archive location
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Metric parameters
    #[serde(default)]
    pub analysis: AnalysisSettings,

    /// Keyword lists and special dates
    #[serde(default)]
    pub vocabulary: Vocabulary,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Chat archive configuration
#[derive(Debug, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite archive
    #[serde(default = "default_database_path")]
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

fn default_database_path() -> PathBuf {
    PathBuf::from("data/msgstore.db")
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        Self::parse(&content)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("failed to parse config: {}", e)))
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/chatlens/config.toml` (~/.config/chatlens/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("chatlens").join("config.toml")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/chatlens/` (~/.local/state/chatlens/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("chatlens")
    }

    /// Returns the log file path
    ///
    /// `$XDG_STATE_HOME/chatlens/chatlens.log` (~/.local/state/chatlens/chatlens.log)
    pub fn log_path() -> PathBuf {
        Self::state_dir().join("chatlens.log")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::DayBoundary;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.database.path, PathBuf::from("data/msgstore.db"));
        assert_eq!(config.analysis.top_words, 30);
        assert_eq!(config.analysis.top_emojis, 15);
        assert_eq!(config.analysis.longest_message_max_chars, 300);
        assert_eq!(config.analysis.least_day_excluded_counts, vec![0, 2]);
        assert_eq!(config.analysis.day_boundary, DayBoundary::Utc);
        assert_eq!(config.logging.level, "info");
        assert!(config.vocabulary.stop_words.contains("de"));
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[database]
path = "/tmp/msgstore.db"

[analysis]
top_words = 10
day_boundary = "-03:00"

[vocabulary]
insult_words = ["chato"]

[[vocabulary.special_dates]]
name = "Aniversário"
date = "14-02-2023"

[logging]
level = "debug"
"#;
        let config = Config::parse(toml).unwrap();

        assert_eq!(config.database.path, PathBuf::from("/tmp/msgstore.db"));
        assert_eq!(config.analysis.top_words, 10);
        // unspecified keys keep their defaults
        assert_eq!(config.analysis.top_emojis, 15);
        assert_eq!(
            config.analysis.day_boundary,
            "-03:00".parse::<DayBoundary>().unwrap()
        );
        assert_eq!(config.vocabulary.insult_words.len(), 1);
        assert_eq!(config.vocabulary.special_dates.len(), 1);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_invalid_day_boundary() {
        let toml = r#"
[analysis]
day_boundary = "mars"
"#;
        let err = Config::parse(toml).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_load_from_missing_file() {
        let err = Config::load_from(Path::new("/nonexistent/chatlens.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }

    #[test]
    fn test_paths() {
        assert!(Config::config_path().ends_with("chatlens/config.toml"));
        assert!(Config::log_path().ends_with("chatlens/chatlens.log"));
    }
}
