//! Error types for chatlens-core

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the chatlens-core library
#[derive(Error, Debug)]
pub enum Error {
    /// Database error
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON rendering error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// The chat archive does not exist
    #[error("chat archive not found: {}", .0.display())]
    DatabaseNotFound(PathBuf),

    /// A row from the archive could not be mapped to a message
    #[error("invalid message row ({column}): {message}")]
    InvalidRow {
        column: &'static str,
        message: String,
    },
}

/// Result type alias for chatlens-core
pub type Result<T> = std::result::Result<T, Error>;
