//! Error types for settings and table export.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the watch-history front end.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// File could not be opened or written
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV reading or writing failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON reading or writing failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Exported file does not match the table schema
    #[error("Schema mismatch: {0}")]
    Schema(String),

    /// A stored row is not a valid record
    #[error("Invalid record: {0}")]
    Record(#[from] watch_types::TypesError),
}
