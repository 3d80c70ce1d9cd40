//! Error types shared by the watch-history crates.

use thiserror::Error;

/// Errors raised while building or converting domain values.
#[derive(Debug, Error)]
pub enum TypesError {
    /// A canonical timestamp string could not be read back
    #[error("Invalid timestamp '{value}': {reason}")]
    InvalidTimestamp { value: String, reason: String },

    /// A category label string is neither `Topic_<k>` nor `Uncategorized`
    #[error("Invalid category label: {0}")]
    InvalidCategory(String),

    /// A label sequence does not line up with the table rows
    #[error("Label count {labels} does not match row count {rows}")]
    LengthMismatch { rows: usize, labels: usize },

    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
