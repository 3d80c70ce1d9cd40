//! Topic error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during topic operations.
#[derive(Debug, Error)]
pub enum TopicsError {
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// No usable terms in the whole corpus
    #[error("Corpus has no usable terms after stop word removal")]
    EmptyVocabulary,

    /// A document-topic matrix violates its shape or row-sum contract
    #[error("Invalid topic distribution: {0}")]
    InvalidDistribution(String),

    /// Model fitting failed
    #[error("Topic model error: {0}")]
    Model(String),

    /// Label assignment error
    #[error("Category assignment error: {0}")]
    Assignment(#[from] watch_types::TypesError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Chart rendering error
    #[error("Render error: {0}")]
    Render(#[from] std::fmt::Error),

    /// File output error
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
