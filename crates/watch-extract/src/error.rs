//! Extraction error types.
//!
//! Two tiers: [`ExtractError`] is fatal for the whole document, while
//! [`RejectReason`] describes why one entry was skipped.

use std::path::PathBuf;

use thiserror::Error;

use crate::extractor::LinkRole;

/// Document-level failures. These abort the parse.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The export could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The export is not valid UTF-8
    #[error("{} is not valid UTF-8: {source}", path.display())]
    Encoding {
        path: PathBuf,
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// The rule table cannot be turned into selectors
    #[error("Invalid extraction rules: {0}")]
    InvalidRules(String),
}

/// Why a trailing timestamp string was not accepted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimestampError {
    /// Nothing to parse
    #[error("timestamp text is empty")]
    Empty,

    /// No whitespace-separated zone abbreviation at the end
    #[error("missing time zone abbreviation")]
    MissingZone,

    /// The trailing token is not an abbreviation
    #[error("'{0}' is not a time zone abbreviation")]
    InvalidZone(String),

    /// Wrong number of whitespace-separated fields before the zone
    #[error("expected {expected} date-time fields, found {found}")]
    Shape { expected: usize, found: usize },

    /// The date-time part does not match the expected format
    #[error("date-time does not match format: {0}")]
    Format(#[from] chrono::ParseError),
}

/// Why a single candidate entry produced no record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RejectReason {
    /// No descendant carries the content-cell class tokens
    #[error("content cell not found")]
    MissingContentCell,

    /// Not enough links for the item and channel roles
    #[error("not enough links in entry: found {found}, need {required}")]
    TooFewLinks { found: usize, required: usize },

    /// A role link has no href attribute
    #[error("{0} link has no href")]
    MissingHref(LinkRole),

    /// A required field is blank after trimming
    #[error("{0} is empty")]
    EmptyField(&'static str),

    /// The trailing line is not a valid timestamp
    #[error("could not parse date '{raw}': {source}")]
    UnparseableTimestamp {
        raw: String,
        #[source]
        source: TimestampError,
    },
}

/// A rejected entry and its position among the scanned candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    /// Zero-based index of the candidate block in document order
    pub index: usize,
    /// Why it was rejected
    pub reason: RejectReason,
}

impl Rejection {
    pub fn new(index: usize, reason: RejectReason) -> Self {
        Self { index, reason }
    }
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "entry {}: {}", self.index, self.reason)
    }
}
