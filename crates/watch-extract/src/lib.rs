//! # watch-extract
//!
//! Recovers structured watch records from a Takeout `watch-history.html`
//! export.
//!
//! The export is loosely versioned markup keyed on style classes, so every
//! shape assumption lives in one rule table ([`ExtractionRules`]). Extraction
//! is partial-failure tolerant: a malformed entry is logged, recorded as a
//! [`Rejection`], and skipped; only document-level failures (unreadable
//! file, invalid UTF-8) are returned as errors.
//!
//! ## Pipeline
//! - [`HistoryDocument`]: load and parse the export
//! - [`EntryExtractor`]: one candidate block -> record or rejection
//! - [`parse_watch_timestamp`]: tolerant timestamp normalization
//! - [`aggregate`]: outcomes -> fixed-schema table plus rejections

pub mod aggregator;
pub mod error;
pub mod extractor;
pub mod loader;
pub mod parser;
pub mod rules;
pub mod timestamp;

pub use aggregator::{aggregate, ParseReport};
pub use error::{ExtractError, RejectReason, Rejection, TimestampError};
pub use extractor::{EntryExtractor, LinkRole};
pub use loader::HistoryDocument;
pub use parser::HistoryParser;
pub use rules::ExtractionRules;
pub use timestamp::{parse_watch_timestamp, TAKEOUT_TIMESTAMP_FORMAT};
