//! # watch-types
//!
//! Shared domain types for the watch-history analyzer.
//!
//! This crate defines the core data structures used throughout the system:
//! - Records: one watch event recovered from a Takeout export
//! - Timestamps: wall-clock time plus the export's literal zone abbreviation
//! - Category labels: `Topic_<k>` or `Uncategorized`
//! - Tables: ordered records sharing a fixed column schema
//!
//! ## Usage
//!
//! ```rust
//! use watch_types::{WatchHistoryTable, BASE_COLUMNS};
//!
//! let table = WatchHistoryTable::empty();
//! assert_eq!(table.columns(), BASE_COLUMNS);
//! ```

pub mod category;
pub mod error;
pub mod record;
pub mod table;
pub mod timestamp;

pub use category::CategoryLabel;
pub use error::TypesError;
pub use record::WatchRecord;
pub use table::{WatchHistoryTable, BASE_COLUMNS, CATEGORIZED_COLUMNS};
pub use timestamp::WatchTimestamp;
