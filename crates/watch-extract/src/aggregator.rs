//! Record aggregation.

use tracing::{info, warn};
use watch_types::{WatchHistoryTable, WatchRecord};

use crate::error::Rejection;

/// Result of scanning one export.
#[derive(Debug, Clone, Default)]
pub struct ParseReport {
    /// Validated records in document order
    pub table: WatchHistoryTable,
    /// Number of candidate blocks examined
    pub candidates: usize,
    /// Candidates that produced no record
    pub rejections: Vec<Rejection>,
}

impl ParseReport {
    /// Fraction of candidates that became records (1.0 when there were none).
    pub fn success_rate(&self) -> f64 {
        if self.candidates == 0 {
            return 1.0;
        }
        self.table.len() as f64 / self.candidates as f64
    }
}

/// Collect extractor outcomes into a table, keeping rejections aside.
///
/// Accepts any (lazy or eager) sequence. An all-rejected or empty input
/// still yields a table with the full column schema.
pub fn aggregate<I>(outcomes: I) -> ParseReport
where
    I: IntoIterator<Item = Result<WatchRecord, Rejection>>,
{
    let mut records = Vec::new();
    let mut rejections = Vec::new();
    let mut candidates = 0;

    for outcome in outcomes {
        candidates += 1;
        match outcome {
            Ok(record) => records.push(record),
            Err(rejection) => rejections.push(rejection),
        }
    }

    info!(
        parsed = records.len(),
        rejected = rejections.len(),
        "Successfully parsed watch history entries"
    );
    if records.is_empty() {
        warn!("No entries were successfully parsed");
    }

    ParseReport {
        table: WatchHistoryTable::from_records(records),
        candidates,
        rejections,
    }
}
