//! Attaching category labels to a watch-history table.

use std::collections::BTreeMap;

use tracing::{debug, error};
use watch_types::{CategoryLabel, WatchHistoryTable};

use crate::error::TopicsError;

/// Return a copy of `table` with one category per row.
///
/// `labels` must line up with the table rows; a length mismatch is an error
/// and leaves the input untouched.
pub fn assign_categories(
    table: &WatchHistoryTable,
    labels: &[CategoryLabel],
) -> Result<WatchHistoryTable, TopicsError> {
    let categorized = table.clone().with_categories(labels).map_err(|e| {
        error!(error = %e, "Failed to assign categories");
        TopicsError::from(e)
    })?;
    debug!(rows = categorized.len(), "Assigned categories");
    Ok(categorized)
}

/// Rows per category, in label order.
pub fn category_counts(table: &WatchHistoryTable) -> BTreeMap<CategoryLabel, usize> {
    let mut counts = BTreeMap::new();
    for label in table.iter().filter_map(|r| r.category) {
        *counts.entry(label).or_insert(0) += 1;
    }
    counts
}
