//! Watch history table.
//!
//! An ordered sequence of records sharing one fixed column schema. The
//! schema never depends on the row count: an empty table still reports the
//! full column set.

use serde::{Deserialize, Serialize};

use crate::category::CategoryLabel;
use crate::error::TypesError;
use crate::record::WatchRecord;

/// Columns of an extracted (not yet classified) table.
pub const BASE_COLUMNS: &[&str] = &["video", "video_url", "channel", "channel_url", "date"];

/// Columns once categories have been assigned.
pub const CATEGORIZED_COLUMNS: &[&str] = &[
    "video",
    "video_url",
    "channel",
    "channel_url",
    "date",
    "category",
];

/// Ordered watch records with a fixed schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchHistoryTable {
    records: Vec<WatchRecord>,
    categorized: bool,
}

impl WatchHistoryTable {
    /// Create an empty, uncategorized table.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create an uncategorized table from extracted records.
    ///
    /// Any category already present on the records is cleared.
    pub fn from_records(records: Vec<WatchRecord>) -> Self {
        let records = records
            .into_iter()
            .map(|mut r| {
                r.category = None;
                r
            })
            .collect();
        Self {
            records,
            categorized: false,
        }
    }

    /// Rebuild a table from stored rows, checking category consistency.
    ///
    /// A categorized table needs a category on every row; an uncategorized
    /// table must have none.
    pub fn from_parts(records: Vec<WatchRecord>, categorized: bool) -> Result<Self, TypesError> {
        if let Some(pos) = records
            .iter()
            .position(|r| r.category.is_some() != categorized)
        {
            return Err(TypesError::InvalidInput(format!(
                "row {} category does not match table schema (categorized = {})",
                pos, categorized
            )));
        }
        Ok(Self {
            records,
            categorized,
        })
    }

    /// Column names in order.
    pub fn columns(&self) -> &'static [&'static str] {
        if self.categorized {
            CATEGORIZED_COLUMNS
        } else {
            BASE_COLUMNS
        }
    }

    /// Whether the `category` column is present.
    pub fn is_categorized(&self) -> bool {
        self.categorized
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[WatchRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WatchRecord> {
        self.records.iter()
    }

    pub fn into_records(self) -> Vec<WatchRecord> {
        self.records
    }

    /// Titles in row order, the input to topic classification.
    pub fn titles(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.video_title.as_str()).collect()
    }

    /// Attach one label per row, preserving row order.
    ///
    /// Fails without modifying anything if the lengths differ.
    pub fn with_categories(self, labels: &[CategoryLabel]) -> Result<Self, TypesError> {
        if labels.len() != self.records.len() {
            return Err(TypesError::LengthMismatch {
                rows: self.records.len(),
                labels: labels.len(),
            });
        }

        let records = self
            .records
            .into_iter()
            .zip(labels.iter().copied())
            .map(|(record, label)| record.with_category(label))
            .collect();

        Ok(Self {
            records,
            categorized: true,
        })
    }
}

impl<'a> IntoIterator for &'a WatchHistoryTable {
    type Item = &'a WatchRecord;
    type IntoIter = std::slice::Iter<'a, WatchRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
