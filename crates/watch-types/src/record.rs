//! Watch record type.
//!
//! A record is one watched-item event recovered from a single markup block
//! of the export. Everything except `category` is fixed at extraction time.

use serde::{Deserialize, Serialize};

use crate::category::CategoryLabel;
use crate::error::TypesError;
use crate::timestamp::WatchTimestamp;

/// One watch event.
///
/// Serialized field names follow the exported column names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchRecord {
    /// Visible title of the watched item
    #[serde(rename = "video")]
    pub video_title: String,

    /// Literal href of the item link
    pub video_url: String,

    /// Visible channel name
    #[serde(rename = "channel")]
    pub channel_name: String,

    /// Literal href of the channel link
    pub channel_url: String,

    /// When the item was watched
    #[serde(rename = "date")]
    pub watched_at: WatchTimestamp,

    /// Category, populated only after classification
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryLabel>,
}

impl WatchRecord {
    /// Create a record without a category.
    ///
    /// Every text field must be non-empty after trimming.
    pub fn new(
        video_title: impl Into<String>,
        video_url: impl Into<String>,
        channel_name: impl Into<String>,
        channel_url: impl Into<String>,
        watched_at: WatchTimestamp,
    ) -> Result<Self, TypesError> {
        let record = Self {
            video_title: video_title.into(),
            video_url: video_url.into(),
            channel_name: channel_name.into(),
            channel_url: channel_url.into(),
            watched_at,
            category: None,
        };
        record.validate()?;
        Ok(record)
    }

    /// Return a copy of this record carrying a category.
    pub fn with_category(mut self, category: CategoryLabel) -> Self {
        self.category = Some(category);
        self
    }

    /// Check the non-empty field invariant.
    pub fn validate(&self) -> Result<(), TypesError> {
        let fields = [
            ("video", &self.video_title),
            ("video_url", &self.video_url),
            ("channel", &self.channel_name),
            ("channel_url", &self.channel_url),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(TypesError::InvalidInput(format!("{} is empty", name)));
            }
        }
        Ok(())
    }
}
