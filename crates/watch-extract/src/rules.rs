//! Markup match rules for the Takeout export.
//!
//! All assumptions about the export's shape are collected here:
//! - the exact class string of a top-level event container,
//! - the token set a content cell must carry (order-independent, extra
//!   tokens allowed),
//! - which link index is the watched item and which is the channel,
//! - the chrono format of the trailing timestamp line.
//!
//! Format drift between export versions should only require a change to
//! these values, which is why they are configurable.

use scraper::Selector;
use serde::{Deserialize, Serialize};

use crate::error::ExtractError;
use crate::timestamp::TAKEOUT_TIMESTAMP_FORMAT;

/// Rule table for locating watch entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionRules {
    /// Exact `class` attribute value of a top-level event container
    #[serde(default = "default_container_class")]
    pub container_class: String,

    /// Class tokens a content cell must all carry
    #[serde(default = "default_content_cell_tokens")]
    pub content_cell_tokens: Vec<String>,

    /// Position of the watched-item link inside the content cell
    #[serde(default = "default_item_link_index")]
    pub item_link_index: usize,

    /// Position of the channel link inside the content cell
    #[serde(default = "default_channel_link_index")]
    pub channel_link_index: usize,

    /// chrono format of the timestamp, without the trailing zone token
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
}

impl Default for ExtractionRules {
    fn default() -> Self {
        Self {
            container_class: default_container_class(),
            content_cell_tokens: default_content_cell_tokens(),
            item_link_index: default_item_link_index(),
            channel_link_index: default_channel_link_index(),
            timestamp_format: default_timestamp_format(),
        }
    }
}

fn default_container_class() -> String {
    "outer-cell mdl-cell mdl-cell--12-col mdl-shadow--2dp".to_string()
}

fn default_content_cell_tokens() -> Vec<String> {
    vec![
        "content-cell".to_string(),
        "mdl-cell--6-col".to_string(),
        "mdl-typography--body-1".to_string(),
    ]
}

fn default_item_link_index() -> usize {
    0
}

fn default_channel_link_index() -> usize {
    1
}

fn default_timestamp_format() -> String {
    TAKEOUT_TIMESTAMP_FORMAT.to_string()
}

impl ExtractionRules {
    /// Validate rule values.
    pub fn validate(&self) -> Result<(), String> {
        if self.container_class.trim().is_empty() {
            return Err("container_class must not be empty".to_string());
        }
        if self.container_class.contains(['"', '\\']) {
            return Err("container_class must not contain quotes or backslashes".to_string());
        }
        if self.content_cell_tokens.is_empty() {
            return Err("content_cell_tokens must not be empty".to_string());
        }
        if let Some(bad) = self
            .content_cell_tokens
            .iter()
            .find(|t| t.is_empty() || t.chars().any(char::is_whitespace))
        {
            return Err(format!("invalid content cell token '{}'", bad));
        }
        if self.item_link_index == self.channel_link_index {
            return Err("item and channel link indices must differ".to_string());
        }
        if self.timestamp_format.trim().is_empty() {
            return Err("timestamp_format must not be empty".to_string());
        }
        Ok(())
    }

    /// Minimum number of links a content cell needs.
    pub fn required_links(&self) -> usize {
        self.item_link_index.max(self.channel_link_index) + 1
    }

    /// Selector matching top-level containers by exact class string.
    pub(crate) fn container_selector(&self) -> Result<Selector, ExtractError> {
        parse_selector(&format!("div[class=\"{}\"]", self.container_class))
    }

    /// Selector matching a div that carries every content-cell token.
    pub(crate) fn content_cell_selector(&self) -> Result<Selector, ExtractError> {
        let classes: String = self
            .content_cell_tokens
            .iter()
            .map(|token| format!(".{}", token))
            .collect();
        parse_selector(&format!("div{}", classes))
    }
}

pub(crate) fn parse_selector(css: &str) -> Result<Selector, ExtractError> {
    Selector::parse(css)
        .map_err(|e| ExtractError::InvalidRules(format!("invalid selector '{}': {:?}", css, e)))
}
