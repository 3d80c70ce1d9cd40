//! Category labels assigned from topic classification.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TypesError;

const TOPIC_PREFIX: &str = "Topic_";
const UNCATEGORIZED: &str = "Uncategorized";

/// Category of a watch record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CategoryLabel {
    /// Dominant topic index in [0, K)
    Topic(usize),
    /// Small-corpus fallback
    Uncategorized,
}

impl CategoryLabel {
    /// Topic index, if this label names a topic.
    pub fn topic_index(&self) -> Option<usize> {
        match self {
            CategoryLabel::Topic(index) => Some(*index),
            CategoryLabel::Uncategorized => None,
        }
    }

    /// Check if this is the fallback label.
    pub fn is_uncategorized(&self) -> bool {
        matches!(self, CategoryLabel::Uncategorized)
    }
}

impl fmt::Display for CategoryLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryLabel::Topic(index) => write!(f, "{}{}", TOPIC_PREFIX, index),
            CategoryLabel::Uncategorized => write!(f, "{}", UNCATEGORIZED),
        }
    }
}

impl FromStr for CategoryLabel {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == UNCATEGORIZED {
            return Ok(CategoryLabel::Uncategorized);
        }
        s.strip_prefix(TOPIC_PREFIX)
            .and_then(|index| index.parse::<usize>().ok())
            .map(CategoryLabel::Topic)
            .ok_or_else(|| TypesError::InvalidCategory(s.to_string()))
    }
}

impl Serialize for CategoryLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CategoryLabel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
