//! Watch timestamps.
//!
//! Takeout exports stamp each event with a wall-clock time and a time-zone
//! abbreviation such as `EST` or `CET`. Abbreviations are ambiguous, so the
//! zone is kept as a literal label and never resolved to an offset.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TypesError;

/// Canonical rendering used for export and re-import.
const CANONICAL_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Wall-clock time of a watch event plus its source-asserted zone label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WatchTimestamp {
    local: NaiveDateTime,
    zone: String,
}

impl WatchTimestamp {
    /// Create a timestamp from a wall-clock time and a zone abbreviation.
    ///
    /// The abbreviation must be a non-empty run of ASCII letters.
    pub fn new(local: NaiveDateTime, zone: impl Into<String>) -> Result<Self, TypesError> {
        let zone = zone.into();
        if !is_zone_abbreviation(&zone) {
            return Err(TypesError::InvalidTimestamp {
                value: zone,
                reason: "zone abbreviation must be ASCII letters".to_string(),
            });
        }
        Ok(Self { local, zone })
    }

    /// Wall-clock date-time exactly as written in the export.
    pub fn local(&self) -> NaiveDateTime {
        self.local
    }

    /// Literal zone abbreviation (e.g. `EST`).
    pub fn zone(&self) -> &str {
        &self.zone
    }

    pub fn year(&self) -> i32 {
        self.local.year()
    }

    pub fn month(&self) -> u32 {
        self.local.month()
    }

    pub fn day(&self) -> u32 {
        self.local.day()
    }

    pub fn hour(&self) -> u32 {
        self.local.hour()
    }

    pub fn minute(&self) -> u32 {
        self.local.minute()
    }

    pub fn second(&self) -> u32 {
        self.local.second()
    }
}

/// Check whether a token looks like a zone abbreviation.
pub fn is_zone_abbreviation(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_alphabetic())
}

impl fmt::Display for WatchTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.local.format(CANONICAL_FORMAT), self.zone)
    }
}

impl FromStr for WatchTimestamp {
    type Err = TypesError;

    /// Parse the canonical `YYYY-MM-DD HH:MM:SS ZONE` rendering.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (datetime, zone) =
            trimmed
                .rsplit_once(' ')
                .ok_or_else(|| TypesError::InvalidTimestamp {
                    value: s.to_string(),
                    reason: "missing zone abbreviation".to_string(),
                })?;

        let local = NaiveDateTime::parse_from_str(datetime.trim(), CANONICAL_FORMAT).map_err(
            |e| TypesError::InvalidTimestamp {
                value: s.to_string(),
                reason: e.to_string(),
            },
        )?;

        Self::new(local, zone)
    }
}

impl Serialize for WatchTimestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for WatchTimestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
