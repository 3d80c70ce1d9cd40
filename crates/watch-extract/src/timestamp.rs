//! Timestamp normalization.
//!
//! Takeout renders watch times as `Feb 23, 2024, 7:36:45 PM EST`. The zone
//! abbreviation is split off and kept verbatim; the rest must match the
//! configured chrono format exactly.

use chrono::NaiveDateTime;
use watch_types::timestamp::is_zone_abbreviation;
use watch_types::WatchTimestamp;

use crate::error::TimestampError;

/// Takeout timestamp format, minus the trailing zone abbreviation.
pub const TAKEOUT_TIMESTAMP_FORMAT: &str = "%b %d, %Y, %I:%M:%S %p";

/// Parse a trailing timestamp line into a [`WatchTimestamp`].
///
/// Non-breaking and narrow non-breaking spaces count as ordinary spaces;
/// newer exports put U+202F before `AM`/`PM`.
pub fn parse_watch_timestamp(raw: &str, format: &str) -> Result<WatchTimestamp, TimestampError> {
    let normalized: String = raw
        .chars()
        .map(|c| match c {
            '\u{00A0}' | '\u{202F}' => ' ',
            other => other,
        })
        .collect();
    let text = normalized.trim();
    if text.is_empty() {
        return Err(TimestampError::Empty);
    }

    let (datetime, zone) = text
        .rsplit_once(char::is_whitespace)
        .ok_or(TimestampError::MissingZone)?;
    if !is_zone_abbreviation(zone) {
        return Err(TimestampError::InvalidZone(zone.to_string()));
    }

    // chrono lets a format space match no whitespace at all
    let expected = format.split_whitespace().count();
    let found = datetime.split_whitespace().count();
    if found != expected {
        return Err(TimestampError::Shape { expected, found });
    }

    let local = NaiveDateTime::parse_from_str(datetime.trim_end(), format)?;

    WatchTimestamp::new(local, zone).map_err(|_| TimestampError::InvalidZone(zone.to_string()))
}
