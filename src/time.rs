//! `MM:SS` conversions.
//!
//! Playlist documents carry durations as `"MM:SS"` text and the UI shows
//! elapsed time in the same shape. Fractional seconds are always floored.

use std::time::Duration;

use serde::{Deserialize, Deserializer};

use crate::error::DataLoadError;

/// Parse `"MM:SS"` into a `Duration`.
///
/// Minutes may exceed 59 (`"75:00"`). Seconds are added as-is, so `"1:75"`
/// is 135 seconds.
pub fn parse_mmss(text: &str) -> Result<Duration, DataLoadError> {
    let invalid = || DataLoadError::InvalidDuration(text.to_string());

    let (minutes, seconds) = text.trim().split_once(':').ok_or_else(invalid)?;
    let minutes: u64 = minutes.trim().parse().map_err(|_| invalid())?;
    let seconds: u64 = seconds.trim().parse().map_err(|_| invalid())?;

    let total = minutes
        .checked_mul(60)
        .and_then(|m| m.checked_add(seconds))
        .ok_or_else(invalid)?;
    Ok(Duration::from_secs(total))
}

/// Format a `Duration` as `MM:SS`, zero-padded, flooring partial seconds.
pub fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

pub(crate) fn deserialize_mmss<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    parse_mmss(&text).map_err(serde::de::Error::custom)
}
