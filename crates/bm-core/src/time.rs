//! Time utilities
//!
//! The daemon reports `receivedTime` and `lastActionTime` as Unix seconds,
//! sometimes as JSON numbers and sometimes as decimal strings.

use chrono::{DateTime, Utc};

use crate::error::TimestampError;

/// Convert Unix seconds to a UTC date.
///
/// # Examples
/// ```
/// use bm_core::time::from_unix_secs;
///
/// let date = from_unix_secs(1_400_000_000).unwrap();
/// assert_eq!(date.timestamp(), 1_400_000_000);
/// ```
pub fn from_unix_secs(secs: i64) -> Result<DateTime<Utc>, TimestampError> {
    DateTime::from_timestamp(secs, 0).ok_or(TimestampError::OutOfRange(secs))
}

/// Parse a base-10 Unix timestamp string and convert it to a UTC date.
///
/// Surrounding whitespace is ignored; anything else that is not an optional
/// sign followed by digits is rejected.
pub fn from_unix(value: &str) -> Result<DateTime<Utc>, TimestampError> {
    let trimmed = value.trim();
    let secs: i64 = trimmed
        .parse()
        .map_err(|_| TimestampError::NotANumber(value.to_string()))?;
    from_unix_secs(secs)
}

/// Convert a UTC date back to Unix seconds
pub fn to_unix(date: &DateTime<Utc>) -> i64 {
    date.timestamp()
}
