//! Parsing boundary for source strings.
//!
//! Upstream feeds deliver dates as `YYYYMMDD` (sometimes `YYYY-MM-DD`) and
//! times as 3 to 6 bare digits depending on the category. Everything past
//! this module works with `chrono` values only.

use chrono::{NaiveDate, NaiveTime};

use crate::errors::CoreError;

/// Parse a calendar date in `YYYYMMDD` or `YYYY-MM-DD` form.
///
/// # Errors
///
/// Returns [`CoreError::InvalidDate`] for any other shape or for an
/// impossible day such as `20250230`.
pub fn parse_date(input: &str) -> Result<NaiveDate, CoreError> {
    let trimmed = input.trim();
    let invalid = || CoreError::InvalidDate(input.to_string());

    let compact: String = match trimmed.len() {
        8 if trimmed.bytes().all(|b| b.is_ascii_digit()) => trimmed.to_string(),
        10 if is_dashed_date(trimmed) => trimmed.replace('-', ""),
        _ => return Err(invalid()),
    };

    let year: i32 = compact[0..4].parse().map_err(|_| invalid())?;
    let month: u32 = compact[4..6].parse().map_err(|_| invalid())?;
    let day: u32 = compact[6..8].parse().map_err(|_| invalid())?;
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

fn is_dashed_date(s: &str) -> bool {
    s.bytes().enumerate().all(|(idx, b)| match idx {
        4 | 7 => b == b'-',
        _ => b.is_ascii_digit(),
    })
}

/// Parse a publication time.
///
/// Non-digit characters are stripped first (`"15:40"` → `"1540"`), then:
/// 6 digits `HHMMSS`, 5 digits `HMMSS`, 4 digits `HHMM`, 3 digits `HMM`.
///
/// # Errors
///
/// Returns [`CoreError::InvalidTime`] for other digit counts or
/// out-of-range components.
pub fn parse_time(input: &str) -> Result<NaiveTime, CoreError> {
    let digits: String = input.chars().filter(char::is_ascii_digit).collect();
    let invalid = || CoreError::InvalidTime(input.to_string());

    let padded = match digits.len() {
        6 | 4 => digits,
        5 | 3 => format!("0{digits}"),
        _ => return Err(invalid()),
    };

    let hour: u32 = padded[0..2].parse().map_err(|_| invalid())?;
    let minute: u32 = padded[2..4].parse().map_err(|_| invalid())?;
    let second: u32 = match padded.get(4..6) {
        Some(sec) => sec.parse().map_err(|_| invalid())?,
        None => 0,
    };
    NaiveTime::from_hms_opt(hour, minute, second).ok_or_else(invalid)
}

/// Extract the date a feed timestamp belongs to.
///
/// Accepts `YYYYMMDD...` (e.g. `20250813153000`) and ISO-like
/// `YYYY-MM-DD...` (e.g. `2025-08-13T15:30:00`) prefixes.
///
/// # Errors
///
/// Returns [`CoreError::InvalidTimestamp`] when neither prefix parses.
pub fn parse_timestamp_date(timestamp: &str) -> Result<NaiveDate, CoreError> {
    let trimmed = timestamp.trim();
    let invalid = || CoreError::InvalidTimestamp(timestamp.to_string());

    if let Some(compact) = trimmed.get(..8) {
        if compact.bytes().all(|b| b.is_ascii_digit()) {
            return parse_date(compact).map_err(|_| invalid());
        }
    }
    trimmed
        .get(..10)
        .ok_or_else(invalid)
        .and_then(|dashed| parse_date(dashed).map_err(|_| invalid()))
}

/// Format a date the way the upstream API keys its data (`YYYYMMDD`).
#[must_use]
pub fn compact_date(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}
