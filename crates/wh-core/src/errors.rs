//! Cross-cutting error types for WatchHamster.
//!
//! Parsing at the system edge is the only place where raw strings become
//! dates and times, so every malformed-input failure surfaces here.
//! Component-specific errors (`CalendarError`, `LocatorError`, ...) live in
//! their own crates and wrap `CoreError` via `#[from]`.

use thiserror::Error;

/// Errors that can be raised by any WatchHamster crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A date string was not `YYYYMMDD` / `YYYY-MM-DD` or named an impossible day.
    #[error("Invalid date: '{0}'")]
    InvalidDate(String),

    /// A time string did not have 3–6 digits or named an impossible time.
    #[error("Invalid time: '{0}'")]
    InvalidTime(String),

    /// A feed timestamp did not start with a recognizable date.
    #[error("Invalid timestamp: '{0}'")]
    InvalidTimestamp(String),

    /// A category key outside the tracked set.
    #[error("Unknown news category: '{0}'")]
    UnknownCategory(String),

    /// Data failed validation (format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Errors from a [`NotificationDedupStore`](crate::dedup::NotificationDedupStore) backend.
#[derive(Debug, Error)]
pub enum DedupError {
    /// Reading or writing the backing file failed.
    #[error("dedup store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file is not a JSON array of keys.
    #[error("dedup store is corrupt: {0}")]
    Json(#[from] serde_json::Error),
}
