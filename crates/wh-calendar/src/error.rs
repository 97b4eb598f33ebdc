//! Calendar error types.

use chrono::NaiveDate;
use thiserror::Error;
use wh_config::ConfigError;
use wh_core::CoreError;

#[derive(Debug, Error)]
pub enum CalendarError {
    /// Malformed date at the parsing boundary.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The calendar configuration did not convert.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// No business day within the configured walk bound.
    #[error("no business day within {days} days of {from}")]
    LookbackExhausted { from: NaiveDate, days: u32 },
}
