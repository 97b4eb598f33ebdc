//! Locator and source error types.

use thiserror::Error;
use wh_calendar::CalendarError;
use wh_config::ConfigError;
use wh_core::CoreError;

/// Failures of a [`HistoricalSource`](crate::HistoricalSource).
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Catch-all for injected sources.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Debug, Error)]
pub enum LocatorError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Calendar(#[from] CalendarError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("look-back window of {window} days exceeds the maximum of {max}")]
    WindowTooLarge { window: u32, max: u32 },

    #[error("historical source failed: {0}")]
    Source(#[from] SourceError),
}
