//! Historical data sources.
//!
//! A source answers one range query with the raw per-category items it has
//! for each date, keyed by the date string exactly as stored. Keys that are
//! not dates are handed through untouched; the locator decides what to keep.

use std::collections::BTreeMap;
use std::future::Future;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use wh_core::RawRecord;
use wh_core::parse::{compact_date, parse_date};

use crate::error::SourceError;

/// Feed key → raw item for one date.
pub type RawDay = BTreeMap<String, RawRecord>;

/// Date key → raw items for that date.
pub type RawHistory = BTreeMap<String, RawDay>;

/// Range query over stored historical feeds.
pub trait HistoricalSource {
    /// Everything stored for `start..=end`.
    fn fetch_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> impl Future<Output = Result<RawHistory, SourceError>> + Send;
}

/// Keep dates inside `start..=end` and every key that is not a date.
fn retain_range(mut history: RawHistory, start: NaiveDate, end: NaiveDate) -> RawHistory {
    history.retain(|key, _| parse_date(key).map_or(true, |date| (start..=end).contains(&date)));
    history
}

/// In-memory history.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    days: RawHistory,
}

impl MemorySource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an already-shaped history, including any malformed keys.
    #[must_use]
    pub const fn from_history(days: RawHistory) -> Self {
        Self { days }
    }

    /// Store `record` under `category_key` for `date`.
    pub fn insert(&mut self, date: NaiveDate, category_key: impl Into<String>, record: RawRecord) {
        self.days
            .entry(compact_date(date))
            .or_default()
            .insert(category_key.into(), record);
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, date: NaiveDate, category_key: impl Into<String>, record: RawRecord) -> Self {
        self.insert(date, category_key, record);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

impl HistoricalSource for MemorySource {
    fn fetch_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> impl Future<Output = Result<RawHistory, SourceError>> + Send {
        std::future::ready(Ok(retain_range(self.days.clone(), start, end)))
    }
}

/// History stored as one JSON document on disk:
///
/// ```json
/// { "20250812": { "kospi-close": { "title": "...", "date": "20250812", "time": "154000" } } }
/// ```
///
/// A missing file is an empty history.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistoricalSource for JsonFileSource {
    fn fetch_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> impl Future<Output = Result<RawHistory, SourceError>> + Send {
        async move {
            let bytes = match tokio::fs::read(&self.path).await {
                Ok(bytes) => bytes,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    tracing::debug!(path = %self.path.display(), "no history file yet");
                    return Ok(RawHistory::new());
                }
                Err(e) => return Err(e.into()),
            };
            let history: RawHistory = serde_json::from_slice(&bytes)?;
            Ok(retain_range(history, start, end))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, d).unwrap()
    }

    #[test]
    fn retain_range_keeps_malformed_keys() {
        let history = RawHistory::from([
            ("20250801".to_string(), RawDay::new()),
            ("2025-08-10".to_string(), RawDay::new()),
            ("20250812".to_string(), RawDay::new()),
            ("garbage".to_string(), RawDay::new()),
        ]);

        let kept: Vec<_> = retain_range(history, day(8), day(12)).into_keys().collect();
        assert_eq!(kept, vec!["2025-08-10", "20250812", "garbage"]);
    }

    #[tokio::test]
    async fn memory_source_filters_by_range() {
        let source = MemorySource::new()
            .with(day(7), "kospi-close", RawRecord::default())
            .with(day(12), "kospi-close", RawRecord::default());

        let history = source.fetch_range(day(8), day(12)).await.unwrap();
        assert_eq!(history.into_keys().collect::<Vec<_>>(), vec!["20250812"]);
    }
}
