//! # wh-locator
//!
//! Historical data search for the WatchHamster publication monitor.
//!
//! Given a target date and a look-back window, [`HistoricalLocator`] issues a
//! single range query against an injected [`HistoricalSource`] and buckets
//! what comes back into a [`HistoricalDataset`]: one [`DayEntry`] per stored
//! date, each record's status derived relative to that date.
//!
//! The whole window is returned. The comparator picks the nearest usable
//! date itself, so a previous business day without data falls back to the
//! day before it.
//!
//! Missing data is never an error. Only source failures, out-of-bound
//! windows and malformed target strings are.

mod error;
mod source;

pub use error::{LocatorError, SourceError};
pub use source::{HistoricalSource, JsonFileSource, MemorySource, RawDay, RawHistory};

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use chrono::{Days, NaiveDate};
use wh_calendar::BusinessCalendar;
use wh_config::WatchConfig;
use wh_core::parse::parse_date;
use wh_core::records::{EXPECTED_FIELDS, derive_records};
use wh_core::stats::ratio;
use wh_core::{
    CoreError, DayEntry, HistoricalDataset, NewsCategory, PublicationSchedule, RawRecord,
};

/// Window used by [`HistoricalLocator::search_default_window`] unless configured.
pub const DEFAULT_WINDOW: u32 = 5;

/// Largest window accepted unless configured.
pub const DEFAULT_MAX_WINDOW: u32 = 10;

pub struct HistoricalLocator<S> {
    source: S,
    calendar: BusinessCalendar,
    schedule: PublicationSchedule,
    default_window: u32,
    max_window: u32,
}

impl<S: HistoricalSource> HistoricalLocator<S> {
    #[must_use]
    pub const fn new(source: S, calendar: BusinessCalendar, schedule: PublicationSchedule) -> Self {
        Self {
            source,
            calendar,
            schedule,
            default_window: DEFAULT_WINDOW,
            max_window: DEFAULT_MAX_WINDOW,
        }
    }

    /// Build the calendar, schedule and window bounds from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns [`LocatorError::Config`] if the window bounds are inconsistent
    /// or the schedule does not convert, and [`LocatorError::Calendar`] if the
    /// holiday table does not convert.
    pub fn from_config(source: S, config: &WatchConfig) -> Result<Self, LocatorError> {
        config.locator.validate()?;
        let calendar = BusinessCalendar::from_config(&config.calendar)?;
        let schedule = config.publication_schedule()?;
        Ok(Self::new(source, calendar, schedule)
            .with_default_window(config.locator.default_window)
            .with_max_window(config.locator.max_window))
    }

    #[must_use]
    pub fn with_max_window(mut self, max_window: u32) -> Self {
        self.max_window = max_window;
        self
    }

    #[must_use]
    pub fn with_default_window(mut self, default_window: u32) -> Self {
        self.default_window = default_window;
        self
    }

    #[must_use]
    pub const fn calendar(&self) -> &BusinessCalendar {
        &self.calendar
    }

    #[must_use]
    pub const fn schedule(&self) -> &PublicationSchedule {
        &self.schedule
    }

    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// [`search_historical_data`](Self::search_historical_data) with the
    /// configured default window.
    ///
    /// # Errors
    ///
    /// Same as [`search_historical_data`](Self::search_historical_data).
    pub async fn search_default_window(
        &self,
        target: NaiveDate,
    ) -> Result<HistoricalDataset, LocatorError> {
        self.search_historical_data(target, self.default_window).await
    }

    /// Parse `target` and search.
    ///
    /// # Errors
    ///
    /// Returns [`LocatorError::Core`] for a malformed date, otherwise the
    /// same as [`search_historical_data`](Self::search_historical_data).
    pub async fn search_historical_data_str(
        &self,
        target: &str,
        window: u32,
    ) -> Result<HistoricalDataset, LocatorError> {
        let target = parse_date(target)?;
        self.search_historical_data(target, window).await
    }

    /// Collect stored data for `target - window ..= target - 1`.
    ///
    /// Every entry of the result is strictly before `target`. Keys the source
    /// returns that are not dates, or that fall outside the window, are
    /// skipped.
    ///
    /// # Errors
    ///
    /// Returns [`LocatorError::WindowTooLarge`] when `window` exceeds the
    /// configured maximum and [`LocatorError::Source`] when the range query
    /// fails.
    pub async fn search_historical_data(
        &self,
        target: NaiveDate,
        window: u32,
    ) -> Result<HistoricalDataset, LocatorError> {
        if window == 0 {
            tracing::debug!(%target, "empty look-back window; skipping source");
            return Ok(HistoricalDataset::empty(target));
        }
        if window > self.max_window {
            return Err(LocatorError::WindowTooLarge {
                window,
                max: self.max_window,
            });
        }

        let days_back = |n: u32| {
            target
                .checked_sub_days(Days::new(u64::from(n)))
                .ok_or_else(|| {
                    CoreError::Validation(format!("{window}-day window before {target} underflows"))
                })
        };
        let start = days_back(window)?;
        let end = days_back(1)?;

        let window_days = (1..=window)
            .map(days_back)
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .map(|date| self.calendar.compute_business_day_info(date))
            .collect();

        let raw = self.source.fetch_range(start, end).await?;
        tracing::debug!(%target, window, returned = raw.len(), "historical range fetched");

        let mut entries = BTreeMap::new();
        for (key, items) in raw {
            let Ok(date) = parse_date(&key) else {
                tracing::warn!(key = %key, %target, "skipping malformed date key from source");
                continue;
            };
            if date < start || date > end {
                tracing::debug!(%date, %target, window, "dropping date outside look-back window");
                continue;
            }

            let present: usize = NewsCategory::ALL
                .iter()
                .filter_map(|category| items.get(category.as_str()))
                .map(RawRecord::present_fields)
                .sum();

            match entries.entry(date) {
                Entry::Occupied(_) => {
                    tracing::warn!(
                        key = %key,
                        %date,
                        "duplicate date key from source; keeping the first"
                    );
                }
                Entry::Vacant(slot) => {
                    slot.insert(DayEntry {
                        date,
                        business_day: self.calendar.compute_business_day_info(date),
                        records: derive_records(&items, date, &self.schedule),
                        data_quality: ratio(present, NewsCategory::ALL.len() * EXPECTED_FIELDS),
                    });
                }
            }
        }

        Ok(HistoricalDataset {
            target,
            window,
            previous_business_day: self
                .calendar
                .compute_business_day_info(target)
                .previous_business_day,
            window_days,
            entries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wh_config::ConfigError;
    use wh_core::HolidayTable;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, d).unwrap()
    }

    fn locator() -> HistoricalLocator<MemorySource> {
        HistoricalLocator::new(
            MemorySource::new(),
            BusinessCalendar::new(HolidayTable::new(), 30),
            PublicationSchedule::default(),
        )
    }

    #[tokio::test]
    async fn window_days_are_newest_first() {
        let dataset = locator().search_historical_data(day(13), 3).await.unwrap();
        let dates: Vec<_> = dataset.window_days.iter().map(|info| info.date).collect();
        assert_eq!(dates, vec![day(12), day(11), day(10)]);
        assert_eq!(dataset.previous_business_day, Some(day(12)));
        assert_eq!(dataset.business_days_in_window(), 2);
        assert!(dataset.is_empty());
    }

    #[tokio::test]
    async fn configured_bounds_apply() {
        let mut config = WatchConfig::default();
        config.locator.default_window = 2;
        config.locator.max_window = 3;
        let locator = HistoricalLocator::from_config(MemorySource::new(), &config).unwrap();

        let dataset = locator.search_default_window(day(13)).await.unwrap();
        assert_eq!(dataset.window_days.len(), 2);
        assert!(matches!(
            locator.search_historical_data(day(13), 4).await,
            Err(LocatorError::WindowTooLarge { window: 4, max: 3 })
        ));
    }

    #[test]
    fn default_window_above_max_is_rejected_up_front() {
        let mut config = WatchConfig::default();
        config.locator.default_window = 12;

        let err = HistoricalLocator::from_config(MemorySource::new(), &config).err();
        assert!(matches!(
            err,
            Some(LocatorError::Config(ConfigError::InvalidValue { .. }))
        ));
    }
}
