//! Historical records bucketed by date.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::business_day::BusinessDayInfo;
use crate::enums::NewsCategory;
use crate::records::NewsRecord;

/// Everything found for one historical date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayEntry {
    pub date: NaiveDate,
    pub business_day: BusinessDayInfo,
    pub records: BTreeMap<NewsCategory, NewsRecord>,
    /// Present fields over expected fields across all tracked categories, in `[0, 1]`.
    pub data_quality: f64,
}

impl DayEntry {
    /// The category's record for this date, if one is present.
    #[must_use]
    pub fn present(&self, category: NewsCategory) -> Option<&NewsRecord> {
        self.records.get(&category).filter(|record| record.is_present())
    }

    #[must_use]
    pub fn has_any_present(&self) -> bool {
        self.records.values().any(NewsRecord::is_present)
    }
}

/// Result of a look-back search.
///
/// Every key of `entries` is strictly before `target` and no more than
/// `window` days before it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoricalDataset {
    pub target: NaiveDate,
    pub window: u32,
    pub previous_business_day: Option<NaiveDate>,
    /// Classification of every date in the window, newest first.
    pub window_days: Vec<BusinessDayInfo>,
    pub entries: BTreeMap<NaiveDate, DayEntry>,
}

impl HistoricalDataset {
    /// A dataset with no window at all.
    #[must_use]
    pub const fn empty(target: NaiveDate) -> Self {
        Self {
            target,
            window: 0,
            previous_business_day: None,
            window_days: Vec::new(),
            entries: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of dates the source returned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn get(&self, date: NaiveDate) -> Option<&DayEntry> {
        self.entries.get(&date)
    }

    /// Entries ordered from the date nearest the target backwards.
    pub fn newest_first(&self) -> impl Iterator<Item = &DayEntry> {
        self.entries.values().rev()
    }

    /// Nearest-to-target date whose record for `category` is present.
    #[must_use]
    pub fn latest_with(&self, category: NewsCategory) -> Option<(NaiveDate, &NewsRecord)> {
        self.newest_first()
            .find_map(|entry| entry.present(category).map(|record| (entry.date, record)))
    }

    /// Business days among all dates of the window, with or without data.
    #[must_use]
    pub fn business_days_in_window(&self) -> usize {
        self.window_days
            .iter()
            .filter(|info| info.is_business_day)
            .count()
    }
}
