//! Fixed-date holiday table.
//!
//! Lunar holidays (Seollal, Chuseok, Buddha's Birthday) have no closed form
//! here: every holiday is a literal date curated per year and supplied by
//! configuration. A year that is not in the table has no holidays at all,
//! only weekends are non-business days there.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::errors::CoreError;
use crate::parse::parse_date;

/// Year → (date → holiday name).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidayTable {
    years: BTreeMap<i32, BTreeMap<NaiveDate, String>>,
}

impl HolidayTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(YYYYMMDD, name)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidDate`] for the first unparseable date.
    pub fn from_compact<'a>(
        entries: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, CoreError> {
        let mut table = Self::new();
        for (date, name) in entries {
            table.insert(parse_date(date)?, name);
        }
        Ok(table)
    }

    /// Add (or rename) a holiday.
    pub fn insert(&mut self, date: NaiveDate, name: impl Into<String>) {
        self.years
            .entry(date.year())
            .or_default()
            .insert(date, name.into());
    }

    #[must_use]
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.name_for(date).is_some()
    }

    #[must_use]
    pub fn name_for(&self, date: NaiveDate) -> Option<&str> {
        self.years
            .get(&date.year())
            .and_then(|days| days.get(&date))
            .map(String::as_str)
    }

    /// Whether the table was curated for `year` at all.
    #[must_use]
    pub fn covers_year(&self, year: i32) -> bool {
        self.years.contains_key(&year)
    }

    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.years.keys().copied()
    }

    /// Total number of holidays across all years.
    #[must_use]
    pub fn len(&self) -> usize {
        self.years.values().map(BTreeMap::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
