//! # wh-calendar
//!
//! Business-day resolver for the WatchHamster publication monitor.
//!
//! A business day is a weekday that is not in the configured holiday table.
//! Holidays are literal dates curated per year (see
//! [`HolidayTable`](wh_core::HolidayTable)); weekday dates in years the table
//! does not cover are always business days.
//!
//! Every walk to a neighbouring business day is bounded by
//! `max_lookback_days` and reports [`CalendarError::LookbackExhausted`]
//! instead of searching further.

mod error;

pub use error::CalendarError;

use chrono::{Datelike, Days, NaiveDate};
use wh_config::CalendarConfig;
use wh_core::enums::DayOfWeek;
use wh_core::parse::parse_date;
use wh_core::{BusinessDayInfo, HolidayTable};

/// Walk bound used by [`BusinessCalendar::new`] callers that have no config.
pub const DEFAULT_MAX_LOOKBACK_DAYS: u32 = 30;

#[derive(Debug, Clone, Copy)]
enum Direction {
    Back,
    Forward,
}

/// Pure date classifier over a holiday table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessCalendar {
    holidays: HolidayTable,
    max_lookback_days: u32,
}

impl Default for BusinessCalendar {
    fn default() -> Self {
        Self::new(HolidayTable::new(), DEFAULT_MAX_LOOKBACK_DAYS)
    }
}

impl BusinessCalendar {
    /// `max_lookback_days` is raised to 1 if given as 0.
    #[must_use]
    pub fn new(holidays: HolidayTable, max_lookback_days: u32) -> Self {
        Self {
            holidays,
            max_lookback_days: max_lookback_days.max(1),
        }
    }

    /// # Errors
    ///
    /// Returns [`CalendarError::Config`] if the holiday table does not convert.
    pub fn from_config(config: &CalendarConfig) -> Result<Self, CalendarError> {
        Ok(Self::new(config.holiday_table()?, config.max_lookback_days))
    }

    #[must_use]
    pub const fn holidays(&self) -> &HolidayTable {
        &self.holidays
    }

    #[must_use]
    pub const fn max_lookback_days(&self) -> u32 {
        self.max_lookback_days
    }

    #[must_use]
    pub fn is_business_day(&self, date: NaiveDate) -> bool {
        !DayOfWeek::from(date.weekday()).is_weekend() && !self.holidays.is_holiday(date)
    }

    /// Classify `date`, including its bounded neighbouring business days.
    #[must_use]
    pub fn compute_business_day_info(&self, date: NaiveDate) -> BusinessDayInfo {
        let day_of_week = DayOfWeek::from(date.weekday());
        let is_weekend = day_of_week.is_weekend();
        let holiday_name = self.holidays.name_for(date).map(str::to_string);
        let is_holiday = holiday_name.is_some();

        BusinessDayInfo {
            date,
            day_of_week,
            is_weekend,
            is_holiday,
            holiday_name,
            is_business_day: !is_weekend && !is_holiday,
            previous_business_day: self.walk(date, Direction::Back),
            next_business_day: self.walk(date, Direction::Forward),
        }
    }

    /// Parse `input` and classify it.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::Core`] for a malformed date string.
    pub fn business_day_info_for(&self, input: &str) -> Result<BusinessDayInfo, CalendarError> {
        Ok(self.compute_business_day_info(parse_date(input)?))
    }

    /// Nearest business day strictly before `date`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::LookbackExhausted`] if none exists within
    /// `max_lookback_days`.
    pub fn find_previous_business_day(&self, date: NaiveDate) -> Result<NaiveDate, CalendarError> {
        self.walk(date, Direction::Back)
            .ok_or_else(|| self.exhausted(date))
    }

    /// Nearest business day strictly after `date`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::LookbackExhausted`] if none exists within
    /// `max_lookback_days`.
    pub fn find_next_business_day(&self, date: NaiveDate) -> Result<NaiveDate, CalendarError> {
        self.walk(date, Direction::Forward)
            .ok_or_else(|| self.exhausted(date))
    }

    /// Business days in `start..=end`; zero when `start > end`.
    #[must_use]
    pub fn business_days_between(&self, start: NaiveDate, end: NaiveDate) -> usize {
        start
            .iter_days()
            .take_while(|day| *day <= end)
            .filter(|day| self.is_business_day(*day))
            .count()
    }

    fn walk(&self, from: NaiveDate, direction: Direction) -> Option<NaiveDate> {
        (1..=self.max_lookback_days)
            .map_while(|offset| {
                let step = Days::new(u64::from(offset));
                match direction {
                    Direction::Back => from.checked_sub_days(step),
                    Direction::Forward => from.checked_add_days(step),
                }
            })
            .find(|candidate| self.is_business_day(*candidate))
    }

    fn exhausted(&self, from: NaiveDate) -> CalendarError {
        tracing::warn!(
            %from,
            days = self.max_lookback_days,
            "business-day walk exhausted; check the holiday table"
        );
        CalendarError::LookbackExhausted {
            from,
            days: self.max_lookback_days,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn calendar() -> BusinessCalendar {
        BusinessCalendar::from_config(&CalendarConfig::default()).unwrap()
    }

    #[test]
    fn wednesday_info() {
        let info = calendar().compute_business_day_info(ymd(2025, 8, 13));
        assert_eq!(
            info,
            BusinessDayInfo {
                date: ymd(2025, 8, 13),
                day_of_week: DayOfWeek::Wednesday,
                is_weekend: false,
                is_holiday: false,
                holiday_name: None,
                is_business_day: true,
                previous_business_day: Some(ymd(2025, 8, 12)),
                next_business_day: Some(ymd(2025, 8, 14)),
            }
        );
    }

    #[test]
    fn liberation_day_friday_pushes_next_to_monday() {
        let cal = calendar();
        // Thu 2025-08-14 → Fri 08-15 is a holiday → Mon 08-18.
        assert_eq!(cal.find_next_business_day(ymd(2025, 8, 14)).unwrap(), ymd(2025, 8, 18));
        assert_eq!(cal.find_previous_business_day(ymd(2025, 8, 18)).unwrap(), ymd(2025, 8, 14));
    }

    #[test]
    fn malformed_string_is_an_error() {
        let err = calendar().business_day_info_for("2025-02-30").unwrap_err();
        assert!(matches!(err, CalendarError::Core(_)));
    }

    #[test]
    fn exhausted_walk_reports_bound() {
        let mut holidays = HolidayTable::new();
        holidays.insert(ymd(2025, 8, 8), "long weekend");
        let cal = BusinessCalendar::new(holidays, 3);

        // Mon 08-11 → Sun, Sat, Fri(holiday) within 3 days.
        let err = cal.find_previous_business_day(ymd(2025, 8, 11)).unwrap_err();
        assert!(matches!(
            err,
            CalendarError::LookbackExhausted { days: 3, .. }
        ));
        assert_eq!(cal.compute_business_day_info(ymd(2025, 8, 11)).previous_business_day, None);
    }

    #[test]
    fn zero_bound_is_raised_to_one() {
        let cal = BusinessCalendar::new(HolidayTable::new(), 0);
        assert_eq!(cal.max_lookback_days(), 1);
        assert_eq!(cal.find_previous_business_day(ymd(2025, 8, 13)).unwrap(), ymd(2025, 8, 12));
    }

    #[test]
    fn counts_business_days_inclusive() {
        let cal = calendar();
        // 08-11 Mon .. 08-17 Sun, with Fri 08-15 a holiday.
        assert_eq!(cal.business_days_between(ymd(2025, 8, 11), ymd(2025, 8, 17)), 4);
        assert_eq!(cal.business_days_between(ymd(2025, 8, 17), ymd(2025, 8, 11)), 0);
    }
}
