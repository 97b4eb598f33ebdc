//! Business-day calendar configuration.
//!
//! The holiday table is curated by hand for each year and must be extended
//! here (or in a config file) before a new year starts; years without an
//! entry have weekends as their only non-business days.

use std::collections::BTreeMap;

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use wh_core::HolidayTable;
use wh_core::parse::parse_date;

use crate::error::ConfigError;

/// Default bound for previous/next business-day walks.
const fn default_max_lookback_days() -> u32 {
    30
}

/// Korean public holidays for 2025 as listed by the monitoring scripts.
const HOLIDAYS_2025: &[(&str, &str)] = &[
    ("20250101", "New Year's Day"),
    ("20250127", "Seollal holiday"),
    ("20250128", "Seollal"),
    ("20250129", "Seollal holiday"),
    ("20250301", "Independence Movement Day"),
    ("20250505", "Children's Day"),
    ("20250506", "Children's Day (substitute)"),
    ("20250515", "Buddha's Birthday"),
    ("20250606", "Memorial Day"),
    ("20250815", "Liberation Day"),
    ("20250929", "Chuseok holiday"),
    ("20250930", "Chuseok"),
    ("20251001", "Chuseok holiday"),
    ("20251003", "National Foundation Day"),
    ("20251009", "Hangul Day"),
    ("20251225", "Christmas Day"),
];

fn default_holidays() -> BTreeMap<String, BTreeMap<String, String>> {
    let days = HOLIDAYS_2025
        .iter()
        .map(|(date, name)| ((*date).to_string(), (*name).to_string()))
        .collect();
    BTreeMap::from([("2025".to_string(), days)])
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CalendarConfig {
    /// Maximum days walked when looking for the previous or next business day.
    #[serde(default = "default_max_lookback_days")]
    pub max_lookback_days: u32,

    /// `year → { "YYYYMMDD" → holiday name }`.
    #[serde(default = "default_holidays")]
    pub holidays: BTreeMap<String, BTreeMap<String, String>>,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            max_lookback_days: default_max_lookback_days(),
            holidays: default_holidays(),
        }
    }
}

impl CalendarConfig {
    /// Convert the configured holidays into a lookup table.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a non-numeric year key, an
    /// unparseable date, or a date filed under the wrong year.
    pub fn holiday_table(&self) -> Result<HolidayTable, ConfigError> {
        let mut table = HolidayTable::new();
        for (year_key, days) in &self.holidays {
            let field = format!("calendar.holidays.{year_key}");
            let year: i32 = year_key
                .trim()
                .parse()
                .map_err(|_| ConfigError::invalid(&field, "year key must be a number"))?;

            for (raw_date, name) in days {
                let date = parse_date(raw_date).map_err(|e| ConfigError::invalid(&field, e))?;
                if date.year() != year {
                    return Err(ConfigError::invalid(
                        &field,
                        format!("{raw_date} is not in {year}"),
                    ));
                }
                table.insert(date, name.as_str());
            }
        }
        Ok(table)
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if the bound is zero or the
    /// holiday table does not convert.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_lookback_days == 0 {
            return Err(ConfigError::invalid(
                "calendar.max_lookback_days",
                "must be at least 1",
            ));
        }
        self.holiday_table().map(|_| ())
    }
}
