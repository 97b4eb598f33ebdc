//! Per-category publication schedule configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use wh_core::parse::parse_time;
use wh_core::{CategorySchedule, NewsCategory, PublicationSchedule};

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CategoryScheduleConfig {
    /// Expected publish time, `HHMMSS` (any 3–6 digit form is accepted).
    pub expected_time: String,

    /// Minutes either side of `expected_time` that still count as on time.
    pub tolerance_minutes: u32,
}

impl From<CategorySchedule> for CategoryScheduleConfig {
    fn from(value: CategorySchedule) -> Self {
        Self {
            expected_time: value.expected_time.format("%H%M%S").to_string(),
            tolerance_minutes: value.tolerance_minutes,
        }
    }
}

/// Built-in schedule keyed by feed key.
pub(crate) fn default_schedule() -> BTreeMap<String, CategoryScheduleConfig> {
    NewsCategory::ALL
        .into_iter()
        .map(|category| {
            (
                category.as_str().to_string(),
                CategorySchedule::default_for(category).into(),
            )
        })
        .collect()
}

/// Convert configured entries into a [`PublicationSchedule`].
///
/// Categories missing from the map keep their built-in schedule.
pub(crate) fn to_publication_schedule(
    entries: &BTreeMap<String, CategoryScheduleConfig>,
) -> Result<PublicationSchedule, ConfigError> {
    let mut schedule = PublicationSchedule::default();
    for (key, entry) in entries {
        let field = format!("schedule.{key}");
        let category: NewsCategory = key.parse().map_err(|e| ConfigError::invalid(&field, e))?;
        let expected_time = parse_time(&entry.expected_time)
            .map_err(|e| ConfigError::invalid(format!("{field}.expected_time"), e))?;
        schedule = schedule.with(
            category,
            CategorySchedule {
                expected_time,
                tolerance_minutes: entry.tolerance_minutes,
            },
        );
    }
    Ok(schedule)
}
