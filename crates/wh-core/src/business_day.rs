use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::DayOfWeek;

/// Classification of one calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct BusinessDayInfo {
    pub date: NaiveDate,
    pub day_of_week: DayOfWeek,
    pub is_weekend: bool,
    pub is_holiday: bool,
    pub holiday_name: Option<String>,
    pub is_business_day: bool,
    /// `None` when no business day exists within the look-back bound.
    pub previous_business_day: Option<NaiveDate>,
    /// `None` when no business day exists within the look-ahead bound.
    pub next_business_day: Option<NaiveDate>,
}
