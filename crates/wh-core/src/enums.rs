//! Categories, weekdays, statuses and comparison labels.
//!
//! Serialization uses `snake_case` for labels and the source's kebab-case
//! key for [`NewsCategory`], so JSON produced here matches the keys the
//! upstream feed uses.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// NewsCategory
// ---------------------------------------------------------------------------

/// One of the tracked daily market news feeds.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum NewsCategory {
    NewyorkMarketWatch,
    KospiClose,
    ExchangeRate,
}

impl NewsCategory {
    /// Every tracked category, in publication order over a trading day.
    pub const ALL: [Self; 3] = [Self::NewyorkMarketWatch, Self::KospiClose, Self::ExchangeRate];

    /// Feed key as used by the upstream API.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NewyorkMarketWatch => "newyork-market-watch",
            Self::KospiClose => "kospi-close",
            Self::ExchangeRate => "exchange-rate",
        }
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::NewyorkMarketWatch => "New York Market Watch",
            Self::KospiClose => "KOSPI Close",
            Self::ExchangeRate => "Exchange Rate Close",
        }
    }
}

impl fmt::Display for NewsCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NewsCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s.trim())
            .ok_or_else(|| CoreError::UnknownCategory(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// DayOfWeek
// ---------------------------------------------------------------------------

/// Day of the week of a classified date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    #[must_use]
    pub const fn is_weekend(self) -> bool {
        matches!(self, Self::Saturday | Self::Sunday)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
            Self::Sunday => "sunday",
        }
    }
}

impl From<chrono::Weekday> for DayOfWeek {
    fn from(value: chrono::Weekday) -> Self {
        match value {
            chrono::Weekday::Mon => Self::Monday,
            chrono::Weekday::Tue => Self::Tuesday,
            chrono::Weekday::Wed => Self::Wednesday,
            chrono::Weekday::Thu => Self::Thursday,
            chrono::Weekday::Fri => Self::Friday,
            chrono::Weekday::Sat => Self::Saturday,
            chrono::Weekday::Sun => Self::Sunday,
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// PublicationStatus
// ---------------------------------------------------------------------------

/// Publication status of a record relative to the day it was observed for.
///
/// ```text
/// title blank / unparseable / future date  → no_data
/// published on an earlier day              → not_published
/// same day, |delta| ≤ tolerance            → on_time
/// same day, delta > tolerance              → delayed
/// same day, delta < -tolerance             → early
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PublicationStatus {
    OnTime,
    Early,
    Delayed,
    NotPublished,
    NoData,
}

impl PublicationStatus {
    /// Published on the observed day (regardless of punctuality).
    #[must_use]
    pub const fn is_fresh(self) -> bool {
        matches!(self, Self::OnTime | Self::Early | Self::Delayed)
    }

    /// Published on the observed day no later than the tolerance allows.
    #[must_use]
    pub const fn is_timely(self) -> bool {
        matches!(self, Self::OnTime | Self::Early)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OnTime => "on_time",
            Self::Early => "early",
            Self::Delayed => "delayed",
            Self::NotPublished => "not_published",
            Self::NoData => "no_data",
        }
    }
}

impl fmt::Display for PublicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ComparisonType
// ---------------------------------------------------------------------------

/// Outcome of comparing a current record against a historical one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonType {
    New,
    Changed,
    Unchanged,
    Delayed,
    Missing,
}

impl ComparisonType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Changed => "changed",
            Self::Unchanged => "unchanged",
            Self::Delayed => "delayed",
            Self::Missing => "missing",
        }
    }
}

impl fmt::Display for ComparisonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Baseline
// ---------------------------------------------------------------------------

/// Which historical date a comparison was made against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Baseline {
    /// Nearest date in the window carrying the category.
    MostRecent,
    PreviousBusinessDay,
    SameDayLastWeek,
    SameDateLastMonth,
}

impl Baseline {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MostRecent => "most_recent",
            Self::PreviousBusinessDay => "previous_business_day",
            Self::SameDayLastWeek => "same_day_last_week",
            Self::SameDateLastMonth => "same_date_last_month",
        }
    }
}

impl fmt::Display for Baseline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ChangedField
// ---------------------------------------------------------------------------

/// Record field reported in a [`FieldChange`](crate::comparison::FieldChange).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ChangedField {
    Title,
    PublishDate,
    PublishTime,
}

impl ChangedField {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::PublishDate => "publish_date",
            Self::PublishTime => "publish_time",
        }
    }
}

impl fmt::Display for ChangedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Trend
// ---------------------------------------------------------------------------

/// Direction of a whole comparison run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Improving,
    Degrading,
    Stable,
    InsufficientData,
}

impl Trend {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Improving => "improving",
            Self::Degrading => "degrading",
            Self::Stable => "stable",
            Self::InsufficientData => "insufficient_data",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// OverallStatus
// ---------------------------------------------------------------------------

/// Roll-up of every category's status in one snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum OverallStatus {
    AllFresh,
    PartiallyFresh,
    HasDelayed,
    NoData,
    AllStale,
}

impl OverallStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AllFresh => "all_fresh",
            Self::PartiallyFresh => "partially_fresh",
            Self::HasDelayed => "has_delayed",
            Self::NoData => "no_data",
            Self::AllStale => "all_stale",
        }
    }
}

impl fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_keys_roundtrip_through_from_str() {
        for category in NewsCategory::ALL {
            assert_eq!(category.as_str().parse::<NewsCategory>(), Ok(category));
        }
    }

    #[test]
    fn unknown_category_is_rejected() {
        assert_eq!(
            "gold-price".parse::<NewsCategory>(),
            Err(CoreError::UnknownCategory("gold-price".to_string()))
        );
    }

    #[test]
    fn category_serializes_as_feed_key() {
        let json = serde_json::to_string(&NewsCategory::NewyorkMarketWatch).unwrap();
        assert_eq!(json, "\"newyork-market-watch\"");
    }

    #[test]
    fn status_freshness() {
        assert!(PublicationStatus::Delayed.is_fresh());
        assert!(!PublicationStatus::Delayed.is_timely());
        assert!(PublicationStatus::Early.is_timely());
        assert!(!PublicationStatus::NotPublished.is_fresh());
        assert!(!PublicationStatus::NoData.is_fresh());
    }

    #[test]
    fn weekend_days() {
        assert!(DayOfWeek::from(chrono::Weekday::Sat).is_weekend());
        assert!(DayOfWeek::from(chrono::Weekday::Sun).is_weekend());
        assert!(!DayOfWeek::from(chrono::Weekday::Fri).is_weekend());
    }
}
