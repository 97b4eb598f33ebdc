//! Expected publication times per category.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::enums::{NewsCategory, PublicationStatus};

/// When a category is expected to publish and how much slack it gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategorySchedule {
    pub expected_time: NaiveTime,
    pub tolerance_minutes: u32,
}

impl CategorySchedule {
    #[must_use]
    pub fn default_for(category: NewsCategory) -> Self {
        let (hour, minute, tolerance_minutes) = match category {
            NewsCategory::NewyorkMarketWatch => (6, 0, 15),
            NewsCategory::KospiClose => (15, 40, 10),
            NewsCategory::ExchangeRate => (16, 30, 5),
        };
        Self {
            expected_time: NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN),
            tolerance_minutes,
        }
    }

    /// Classify a publication timestamp observed for `reference`.
    ///
    /// Returns the status and, for delayed publications only, the number of
    /// whole minutes past the expected time. The tolerance check uses the
    /// full second offset; only the reported delay truncates to minutes, so
    /// 10m59s late with a 10 minute tolerance is delayed by 10.
    #[must_use]
    pub fn classify(
        &self,
        published_at: NaiveDateTime,
        reference: NaiveDate,
    ) -> (PublicationStatus, i64) {
        let published_on = published_at.date();
        if published_on < reference {
            return (PublicationStatus::NotPublished, 0);
        }
        if published_on > reference {
            return (PublicationStatus::NoData, 0);
        }

        let expected_at = reference.and_time(self.expected_time);
        let delta_secs = (published_at - expected_at).num_seconds();
        let tolerance_secs = i64::from(self.tolerance_minutes) * 60;

        if delta_secs.abs() <= tolerance_secs {
            (PublicationStatus::OnTime, 0)
        } else if delta_secs > tolerance_secs {
            (PublicationStatus::Delayed, delta_secs / 60)
        } else {
            (PublicationStatus::Early, 0)
        }
    }
}

/// Schedule for every tracked category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicationSchedule {
    categories: BTreeMap<NewsCategory, CategorySchedule>,
}

impl Default for PublicationSchedule {
    fn default() -> Self {
        Self {
            categories: NewsCategory::ALL
                .into_iter()
                .map(|category| (category, CategorySchedule::default_for(category)))
                .collect(),
        }
    }
}

impl PublicationSchedule {
    /// Override one category's schedule.
    #[must_use]
    pub fn with(mut self, category: NewsCategory, schedule: CategorySchedule) -> Self {
        self.categories.insert(category, schedule);
        self
    }

    #[must_use]
    pub fn get(&self, category: NewsCategory) -> CategorySchedule {
        self.categories
            .get(&category)
            .copied()
            .unwrap_or_else(|| CategorySchedule::default_for(category))
    }
}
