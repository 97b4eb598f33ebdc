//! Per-category publication patterns over the look-back window.

use std::collections::BTreeSet;

use wh_core::comparison::{CategoryPattern, PatternStats};
use wh_core::enums::PublicationStatus;
use wh_core::stats::{mean, ratio};
use wh_core::{HistoricalDataset, NewsCategory};

#[derive(Debug, Default)]
struct Tally {
    total: usize,
    published: usize,
}

impl Tally {
    fn into_stats(self) -> Option<PatternStats> {
        (self.total > 0).then(|| PatternStats {
            total_days: self.total,
            published_days: self.published,
            publication_rate: ratio(self.published, self.total),
        })
    }
}

/// Publication rate and delay statistics for one category.
///
/// `publication_rate` is the share of business days in the window on which
/// the category published on time or early. Business days without any data
/// count against the rate. `weekend_pattern` covers every non-business day
/// that returned data, holidays included.
#[must_use]
pub fn analyze_category_patterns(
    category: NewsCategory,
    historical: &HistoricalDataset,
) -> CategoryPattern {
    let mut business_dates: BTreeSet<_> = historical
        .window_days
        .iter()
        .filter(|info| info.is_business_day)
        .map(|info| info.date)
        .collect();
    business_dates.extend(
        historical
            .entries
            .values()
            .filter(|entry| entry.business_day.is_business_day)
            .map(|entry| entry.date),
    );

    let mut business = Tally::default();
    let mut off_days = Tally::default();
    let mut timely_days = 0;

    for entry in historical.entries.values() {
        let is_business_day = entry.business_day.is_business_day;
        let published = entry.present(category).filter(|record| record.is_fresh());

        let tally = if is_business_day {
            &mut business
        } else {
            &mut off_days
        };
        tally.total += 1;
        if published.is_some() {
            tally.published += 1;
        }
        if is_business_day && published.is_some_and(|record| record.status().is_timely()) {
            timely_days += 1;
        }
    }

    CategoryPattern {
        category,
        analysis_days: historical.len(),
        business_days: business_dates.len(),
        timely_days,
        publication_rate: ratio(timely_days, business_dates.len()),
        average_delay_minutes: mean(&delayed_minutes(category, historical)),
        business_day_pattern: business.into_stats(),
        weekend_pattern: off_days.into_stats(),
    }
}

/// Minutes late for every date on which the category was delayed.
pub(crate) fn delayed_minutes(category: NewsCategory, historical: &HistoricalDataset) -> Vec<i64> {
    historical
        .entries
        .values()
        .filter_map(|entry| entry.present(category))
        .filter(|record| record.status() == PublicationStatus::Delayed)
        .map(wh_core::NewsRecord::delay_minutes)
        .filter(|minutes| *minutes > 0)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_dataset_has_zero_rates() {
        let target = NaiveDate::from_ymd_opt(2025, 8, 13).unwrap();
        let pattern = analyze_category_patterns(
            NewsCategory::ExchangeRate,
            &HistoricalDataset::empty(target),
        );

        assert_eq!(pattern.analysis_days, 0);
        assert_eq!(pattern.business_days, 0);
        assert!(pattern.publication_rate.abs() < f64::EPSILON);
        assert!(pattern.average_delay_minutes.abs() < f64::EPSILON);
        assert_eq!(pattern.business_day_pattern, None);
        assert_eq!(pattern.weekend_pattern, None);
    }
}
