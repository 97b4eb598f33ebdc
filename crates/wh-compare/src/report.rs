//! Report assembly and the insight / recommendation templates.

use wh_calendar::{BusinessCalendar, CalendarError};
use wh_config::WatchConfig;
use wh_core::comparison::{CategoryPattern, ComparisonReport, ComparisonResult};
use wh_core::enums::Trend;
use wh_core::stats::{mean, ratio};
use wh_core::{BusinessDayInfo, CurrentSnapshot, HistoricalDataset};

use crate::diff::{compare_with_anchors, compare_with_previous};
use crate::patterns::{analyze_category_patterns, delayed_minutes};
use crate::summary::summarize_statuses;

/// Fewer historical dates than this triggers a "collect more history" note.
pub const DEFAULT_MIN_HISTORY_DAYS: usize = 5;

/// Builds a [`ComparisonReport`] from a snapshot and its look-back dataset.
#[derive(Debug, Clone)]
pub struct Comparator {
    calendar: BusinessCalendar,
    min_history_days: usize,
}

impl Comparator {
    #[must_use]
    pub const fn new(calendar: BusinessCalendar) -> Self {
        Self {
            calendar,
            min_history_days: DEFAULT_MIN_HISTORY_DAYS,
        }
    }

    /// # Errors
    ///
    /// Returns [`CalendarError::Config`] if the holiday table does not convert.
    pub fn from_config(config: &WatchConfig) -> Result<Self, CalendarError> {
        Ok(Self::new(BusinessCalendar::from_config(&config.calendar)?)
            .with_min_history_days(config.report.min_history_days))
    }

    #[must_use]
    pub fn with_min_history_days(mut self, min_history_days: usize) -> Self {
        self.min_history_days = min_history_days;
        self
    }

    #[must_use]
    pub const fn calendar(&self) -> &BusinessCalendar {
        &self.calendar
    }

    #[must_use]
    pub fn generate_report(
        &self,
        current: &CurrentSnapshot,
        historical: &HistoricalDataset,
    ) -> ComparisonReport {
        let business_day = self.calendar.compute_business_day_info(current.date);
        let results = compare_with_previous(current, historical);
        let anchor_results = compare_with_anchors(current, historical, &self.calendar);
        let patterns: Vec<_> = current
            .records
            .keys()
            .map(|category| analyze_category_patterns(*category, historical))
            .collect();

        let timely: usize = patterns.iter().map(|p| p.timely_days).sum();
        let business_days: usize = patterns.iter().map(|p| p.business_days).sum();
        let delays: Vec<i64> = current
            .records
            .keys()
            .flat_map(|category| delayed_minutes(*category, historical))
            .collect();

        // Results without a baseline say nothing about direction.
        let all_results: Vec<_> = results
            .iter()
            .chain(&anchor_results)
            .filter(|r| r.comparison_date.is_some())
            .collect();
        let overall_trend = if historical.is_empty() {
            Trend::InsufficientData
        } else {
            overall_trend(&all_results)
        };
        let insights = patterns.iter().flat_map(pattern_insights).collect();
        let recommendations = self.recommendations(&business_day, &all_results, historical);
        let data_availability_score = data_availability_score(current, historical);

        tracing::debug!(
            date = %current.date,
            results = results.len(),
            anchors = anchor_results.len(),
            trend = %overall_trend,
            score = data_availability_score,
            "comparison report generated"
        );

        ComparisonReport {
            analysis_date: current.date,
            business_day,
            results,
            anchor_results,
            status_summary: summarize_statuses(current),
            patterns,
            publication_rate: ratio(timely, business_days),
            average_delay_minutes: mean(&delays),
            overall_trend,
            data_availability_score,
            insights,
            recommendations,
        }
    }

    fn recommendations(
        &self,
        business_day: &BusinessDayInfo,
        results: &[&ComparisonResult],
        historical: &HistoricalDataset,
    ) -> Vec<String> {
        let mut out = Vec::new();

        if business_day.is_weekend {
            out.push("Weekend: news publication may be limited".to_string());
        } else if business_day.is_holiday {
            let name = business_day.holiday_name.as_deref().unwrap_or("public holiday");
            out.push(format!("Holiday ({name}): news may not be published"));
        }

        let total = results.len();
        let degraded = results.iter().filter(|r| r.has_degradation).count();
        let improved = results.iter().filter(|r| r.has_improvement).count();
        if total > 0 && degraded * 2 > total {
            out.push("Publication has degraded overall: check the collection system".to_string());
        }
        if total > 0 && improved * 10 > total * 7 {
            out.push("Publication has improved: keep the current setup".to_string());
        }

        if historical.len() < self.min_history_days {
            out.push(format!(
                "Only {} days of history available: collect more data",
                historical.len()
            ));
        }

        if out.is_empty() {
            out.push("Keep monitoring as usual".to_string());
        }
        out
    }
}

fn overall_trend(results: &[&ComparisonResult]) -> Trend {
    if results.is_empty() {
        return Trend::InsufficientData;
    }
    let improved = results.iter().filter(|r| r.has_improvement).count();
    let degraded = results.iter().filter(|r| r.has_degradation).count();
    match improved.cmp(&degraded) {
        std::cmp::Ordering::Greater => Trend::Improving,
        std::cmp::Ordering::Less => Trend::Degrading,
        std::cmp::Ordering::Equal => Trend::Stable,
    }
}

/// Half current presence, half historical day coverage, capped at 1.
fn data_availability_score(current: &CurrentSnapshot, historical: &HistoricalDataset) -> f64 {
    let present = current
        .records
        .values()
        .filter(|record| record.is_present())
        .count();
    let covered = historical
        .entries
        .values()
        .filter(|entry| entry.has_any_present())
        .count();

    let score = 0.5f64.mul_add(
        ratio(present, current.records.len()),
        0.5 * ratio(covered, historical.len()),
    );
    score.min(1.0)
}

/// Threshold-selected insight lines for one category.
#[must_use]
pub fn pattern_insights(pattern: &CategoryPattern) -> Vec<String> {
    let category = pattern.category;
    let rate = pattern.publication_rate;
    let percent = rate * 100.0;
    let mut out = Vec::new();

    out.push(if rate >= 0.9 {
        format!("{category}: very stable publication pattern (rate {percent:.1}%)")
    } else if rate >= 0.7 {
        format!("{category}: good publication pattern (rate {percent:.1}%)")
    } else if rate >= 0.5 {
        format!("{category}: unstable publication pattern (rate {percent:.1}%)")
    } else {
        format!("{category}: frequent publication failures (rate {percent:.1}%)")
    });

    let delay = pattern.average_delay_minutes;
    out.push(if delay > 60.0 {
        format!("{category}: severe delays (average {delay:.0} min)")
    } else if delay > 30.0 {
        format!("{category}: delays (average {delay:.0} min)")
    } else if delay > 0.0 {
        format!("{category}: minor delays (average {delay:.0} min)")
    } else {
        format!("{category}: publishing on time")
    });

    if let Some(stats) = &pattern.business_day_pattern {
        if stats.publication_rate >= 0.9 {
            out.push(format!("{category}: business-day publication very stable"));
        } else if stats.publication_rate < 0.7 {
            out.push(format!("{category}: business-day publication unstable"));
        }
    }

    if let Some(stats) = &pattern.weekend_pattern {
        out.push(if stats.publication_rate > 0.1 {
            format!("{category}: intermittent publication on non-business days")
        } else {
            format!("{category}: no publication on non-business days (normal)")
        });
    }

    out
}
