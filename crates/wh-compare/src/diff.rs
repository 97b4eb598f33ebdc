//! Record-level comparison against historical dates.

use chrono::{Datelike, Days, NaiveDate};
use wh_calendar::BusinessCalendar;
use wh_core::comparison::{ComparisonResult, FieldChange};
use wh_core::enums::{Baseline, ChangedField, ComparisonType, PublicationStatus};
use wh_core::{CurrentSnapshot, HistoricalDataset, NewsRecord};

/// Compare every current record with the nearest historical date carrying
/// the same category.
#[must_use]
pub fn compare_with_previous(
    current: &CurrentSnapshot,
    historical: &HistoricalDataset,
) -> Vec<ComparisonResult> {
    current
        .records
        .iter()
        .map(|(category, record)| {
            let previous = historical.latest_with(*category);
            compare_records(
                record,
                current.date,
                Baseline::MostRecent,
                previous.map(|(date, _)| date),
                previous.map(|(_, record)| record),
            )
        })
        .collect()
}

/// Compare every current record with the previous business day, the same
/// weekday last week and the same date last month, for each of those dates
/// the dataset holds.
#[must_use]
pub fn compare_with_anchors(
    current: &CurrentSnapshot,
    historical: &HistoricalDataset,
    calendar: &BusinessCalendar,
) -> Vec<ComparisonResult> {
    let mut results = Vec::new();
    for (baseline, date) in anchor_dates(current.date, calendar) {
        let Some(entry) = historical.get(date) else {
            tracing::debug!(%baseline, %date, "anchor date not in historical window");
            continue;
        };
        results.extend(current.records.iter().map(|(category, record)| {
            compare_records(record, current.date, baseline, Some(date), entry.present(*category))
        }));
    }
    results
}

/// Anchor dates for `date` in baseline order. Last month's date is left out
/// when it does not exist (Mar 31 has no Feb 31).
#[must_use]
pub fn anchor_dates(date: NaiveDate, calendar: &BusinessCalendar) -> Vec<(Baseline, NaiveDate)> {
    let (year, month) = if date.month() == 1 {
        (date.year() - 1, 12)
    } else {
        (date.year(), date.month() - 1)
    };

    [
        (
            Baseline::PreviousBusinessDay,
            calendar.compute_business_day_info(date).previous_business_day,
        ),
        (Baseline::SameDayLastWeek, date.checked_sub_days(Days::new(7))),
        (
            Baseline::SameDateLastMonth,
            NaiveDate::from_ymd_opt(year, month, date.day()),
        ),
    ]
    .into_iter()
    .filter_map(|(baseline, date)| date.map(|date| (baseline, date)))
    .collect()
}

/// On time or early > delayed > anything not published that day.
const fn freshness_rank(status: PublicationStatus) -> u8 {
    match status {
        PublicationStatus::OnTime | PublicationStatus::Early => 2,
        PublicationStatus::Delayed => 1,
        PublicationStatus::NotPublished | PublicationStatus::NoData => 0,
    }
}

fn compare_records(
    current: &NewsRecord,
    current_date: NaiveDate,
    baseline: Baseline,
    comparison_date: Option<NaiveDate>,
    previous: Option<&NewsRecord>,
) -> ComparisonResult {
    let missing = |has_improvement: bool, has_degradation: bool, summary: &str| ComparisonResult {
        category: current.category(),
        current_date,
        comparison_date,
        baseline,
        comparison_type: ComparisonType::Missing,
        has_improvement,
        has_degradation,
        change_summary: summary.to_string(),
        detailed_changes: Vec::new(),
    };

    let previous = match (current.is_present(), previous) {
        (true, Some(previous)) => previous,
        (true, None) => return missing(false, false, "no earlier record to compare"),
        (false, Some(_)) => return missing(false, true, "current record unavailable"),
        (false, None) => return missing(false, false, "no data on either side"),
    };

    let detailed_changes = field_changes(previous, current);
    let current_day = current.published_at().map(|at| at.date());
    let previous_day = previous.published_at().map(|at| at.date());

    let comparison_type = if current.status() == PublicationStatus::Delayed {
        ComparisonType::Delayed
    } else if detailed_changes.is_empty() {
        ComparisonType::Unchanged
    } else if current_day > previous_day {
        ComparisonType::New
    } else {
        ComparisonType::Changed
    };

    let since = comparison_date.map_or_else(String::new, |date| format!(" since {date}"));
    let change_summary = match comparison_type {
        ComparisonType::Delayed => {
            format!("published {} minutes late", current.delay_minutes())
        }
        ComparisonType::Unchanged => format!("no change{since}"),
        ComparisonType::New => format!("new publication{since}"),
        ComparisonType::Changed | ComparisonType::Missing => {
            let fields: Vec<_> = detailed_changes.iter().map(|c| c.field.as_str()).collect();
            format!("changed: {}", fields.join(", "))
        }
    };

    let (now, before) = (
        freshness_rank(current.status()),
        freshness_rank(previous.status()),
    );

    ComparisonResult {
        category: current.category(),
        current_date,
        comparison_date,
        baseline,
        comparison_type,
        has_improvement: now > before,
        has_degradation: now < before,
        change_summary,
        detailed_changes,
    }
}

/// Differences in title, publish date and publish time, in that order.
///
/// Date and time compare by value, so `20250812` and `2025-08-12` are equal;
/// the reported strings are the raw source values.
fn field_changes(previous: &NewsRecord, current: &NewsRecord) -> Vec<FieldChange> {
    let (before, now) = (previous.published_at(), current.published_at());
    let candidates = [
        (
            ChangedField::Title,
            previous.title() != current.title(),
            previous.title(),
            current.title(),
        ),
        (
            ChangedField::PublishDate,
            before.map(|at| at.date()) != now.map(|at| at.date()),
            previous.publish_date(),
            current.publish_date(),
        ),
        (
            ChangedField::PublishTime,
            before.map(|at| at.time()) != now.map(|at| at.time()),
            previous.publish_time(),
            current.publish_time(),
        ),
    ];

    candidates
        .into_iter()
        .filter(|(_, differs, _, _)| *differs)
        .map(|(field, _, previous, current)| FieldChange {
            field,
            previous: previous.to_string(),
            current: current.to_string(),
        })
        .collect()
}
