//! Status roll-up of a current snapshot.

use wh_core::CurrentSnapshot;
use wh_core::comparison::StatusSummary;
use wh_core::enums::{OverallStatus, PublicationStatus};
use wh_core::stats::mean;

/// Count statuses and pick the overall label.
///
/// Any delay wins over freshness: one delayed category makes the snapshot
/// `has_delayed` even if every other category is on time.
#[must_use]
pub fn summarize_statuses(current: &CurrentSnapshot) -> StatusSummary {
    let count = |status: PublicationStatus| {
        current
            .records
            .values()
            .filter(|record| record.status() == status)
            .count()
    };

    let total = current.records.len();
    let on_time = count(PublicationStatus::OnTime);
    let early = count(PublicationStatus::Early);
    let delayed = count(PublicationStatus::Delayed);
    let not_published = count(PublicationStatus::NotPublished);
    let no_data = count(PublicationStatus::NoData);

    let delayed_records: Vec<_> = current
        .records
        .values()
        .filter(|record| record.status() == PublicationStatus::Delayed)
        .collect();
    let delays: Vec<i64> = delayed_records.iter().map(|r| r.delay_minutes()).collect();

    let overall = if no_data == total {
        OverallStatus::NoData
    } else if delayed > 0 {
        OverallStatus::HasDelayed
    } else if on_time + early == total {
        OverallStatus::AllFresh
    } else if on_time + early > 0 {
        OverallStatus::PartiallyFresh
    } else {
        OverallStatus::AllStale
    };

    StatusSummary {
        total,
        on_time,
        early,
        delayed,
        not_published,
        no_data,
        overall,
        max_delay_minutes: delays.iter().copied().max().unwrap_or(0),
        average_delay_minutes: mean(&delays),
        delayed_categories: delayed_records.iter().map(|r| r.category()).collect(),
    }
}
