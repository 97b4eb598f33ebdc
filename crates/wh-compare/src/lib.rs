//! # wh-compare
//!
//! Comparator and pattern analyzer for the WatchHamster publication monitor.
//!
//! Takes the current snapshot and the look-back dataset produced by
//! `wh-locator` and derives:
//! - per-category diffs against the nearest historical record and against
//!   fixed anchors (previous business day, last week, last month)
//! - publication rate and delay statistics per category
//! - a status roll-up of the snapshot
//! - a [`ComparisonReport`](wh_core::comparison::ComparisonReport) with
//!   threshold-selected insight and recommendation lines
//!
//! Everything here is synchronous and side-effect free apart from `tracing`
//! events; the dedup store passed to [`unsent_delays`] is only read.

mod diff;
mod notify;
mod patterns;
mod report;
mod summary;

pub use diff::{anchor_dates, compare_with_anchors, compare_with_previous};
pub use notify::unsent_delays;
pub use patterns::analyze_category_patterns;
pub use report::{Comparator, DEFAULT_MIN_HISTORY_DAYS, pattern_insights};
pub use summary::summarize_statuses;
