//! # wh-core
//!
//! Core types, parsing and status derivation for the WatchHamster
//! publication monitor.
//!
//! This crate provides the foundational types shared across all crates:
//! - News categories, publication statuses and comparison labels
//! - The parsing boundary for source dates and times
//! - Fixed-date holiday table and per-category publication schedule
//! - Raw and derived news records, current snapshots, historical datasets
//! - Comparison and report values exported to the notification layer
//! - Notification dedup store interface
//! - Cross-cutting error types

pub mod business_day;
pub mod comparison;
pub mod dataset;
pub mod dedup;
pub mod enums;
pub mod errors;
pub mod holidays;
pub mod parse;
pub mod records;
pub mod schedule;
pub mod stats;

pub use business_day::BusinessDayInfo;
pub use dataset::{DayEntry, HistoricalDataset};
pub use enums::NewsCategory;
pub use errors::{CoreError, DedupError};
pub use holidays::HolidayTable;
pub use records::{CurrentFeed, CurrentSnapshot, NewsRecord, RawRecord};
pub use schedule::{CategorySchedule, PublicationSchedule};
