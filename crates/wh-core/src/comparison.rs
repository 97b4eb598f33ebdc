//! Comparison and report types handed to the notification layer.
//!
//! These are plain values: they carry no references into the dataset and can
//! be serialized to JSON (and validated against their `JsonSchema`) without
//! any of the comparator's internals.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::business_day::BusinessDayInfo;
use crate::enums::{Baseline, ChangedField, ComparisonType, NewsCategory, OverallStatus, Trend};

/// A single field-level difference, historical value first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FieldChange {
    pub field: ChangedField,
    pub previous: String,
    pub current: String,
}

/// One category's comparison against one historical date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ComparisonResult {
    pub category: NewsCategory,
    pub current_date: NaiveDate,
    /// `None` for [`ComparisonType::Missing`].
    pub comparison_date: Option<NaiveDate>,
    pub baseline: Baseline,
    pub comparison_type: ComparisonType,
    pub has_improvement: bool,
    pub has_degradation: bool,
    pub change_summary: String,
    pub detailed_changes: Vec<FieldChange>,
}

/// Publication counts over a subset of window days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PatternStats {
    pub total_days: usize,
    pub published_days: usize,
    pub publication_rate: f64,
}

/// Per-category publication behaviour over the look-back window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CategoryPattern {
    pub category: NewsCategory,
    /// Dates in the window that returned data.
    pub analysis_days: usize,
    /// Business days in the window, with or without data.
    pub business_days: usize,
    /// Business days on which the category published on time or early.
    pub timely_days: usize,
    pub publication_rate: f64,
    pub average_delay_minutes: f64,
    pub business_day_pattern: Option<PatternStats>,
    pub weekend_pattern: Option<PatternStats>,
}

/// Status roll-up of one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct StatusSummary {
    pub total: usize,
    pub on_time: usize,
    pub early: usize,
    pub delayed: usize,
    pub not_published: usize,
    pub no_data: usize,
    pub overall: OverallStatus,
    pub max_delay_minutes: i64,
    pub average_delay_minutes: f64,
    pub delayed_categories: Vec<NewsCategory>,
}

/// Output of one comparison run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ComparisonReport {
    pub analysis_date: NaiveDate,
    pub business_day: BusinessDayInfo,
    /// Against the most recent historical date per category.
    pub results: Vec<ComparisonResult>,
    /// Against previous business day / last week / last month, where available.
    pub anchor_results: Vec<ComparisonResult>,
    pub patterns: Vec<CategoryPattern>,
    pub status_summary: StatusSummary,
    pub publication_rate: f64,
    pub average_delay_minutes: f64,
    pub overall_trend: Trend,
    pub data_availability_score: f64,
    pub insights: Vec<String>,
    pub recommendations: Vec<String>,
}
