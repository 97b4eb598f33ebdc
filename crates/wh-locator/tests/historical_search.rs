//! Look-back search over memory, file-backed and failing sources.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use wh_calendar::BusinessCalendar;
use wh_config::CalendarConfig;
use wh_core::enums::PublicationStatus;
use wh_core::{NewsCategory, PublicationSchedule, RawRecord};
use wh_locator::{
    HistoricalLocator, HistoricalSource, JsonFileSource, LocatorError, MemorySource, RawDay,
    RawHistory, SourceError,
};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 8, d).unwrap()
}

fn raw(title: &str, date: &str, time: &str) -> RawRecord {
    RawRecord {
        title: title.to_string(),
        content: String::new(),
        date: date.to_string(),
        time: time.to_string(),
    }
}

fn calendar() -> BusinessCalendar {
    BusinessCalendar::from_config(&CalendarConfig::default()).unwrap()
}

fn locator<S: HistoricalSource>(source: S) -> HistoricalLocator<S> {
    HistoricalLocator::new(source, calendar(), PublicationSchedule::default())
}

/// Counts queries and answers every one with the same fixed history.
struct FixedSource {
    history: RawHistory,
    calls: AtomicUsize,
}

impl FixedSource {
    fn new(history: RawHistory) -> Self {
        Self {
            history,
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl HistoricalSource for FixedSource {
    fn fetch_range(
        &self,
        _start: NaiveDate,
        _end: NaiveDate,
    ) -> impl Future<Output = Result<RawHistory, SourceError>> + Send {
        self.calls.fetch_add(1, Ordering::SeqCst);
        std::future::ready(Ok(self.history.clone()))
    }
}

struct FailingSource;

impl HistoricalSource for FailingSource {
    fn fetch_range(
        &self,
        _start: NaiveDate,
        _end: NaiveDate,
    ) -> impl Future<Output = Result<RawHistory, SourceError>> + Send {
        std::future::ready(Err(SourceError::Other(anyhow::anyhow!("upstream unavailable"))))
    }
}

#[tokio::test]
async fn zero_window_is_empty_and_skips_the_source() {
    let source = FixedSource::new(RawHistory::new());
    let locator = locator(source);

    let dataset = locator.search_historical_data(day(13), 0).await.unwrap();

    assert!(dataset.is_empty());
    assert!(dataset.window_days.is_empty());
    assert_eq!(locator.source().calls(), 0);
}

#[tokio::test]
async fn empty_previous_business_day_still_yields_the_day_before() {
    let source = MemorySource::new()
        .with(day(11), "kospi-close", raw("[KOSPI] close", "20250811", "154000"))
        .with(day(8), "kospi-close", raw("[KOSPI] close", "20250808", "155500"));
    let locator = locator(source);

    let dataset = locator.search_historical_data(day(13), 5).await.unwrap();

    assert_eq!(dataset.previous_business_day, Some(day(12)));
    assert_eq!(dataset.get(day(12)), None);
    assert_eq!(dataset.entries.keys().copied().collect::<Vec<_>>(), vec![day(8), day(11)]);

    let (date, record) = dataset.latest_with(NewsCategory::KospiClose).unwrap();
    assert_eq!(date, day(11));
    assert_eq!(record.status(), PublicationStatus::OnTime);

    // 2025-08-08 was 15 minutes past the 15:40 target with a 10-minute tolerance.
    let friday = dataset.get(day(8)).unwrap();
    assert_eq!(friday.present(NewsCategory::KospiClose).unwrap().delay_minutes(), 15);
}

#[tokio::test]
async fn never_returns_target_or_later_dates() {
    let history = RawHistory::from([
        ("20250813".to_string(), RawDay::new()),
        ("20250820".to_string(), RawDay::new()),
        ("20250801".to_string(), RawDay::new()),
        ("20250810".to_string(), RawDay::new()),
    ]);
    let locator = locator(FixedSource::new(history));

    let dataset = locator.search_historical_data(day(13), 5).await.unwrap();

    assert_eq!(dataset.entries.keys().copied().collect::<Vec<_>>(), vec![day(10)]);
    assert!(dataset.entries.keys().all(|date| *date < day(13)));
    assert_eq!(locator.source().calls(), 1);
}

#[tokio::test]
async fn malformed_keys_are_skipped() {
    let history = RawHistory::from([
        ("not-a-date".to_string(), RawDay::new()),
        ("20250231".to_string(), RawDay::new()),
        ("2025-08-12".to_string(), RawDay::new()),
    ]);
    let locator = locator(FixedSource::new(history));

    let dataset = locator.search_historical_data(day(13), 5).await.unwrap();

    assert_eq!(dataset.len(), 1);
    assert!(dataset.get(day(12)).is_some());
}

#[tokio::test]
async fn data_quality_counts_present_fields() {
    let source = MemorySource::new()
        .with(day(12), "exchange-rate", raw("[FX] close", "20250812", "163000"))
        .with(day(12), "kospi-close", raw("", "20250812", "bad"))
        .with(day(12), "gold-price", raw("gold", "20250812", "100000"));
    let locator = locator(source);

    let dataset = locator.search_historical_data(day(13), 1).await.unwrap();
    let entry = dataset.get(day(12)).unwrap();

    // 3 fields for exchange-rate, 1 for kospi-close, unknown keys ignored.
    assert!((entry.data_quality - 4.0 / 9.0).abs() < f64::EPSILON);
    assert_eq!(entry.records.len(), 2);
    assert!(entry.present(NewsCategory::KospiClose).is_none());
    assert!(entry.has_any_present());
}

#[tokio::test]
async fn too_large_window_is_rejected() {
    let locator = locator(MemorySource::new());
    let err = locator.search_historical_data(day(13), 11).await.unwrap_err();
    assert!(matches!(err, LocatorError::WindowTooLarge { window: 11, max: 10 }));
}

#[tokio::test]
async fn source_failure_propagates() {
    let locator = locator(FailingSource);
    let err = locator.search_historical_data(day(13), 5).await.unwrap_err();
    assert!(matches!(err, LocatorError::Source(SourceError::Other(_))));
}

#[tokio::test]
async fn string_target_is_parsed_at_the_edge() {
    let locator = locator(MemorySource::new());

    let dataset = locator.search_historical_data_str("2025-08-13", 2).await.unwrap();
    assert_eq!(dataset.target, day(13));

    let err = locator.search_historical_data_str("13/08/2025", 2).await.unwrap_err();
    assert!(matches!(err, LocatorError::Core(_)));
}

#[tokio::test]
async fn json_file_source_reads_numeric_fields_and_filters_range() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.json");
    std::fs::write(
        &path,
        r#"{
            "20250801": { "kospi-close": { "title": "[KOSPI] close", "date": "20250801", "time": "154000" } },
            "20250812": {
                "exchange-rate": { "title": "[FX] close", "date": 20250812, "time": 163500 },
                "newyork-market-watch": { "title": "NY", "date": "20250812", "time": "61000" }
            }
        }"#,
    )
    .unwrap();

    let source = JsonFileSource::new(&path);
    let history = source.fetch_range(day(8), day(12)).await.unwrap();
    assert_eq!(history.keys().collect::<Vec<_>>(), vec!["20250812"]);

    let dataset = locator(source).search_historical_data(day(13), 5).await.unwrap();
    let entry = dataset.get(day(12)).unwrap();
    assert_eq!(
        entry.present(NewsCategory::ExchangeRate).map(|r| r.status()),
        Some(PublicationStatus::OnTime)
    );
    assert_eq!(
        entry.present(NewsCategory::NewyorkMarketWatch).map(|r| r.status()),
        Some(PublicationStatus::OnTime)
    );
    assert!((entry.data_quality - 6.0 / 9.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn missing_file_is_empty_history() {
    let dir = tempfile::tempdir().unwrap();
    let source = JsonFileSource::new(dir.path().join("absent.json"));

    let dataset = locator(source).search_historical_data(day(13), 5).await.unwrap();
    assert!(dataset.is_empty());
    assert_eq!(dataset.window_days.len(), 5);
}

#[tokio::test]
async fn corrupt_file_is_a_source_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = locator(JsonFileSource::new(path))
        .search_historical_data(day(13), 5)
        .await
        .unwrap_err();
    assert!(matches!(err, LocatorError::Source(SourceError::Json(_))));
}
