//! Raw source records and the derived [`NewsRecord`].

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

use crate::enums::{NewsCategory, PublicationStatus};
use crate::errors::CoreError;
use crate::parse::{parse_date, parse_time, parse_timestamp_date};
use crate::schedule::{CategorySchedule, PublicationSchedule};

/// Fields a record must carry to count as complete.
pub const EXPECTED_FIELDS: usize = 3;

/// One category's latest item as delivered by the upstream API.
///
/// `date` and `time` arrive as strings for some categories and as bare
/// numbers for others; both are accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub date: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub time: String,
}

impl RawRecord {
    /// Number of fields (title, date, time) that are present and parseable.
    #[must_use]
    pub fn present_fields(&self) -> usize {
        usize::from(!self.title.trim().is_empty())
            + usize::from(parse_date(&self.date).is_ok())
            + usize::from(parse_time(&self.time).is_ok())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Str(String),
    Int(i64),
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        match Option::<StringOrNumber>::deserialize(deserializer)? {
            Some(StringOrNumber::Str(s)) => s,
            Some(StringOrNumber::Int(n)) => n.to_string(),
            None => String::new(),
        },
    )
}

/// A category observation with its status derived from the publish fields.
///
/// There is no way to set `status` or `delay_minutes` directly: both are
/// computed in [`NewsRecord::derive`] from `publish_date`/`publish_time`,
/// the day the observation belongs to and the category schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewsRecord {
    category: NewsCategory,
    title: String,
    publish_date: String,
    publish_time: String,
    published_at: Option<NaiveDateTime>,
    reference_date: NaiveDate,
    status: PublicationStatus,
    delay_minutes: i64,
}

impl NewsRecord {
    #[must_use]
    pub fn derive(
        category: NewsCategory,
        raw: &RawRecord,
        reference_date: NaiveDate,
        schedule: &CategorySchedule,
    ) -> Self {
        let title = raw.title.trim().to_string();
        let published_at = parse_date(&raw.date)
            .ok()
            .zip(parse_time(&raw.time).ok())
            .map(|(date, time)| date.and_time(time));

        let (status, delay_minutes) = match published_at {
            _ if title.is_empty() => (PublicationStatus::NoData, 0),
            None => (PublicationStatus::NoData, 0),
            Some(at) => {
                if at.date() > reference_date {
                    tracing::warn!(
                        category = %category,
                        %reference_date,
                        published_at = %at,
                        "record is dated after the day it was observed for"
                    );
                }
                schedule.classify(at, reference_date)
            }
        };

        Self {
            category,
            title,
            publish_date: raw.date.trim().to_string(),
            publish_time: raw.time.trim().to_string(),
            published_at,
            reference_date,
            status,
            delay_minutes,
        }
    }

    #[must_use]
    pub const fn category(&self) -> NewsCategory {
        self.category
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Publish date exactly as the source sent it.
    #[must_use]
    pub fn publish_date(&self) -> &str {
        &self.publish_date
    }

    /// Publish time exactly as the source sent it.
    #[must_use]
    pub fn publish_time(&self) -> &str {
        &self.publish_time
    }

    #[must_use]
    pub const fn published_at(&self) -> Option<NaiveDateTime> {
        self.published_at
    }

    #[must_use]
    pub const fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    #[must_use]
    pub const fn status(&self) -> PublicationStatus {
        self.status
    }

    /// Minutes past the expected time; zero unless the status is delayed.
    #[must_use]
    pub const fn delay_minutes(&self) -> i64 {
        self.delay_minutes
    }

    #[must_use]
    pub fn is_present(&self) -> bool {
        self.status != PublicationStatus::NoData
    }

    #[must_use]
    pub const fn is_fresh(&self) -> bool {
        self.status.is_fresh()
    }
}

/// Derive records for every known category in a raw per-category map.
///
/// Keys outside [`NewsCategory::ALL`] are skipped.
#[must_use]
pub fn derive_records(
    raw: &BTreeMap<String, RawRecord>,
    reference_date: NaiveDate,
    schedule: &PublicationSchedule,
) -> BTreeMap<NewsCategory, NewsRecord> {
    raw.iter()
        .filter_map(|(key, record)| match key.parse::<NewsCategory>() {
            Ok(category) => Some((
                category,
                NewsRecord::derive(category, record, reference_date, &schedule.get(category)),
            )),
            Err(_) => {
                tracing::debug!(key = %key, "skipping unknown news category");
                None
            }
        })
        .collect()
}

/// The live feed as handed over by the polling layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentFeed {
    /// Date-prefixed timestamp of the poll (`YYYYMMDD...` or `YYYY-MM-DD...`).
    pub timestamp: String,
    #[serde(default)]
    pub news_items: BTreeMap<String, RawRecord>,
}

/// Current records, each derived relative to the feed's own date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentSnapshot {
    pub date: NaiveDate,
    pub records: BTreeMap<NewsCategory, NewsRecord>,
}

impl CurrentSnapshot {
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTimestamp`] when the feed timestamp has
    /// no recognizable date prefix.
    pub fn from_feed(feed: &CurrentFeed, schedule: &PublicationSchedule) -> Result<Self, CoreError> {
        let date = parse_timestamp_date(&feed.timestamp)?;
        Ok(Self {
            date,
            records: derive_records(&feed.news_items, date, schedule),
        })
    }

    #[must_use]
    pub fn get(&self, category: NewsCategory) -> Option<&NewsRecord> {
        self.records.get(&category)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

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

    fn kospi(raw: &RawRecord, reference: NaiveDate) -> NewsRecord {
        NewsRecord::derive(
            NewsCategory::KospiClose,
            raw,
            reference,
            &CategorySchedule::default_for(NewsCategory::KospiClose),
        )
    }

    #[test]
    fn blank_title_is_no_data() {
        let record = kospi(&raw("  ", "20250813", "154000"), day(13));
        assert_eq!(record.status(), PublicationStatus::NoData);
        assert!(!record.is_present());
    }

    #[test]
    fn unparseable_time_is_no_data() {
        let record = kospi(&raw("[KOSPI] close", "20250813", "15"), day(13));
        assert_eq!(record.status(), PublicationStatus::NoData);
        assert_eq!(record.published_at(), None);
    }

    #[test]
    fn delayed_publication_carries_minutes() {
        let record = kospi(&raw("[KOSPI] close", "20250813", "1625"), day(13));
        assert_eq!(record.status(), PublicationStatus::Delayed);
        assert_eq!(record.delay_minutes(), 45);
        assert!(record.is_fresh());
    }

    #[test]
    fn earlier_day_is_not_published() {
        let record = kospi(&raw("[KOSPI] close", "20250812", "154000"), day(13));
        assert_eq!(record.status(), PublicationStatus::NotPublished);
        assert!(record.is_present());
        assert!(!record.is_fresh());
    }

    #[test]
    fn numeric_fields_deserialize() {
        let record: RawRecord =
            serde_json::from_str(r#"{"title":"NY","date":20250813,"time":60500}"#).unwrap();
        assert_eq!(record, raw("NY", "20250813", "60500"));
        assert_eq!(record.present_fields(), 3);
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let record: RawRecord = serde_json::from_str(r#"{"title":"only title","time":null}"#).unwrap();
        assert_eq!(record.present_fields(), 1);
    }

    #[test]
    fn snapshot_uses_timestamp_date_and_skips_unknown_keys() {
        let feed = CurrentFeed {
            timestamp: "2025-08-13T17:00:00".to_string(),
            news_items: BTreeMap::from([
                ("exchange-rate".to_string(), raw("[FX] close", "20250813", "163200")),
                ("gold-price".to_string(), raw("gold", "20250813", "100000")),
            ]),
        };

        let snapshot = CurrentSnapshot::from_feed(&feed, &PublicationSchedule::default()).unwrap();

        assert_eq!(snapshot.date, day(13));
        assert_eq!(snapshot.records.len(), 1);
        assert_eq!(
            snapshot.get(NewsCategory::ExchangeRate).map(NewsRecord::status),
            Some(PublicationStatus::OnTime)
        );
    }

    #[test]
    fn snapshot_rejects_bad_timestamp() {
        let feed = CurrentFeed {
            timestamp: "now".to_string(),
            news_items: BTreeMap::new(),
        };
        assert_eq!(
            CurrentSnapshot::from_feed(&feed, &PublicationSchedule::default()),
            Err(CoreError::InvalidTimestamp("now".to_string()))
        );
    }
}
