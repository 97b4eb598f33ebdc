//! Delay alerts that have not gone out yet.

use wh_core::dedup::{DedupKey, NotificationDedupStore};
use wh_core::enums::PublicationStatus;
use wh_core::{CurrentSnapshot, DedupError, NewsRecord};

/// Delayed records in `snapshot` whose alert key is not in `store`.
///
/// Nothing is marked; the caller marks each key once its alert is delivered.
///
/// # Errors
///
/// Propagates store failures.
pub fn unsent_delays<'a, S>(
    snapshot: &'a CurrentSnapshot,
    store: &S,
) -> Result<Vec<&'a NewsRecord>, DedupError>
where
    S: NotificationDedupStore + ?Sized,
{
    let mut pending = Vec::new();
    for record in snapshot.records.values() {
        if record.status() != PublicationStatus::Delayed {
            continue;
        }
        let key = DedupKey::delay(record.category(), snapshot.date);
        if store.has_sent(&key)? {
            tracing::debug!(key = %key, "delay alert already sent");
        } else {
            pending.push(record);
        }
    }
    Ok(pending)
}
