//! Remembering which notifications already went out.
//!
//! The polling layer owns a store instance and threads it through each
//! cycle; there is no process-wide "sent" set.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::enums::NewsCategory;
use crate::errors::DedupError;
use crate::parse::compact_date;

/// Capability to check and record sent notifications by key.
pub trait NotificationDedupStore {
    /// # Errors
    ///
    /// Backend failures only; an unknown key is `Ok(false)`.
    fn has_sent(&self, key: &str) -> Result<bool, DedupError>;

    /// # Errors
    ///
    /// Backend failures only; marking a key twice is a no-op.
    fn mark_sent(&mut self, key: &str) -> Result<(), DedupError>;
}

/// Key builders for the notifications the monitor emits.
pub struct DedupKey;

impl DedupKey {
    /// Key for a delayed-publication alert (`delay:kospi-close:20250813`).
    #[must_use]
    pub fn delay(category: NewsCategory, date: NaiveDate) -> String {
        format!("delay:{category}:{}", compact_date(date))
    }

    /// Key for a "published" notice (`published:kospi-close:20250813`).
    #[must_use]
    pub fn published(category: NewsCategory, date: NaiveDate) -> String {
        format!("published:{category}:{}", compact_date(date))
    }
}

/// In-process store; forgets everything on drop.
#[derive(Debug, Default, Clone)]
pub struct MemoryDedupStore {
    sent: BTreeSet<String>,
}

impl MemoryDedupStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sent.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sent.is_empty()
    }
}

impl NotificationDedupStore for MemoryDedupStore {
    fn has_sent(&self, key: &str) -> Result<bool, DedupError> {
        Ok(self.sent.contains(key))
    }

    fn mark_sent(&mut self, key: &str) -> Result<(), DedupError> {
        self.sent.insert(key.to_string());
        Ok(())
    }
}

/// Store persisted as a JSON array of keys, rewritten on every new key.
#[derive(Debug, Clone)]
pub struct JsonFileDedupStore {
    path: PathBuf,
    sent: BTreeSet<String>,
}

impl JsonFileDedupStore {
    /// Open the store at `path`, starting empty if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`DedupError::Io`] if the file exists but cannot be read and
    /// [`DedupError::Json`] if it is not a JSON array of strings.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, DedupError> {
        let path = path.into();
        let sent = if path.exists() {
            serde_json::from_str(&fs::read_to_string(&path)?)?
        } else {
            BTreeSet::new()
        };
        Ok(Self { path, sent })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, sent: &BTreeSet<String>) -> Result<(), DedupError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_string_pretty(sent)?)?;
        Ok(())
    }
}

impl NotificationDedupStore for JsonFileDedupStore {
    fn has_sent(&self, key: &str) -> Result<bool, DedupError> {
        Ok(self.sent.contains(key))
    }

    fn mark_sent(&mut self, key: &str) -> Result<(), DedupError> {
        if self.sent.contains(key) {
            return Ok(());
        }
        // The key only counts as sent once it is on disk.
        let mut next = self.sent.clone();
        next.insert(key.to_string());
        self.persist(&next)?;
        self.sent = next;
        Ok(())
    }
}
