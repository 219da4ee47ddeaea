use std::fmt::Write;
use std::sync::Arc;

use chrono::{DateTime, Local, Utc};
use lugat_types::{CardPreview, FlashcardRecord};
use uuid::Uuid;

use crate::{KeyValueStore, RECORDS_SLOT, Result};

const FALLBACK_DATE_FORMAT: &str = "%Y-%m-%d";

/// Ordered card list, newest first, written back whole on every change
pub struct RecordStore {
    store: Arc<dyn KeyValueStore>,
    records: Vec<FlashcardRecord>,
    date_format: String,
}

impl RecordStore {
    /// Load the list from the store.
    ///
    /// A missing, unreadable or malformed slot gives an empty list.
    pub fn load(store: Arc<dyn KeyValueStore>, date_format: impl Into<String>) -> Self {
        let records = match store.get(RECORDS_SLOT) {
            Ok(Some(data)) => match serde_json::from_str::<Vec<FlashcardRecord>>(&data) {
                Ok(records) => records,
                Err(e) => {
                    tracing::warn!("Failed to parse saved cards, starting empty: {e}");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read saved cards, starting empty: {e}");
                Vec::new()
            }
        };

        tracing::debug!("Loaded {} cards", records.len());

        Self {
            store,
            records,
            date_format: date_format.into(),
        }
    }

    /// Create a card from a confirmed preview and prepend it.
    ///
    /// The card stays in memory even when the write fails.
    pub fn add(&mut self, preview: CardPreview, now: DateTime<Utc>) -> Result<FlashcardRecord> {
        let group = display_group(now, &self.date_format);
        let record = FlashcardRecord::from_preview(preview, now, group);

        self.records.insert(0, record.clone());
        tracing::info!("Added card {} ({})", record.id, record.term);

        self.persist()?;
        Ok(record)
    }

    /// Returns whether a card with this id existed
    pub fn remove(&mut self, id: Uuid) -> Result<bool> {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);

        if self.records.len() == before {
            return Ok(false);
        }

        tracing::info!("Removed card {id}");
        self.persist()?;
        Ok(true)
    }

    pub fn get(&self, id: Uuid) -> Option<&FlashcardRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn list(&self) -> &[FlashcardRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn persist(&self) -> Result<()> {
        let data = serde_json::to_string(&self.records)?;
        self.store.set(RECORDS_SLOT, &data)
    }
}

/// Local calendar date of `now`, falling back to ISO dates on a bad format string
fn display_group(now: DateTime<Utc>, date_format: &str) -> String {
    let local = now.with_timezone(&Local);
    let mut group = String::new();
    if write!(group, "{}", local.format(date_format)).is_err() {
        tracing::warn!("Invalid date format {date_format:?}, using {FALLBACK_DATE_FORMAT}");
        group = local.format(FALLBACK_DATE_FORMAT).to_string();
    }
    group
}
