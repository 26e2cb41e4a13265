//! Bounded list stores
//!
//! A capacity-limited, deduplicating, most-recent-first list of records kept
//! as one JSON array under a fixed storage key. The same store backs the
//! translation history and the saved-words notebook.
//!
//! Every operation reloads the array from storage, applies the change and
//! writes it back. A stored value that fails to parse reads as an empty list
//! and is replaced by the next successful write.

use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, error, warn};

use crate::core::storage::KeyValueStore;
use crate::shared::error::StorageError;
use crate::shared::types::{ListFilter, ListRecord, TranslationRecord};

/// Storage key for the translation history
pub const HISTORY_KEY: &str = "lexigoHistory";
/// Storage key for saved words
pub const VOCABULARY_KEY: &str = "lexigoVocab";

pub const DEFAULT_HISTORY_LIMIT: usize = 25;
pub const DEFAULT_VOCABULARY_LIMIT: usize = 100;
pub const DEFAULT_PREVIEW_LIMIT: usize = 5;

pub struct BoundedList<R: ListRecord = TranslationRecord> {
    key: &'static str,
    capacity: usize,
    preview_limit: usize,
    storage: Arc<dyn KeyValueStore>,
    // Serializes read-modify-write cycles
    write_lock: Mutex<()>,
    _record: std::marker::PhantomData<fn() -> R>,
}

pub type HistoryStore = BoundedList<TranslationRecord>;
pub type VocabularyStore = BoundedList<TranslationRecord>;

impl<R: ListRecord> BoundedList<R> {
    pub fn new(key: &'static str, capacity: usize, storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            key,
            capacity: capacity.max(1),
            preview_limit: DEFAULT_PREVIEW_LIMIT,
            storage,
            write_lock: Mutex::new(()),
            _record: std::marker::PhantomData,
        }
    }

    pub fn with_preview_limit(mut self, limit: usize) -> Self {
        self.preview_limit = limit;
        self
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        match self.write_lock.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                warn!(key = self.key, "list lock poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }

    fn load(&self) -> Vec<R> {
        let raw = match self.storage.get(self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(key = self.key, error = %e, "failed to read list, treating as empty");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<R>>(&raw) {
            Ok(records) => records,
            Err(e) => {
                let e = StorageError::PersistenceCorrupt(e.to_string());
                warn!(key = self.key, error = %e, "stored list is malformed, treating as empty");
                Vec::new()
            }
        }
    }

    fn persist(&self, records: &[R]) -> bool {
        let serialized = match serde_json::to_string(records) {
            Ok(s) => s,
            Err(e) => {
                error!(key = self.key, error = %e, "failed to serialize list");
                return false;
            }
        };

        match self.storage.set(self.key, &serialized) {
            Ok(()) => true,
            Err(e) => {
                error!(key = self.key, error = %e, "failed to persist list");
                false
            }
        }
    }

    /// Add an entry at the front of the list.
    ///
    /// An existing record with the same identity is removed first, and the
    /// list is truncated to capacity. Returns the stored record, or `None` if
    /// the entry was not storable or could not be persisted.
    pub fn add(&self, entry: R::Entry) -> Option<R> {
        let record = R::build(entry)?;

        let _guard = self.lock();
        let mut records = self.load();
        records.retain(|existing| !existing.same_identity(&record));
        records.insert(0, record.clone());
        records.truncate(self.capacity);

        if !self.persist(&records) {
            return None;
        }
        debug!(key = self.key, id = record.id(), len = records.len(), "added record");
        Some(record)
    }

    /// Remove the record with `id`. Returns whether a record was removed and
    /// the change persisted.
    pub fn remove(&self, id: &str) -> bool {
        let _guard = self.lock();
        let mut records = self.load();
        let before = records.len();
        records.retain(|record| record.id() != id);

        if records.len() == before || !self.persist(&records) {
            return false;
        }
        debug!(key = self.key, id, "removed record");
        true
    }

    /// Empty the list
    pub fn clear(&self) {
        let _guard = self.lock();
        if self.persist(&[]) {
            debug!(key = self.key, "cleared list");
        }
    }

    /// Records in storage order (most recent first), filtered
    pub fn list(&self, filter: &ListFilter) -> Vec<R> {
        self.load()
            .into_iter()
            .filter(|record| filter.matches(record))
            .collect()
    }

    pub fn all(&self) -> Vec<R> {
        self.load()
    }

    /// The most recent records shown next to the translator
    pub fn preview(&self) -> Vec<R> {
        let mut records = self.load();
        records.truncate(self.preview_limit);
        records
    }

    pub fn get(&self, id: &str) -> Option<R> {
        self.load().into_iter().find(|record| record.id() == id)
    }

    pub fn len(&self) -> usize {
        self.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl BoundedList<TranslationRecord> {
    pub fn history(storage: Arc<dyn KeyValueStore>, capacity: usize) -> Self {
        Self::new(HISTORY_KEY, capacity, storage)
    }

    pub fn vocabulary(storage: Arc<dyn KeyValueStore>, capacity: usize) -> Self {
        Self::new(VOCABULARY_KEY, capacity, storage)
    }
}
