//! String-keyed persistence layer
//!
//! Each list is stored as one serialized JSON array under a fixed key.
//! `RedbStore` keeps the values in an embedded database; `MemoryStore` is the
//! fallback when the database cannot be opened, and the store used in tests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use redb::{Database, TableDefinition};
use tracing::{info, warn};

use crate::shared::error::{StorageError, StorageResult};

/// Redb table definition for all persisted lists
/// Key: list key, Value: serialized JSON array
const STORE_TABLE: TableDefinition<&str, &str> = TableDefinition::new("lexigo_store");

/// Database file name inside the data directory
pub const DATABASE_FILE: &str = "lexigo.redb";

/// Storage trait for list persistence
pub trait KeyValueStore: Send + Sync {
    fn name(&self) -> &'static str;
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;
}

fn db_err(context: &str, err: impl std::fmt::Display) -> StorageError {
    StorageError::Database(format!("{}: {}", context, err))
}

/// Redb-based storage implementation
pub struct RedbStore {
    db: Database,
    path: PathBuf,
}

impl RedbStore {
    pub fn open(dir: &Path) -> StorageResult<Self> {
        std::fs::create_dir_all(dir)?;

        let path = dir.join(DATABASE_FILE);
        let db = Database::create(&path).map_err(|e| db_err("Failed to create database", e))?;

        // Initialize table so read transactions can always open it
        {
            let write_txn = db
                .begin_write()
                .map_err(|e| db_err("Failed to begin write transaction", e))?;
            {
                let _table = write_txn
                    .open_table(STORE_TABLE)
                    .map_err(|e| db_err("Failed to open table", e))?;
            }
            write_txn
                .commit()
                .map_err(|e| db_err("Failed to commit transaction", e))?;
        }

        Ok(Self { db, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyValueStore for RedbStore {
    fn name(&self) -> &'static str {
        "redb"
    }

    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let read_txn = self
            .db
            .begin_read()
            .map_err(|e| db_err("Failed to begin read", e))?;
        let table = read_txn
            .open_table(STORE_TABLE)
            .map_err(|e| db_err("Failed to open table", e))?;

        let value = table
            .get(key)
            .map_err(|e| db_err("Failed to read entry", e))?
            .map(|guard| guard.value().to_string());
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let write_txn = self
            .db
            .begin_write()
            .map_err(|e| db_err("Failed to begin write", e))?;
        {
            let mut table = write_txn
                .open_table(STORE_TABLE)
                .map_err(|e| db_err("Failed to open table", e))?;
            table
                .insert(key, value)
                .map_err(|e| db_err("Failed to insert", e))?;
        }
        write_txn.commit().map_err(|e| db_err("Failed to commit", e))?;
        Ok(())
    }
}

/// In-memory storage
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| StorageError::Database(format!("Mutex poisoned: {}", e)))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| StorageError::Database(format!("Mutex poisoned: {}", e)))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Open the database in `dir`, falling back to memory if that fails
pub fn open_store(dir: &Path) -> Arc<dyn KeyValueStore> {
    match RedbStore::open(dir) {
        Ok(store) => {
            info!(path = %store.path().display(), backend = store.name(), "opened list database");
            Arc::new(store)
        }
        Err(e) => {
            warn!(error = %e, "failed to open list database, using in-memory fallback");
            Arc::new(MemoryStore::new())
        }
    }
}
