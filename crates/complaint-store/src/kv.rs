//! String key/value storage.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use rusqlite::{params, OptionalExtension};

use crate::database::Database;
use crate::error::{Result, StoreError};

/// Durable storage for plain string values.
///
/// Writes are synchronous: once `set` or `set_many` returns `Ok`, the value
/// is what a subsequent `get` (or a fresh process) observes.
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Write several keys as one unit: either all land or none do.
    fn set_many(&self, entries: &[(&str, &str)]) -> Result<()>;
}

impl KeyValueStore for Database {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn()
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.set_many(&[(key, value)])
    }

    fn set_many(&self, entries: &[(&str, &str)]) -> Result<()> {
        let now = Utc::now().to_rfc3339();
        let tx = self.conn().unchecked_transaction()?;
        for (key, value) in entries {
            tx.execute(
                "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value,
                                                updated_at = excluded.updated_at",
                params![key, value, now],
            )?;
        }
        tx.commit()?;
        Ok(())
    }
}

impl<T: KeyValueStore + Sync + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn set_many(&self, entries: &[(&str, &str)]) -> Result<()> {
        (**self).set_many(entries)
    }
}

/// In-memory [`KeyValueStore`], used by tests and `--ephemeral` sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with the given entries already present.
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self {
            entries: Mutex::new(map),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let guard = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(guard.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.set_many(&[(key, value)])
    }

    fn set_many(&self, entries: &[(&str, &str)]) -> Result<()> {
        let mut guard = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        for (key, value) in entries {
            guard.insert((*key).to_string(), (*value).to_string());
        }
        Ok(())
    }
}
