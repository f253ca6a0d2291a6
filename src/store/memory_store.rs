//! In-memory scoped store.
//!
//! Backs ephemeral sessions where nothing should be written to disk, and
//! keeps manager tests free of filesystem setup.

use super::scoped_store::{scope_key, Namespace, ScopedStore, StorageError};
use std::collections::HashMap;
use std::sync::Mutex;

/// A scoped store that keeps everything in a process-local map.
#[derive(Default)]
pub struct MemoryScopedStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryScopedStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScopedStore for MemoryScopedStore {
    fn load(&self, namespace: Namespace, user_id: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().unwrap();
        Ok(entries.get(&scope_key(namespace, user_id)).cloned())
    }

    fn save(&self, namespace: Namespace, user_id: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(scope_key(namespace, user_id), value.to_string());
        Ok(())
    }

    fn clear(&self, namespace: Namespace, user_id: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().unwrap();
        entries.remove(&scope_key(namespace, user_id));
        Ok(())
    }
}
