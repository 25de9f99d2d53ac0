use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::error::StorageError;
use crate::traits::{validate_key, ChallengeStore};

/// In-process store, for tests and for front ends that persist elsewhere.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_entries<T>(
        &self,
        f: impl FnOnce(&mut BTreeMap<String, String>) -> T,
    ) -> Result<T, StorageError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| StorageError::Backend("memory store lock poisoned".to_string()))?;
        Ok(f(&mut entries))
    }
}

impl ChallengeStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        self.with_entries(|entries| entries.get(key).cloned())
    }

    fn save(&self, key: &str, blob: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        self.with_entries(|entries| {
            entries.insert(key.to_string(), blob.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<bool, StorageError> {
        validate_key(key)?;
        self.with_entries(|entries| entries.remove(key).is_some())
    }
}
