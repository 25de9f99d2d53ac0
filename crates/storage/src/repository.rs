//! Load/validate and sanitize/save around a [`ChallengeStore`].

use tally_core::{sanitize, validate_str, ChallengeState, Clock, Validation, STORAGE_KEY};

use crate::error::StorageError;
use crate::traits::{validate_key, ChallengeStore};

/// The single place the front end reads and writes challenge progress.
///
/// Every load runs the validator, so a blob changed by another process is
/// picked up (and repaired) on the next load rather than merged.
#[derive(Debug)]
pub struct ProgressRepository<S> {
    store: S,
    key: String,
}

impl<S: ChallengeStore> ProgressRepository<S> {
    /// A repository using the standard key.
    pub fn new(store: S) -> Self {
        ProgressRepository {
            store,
            key: STORAGE_KEY.to_string(),
        }
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Result<Self, StorageError> {
        let key = key.into();
        validate_key(&key)?;
        Ok(ProgressRepository { store, key })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load and validate the stored challenge.
    ///
    /// Nothing stored yields a validation with no state and no problems.
    pub fn load(&self, clock: &Clock) -> Result<Validation, StorageError> {
        match self.store.load(&self.key)? {
            None => Ok(Validation {
                state: None,
                problems: Vec::new(),
            }),
            Some(blob) => Ok(validate_str(&blob, clock)),
        }
    }

    /// Sanitize and persist `state`, returning what was written.
    pub fn save(&self, state: &ChallengeState) -> Result<ChallengeState, StorageError> {
        let clean = sanitize(state.clone());
        let blob = serde_json::to_string_pretty(&clean)?;
        self.store.save(&self.key, &blob)?;
        tracing::info!(
            key = %self.key,
            completed = clean.completed_dates.len(),
            "challenge saved"
        );
        Ok(clean)
    }

    /// Forget the current challenge. Returns whether one was stored.
    pub fn reset(&self) -> Result<bool, StorageError> {
        let existed = self.store.remove(&self.key)?;
        tracing::info!(key = %self.key, existed, "challenge reset");
        Ok(existed)
    }
}
