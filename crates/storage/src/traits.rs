use crate::error::StorageError;

/// Durable key-value storage for serialized challenge state.
///
/// A store treats blobs as opaque text: it never parses or validates them.
/// That is the repository's job, so a store can be swapped without touching
/// migration logic.
///
/// ## Semantics
///
/// - `load` of a key that was never saved (or was removed) is `Ok(None)`.
/// - `save` replaces any previous blob for the key. A reader observes either
///   the previous blob or the new one, never a partial write.
/// - `remove` reports whether a blob existed.
/// - Keys must satisfy [`validate_key`]; other keys fail with
///   `StorageError::InvalidKey` on every operation.
pub trait ChallengeStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn save(&self, key: &str, blob: &str) -> Result<(), StorageError>;

    fn remove(&self, key: &str) -> Result<bool, StorageError>;
}

/// Check that `key` is usable by every store (it doubles as a file name).
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey {
            key: key.to_string(),
        })
    }
}

impl<S: ChallengeStore + ?Sized> ChallengeStore for &S {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).load(key)
    }

    fn save(&self, key: &str, blob: &str) -> Result<(), StorageError> {
        (**self).save(key, blob)
    }

    fn remove(&self, key: &str) -> Result<bool, StorageError> {
        (**self).remove(key)
    }
}
