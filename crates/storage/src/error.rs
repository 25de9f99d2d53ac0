/// All errors that can be returned by a `ChallengeStore` implementation.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Keys are non-empty and limited to ASCII letters, digits, `-` and `_`.
    #[error("invalid storage key: {key:?}")]
    InvalidKey { key: String },

    /// Reading or writing the blob for `key` failed.
    #[error("storage I/O error for key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The state could not be serialized for saving.
    #[error("failed to encode challenge state: {0}")]
    Encode(#[from] serde_json::Error),

    /// A backend-specific failure (lock poisoning, etc.).
    #[error("storage backend error: {0}")]
    Backend(String),
}
