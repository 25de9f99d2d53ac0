//! tally-storage: persistence for challenge progress.
//!
//! Stores hold opaque JSON blobs under string keys ([`ChallengeStore`]). The
//! [`ProgressRepository`] sits on top and runs every load through the
//! validator and every save through the sanitizer.

pub mod conformance;
mod error;
mod file;
mod memory;
mod repository;
mod traits;

pub use error::StorageError;
pub use file::FileStore;
pub use memory::MemoryStore;
pub use repository::ProgressRepository;
pub use traits::{validate_key, ChallengeStore};
