//! Conformance test suite for `ChallengeStore` implementations.
//!
//! This module provides a backend-agnostic test suite that any
//! `ChallengeStore` implementation can run to verify correctness. The suite
//! covers:
//!
//! - **Blobs**: missing keys, round trips, overwrites, byte-exact text
//! - **Keys**: independence of keys, rejection of invalid keys
//! - **Remove**: existence reporting, idempotence
//! - **Repository**: canonical state survives a save/load cycle through the store
//!
//! # Usage
//!
//! Backend crates call [`run_conformance_suite`] with a factory function that
//! creates a fresh, empty store for each test:
//!
//! ```ignore
//! use tally_storage::conformance::run_conformance_suite;
//!
//! #[test]
//! fn file_store_conformance() {
//!     let dir = tempfile::tempdir().unwrap();
//!     let counter = std::cell::Cell::new(0);
//!     let report = run_conformance_suite(|| {
//!         counter.set(counter.get() + 1);
//!         FileStore::new(dir.path().join(counter.get().to_string()))
//!     });
//!     assert!(report.is_clean(), "{report}");
//! }
//! ```

mod blob;
mod keys;
mod remove;
mod repository;

use std::fmt;

use crate::ChallengeStore;

/// Outcome of one check against a store.
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// One of "blob", "keys", "remove", "repository".
    pub category: &'static str,
    pub name: &'static str,
    /// `Err` carries what the store did wrong.
    pub outcome: Result<(), String>,
}

impl CheckResult {
    fn new(category: &'static str, name: &'static str, outcome: Result<(), String>) -> Self {
        CheckResult {
            category,
            name,
            outcome,
        }
    }

    pub fn passed(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Every check from one suite run, in run order.
#[derive(Debug, Clone)]
pub struct ConformanceReport {
    pub results: Vec<CheckResult>,
}

impl ConformanceReport {
    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// Checks that failed, with their messages.
    pub fn failures(&self) -> impl Iterator<Item = (&CheckResult, &str)> {
        self.results
            .iter()
            .filter_map(|r| r.outcome.as_ref().err().map(|msg| (r, msg.as_str())))
    }

    pub fn is_clean(&self) -> bool {
        self.results.iter().all(CheckResult::passed)
    }
}

impl fmt::Display for ConformanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let failed = self.failures().count();
        writeln!(f, "{} of {} store checks failed", failed, self.total())?;
        for (check, msg) in self.failures() {
            writeln!(f, "  {}/{}: {}", check.category, check.name, msg)?;
        }
        Ok(())
    }
}

/// Run the full conformance suite against a store.
///
/// The `factory` function is called once per test to create a fresh, empty
/// store, ensuring test isolation.
pub fn run_conformance_suite<S, F>(factory: F) -> ConformanceReport
where
    S: ChallengeStore,
    F: Fn() -> S,
{
    let mut results = Vec::new();
    results.extend(blob::run_blob_tests(&factory));
    results.extend(keys::run_key_tests(&factory));
    results.extend(remove::run_remove_tests(&factory));
    results.extend(repository::run_repository_tests(&factory));
    ConformanceReport { results }
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn expect_blob<S: ChallengeStore>(s: &S, key: &str, expected: &str) -> Result<(), String> {
    match s.load(key).map_err(|e| e.to_string())? {
        Some(blob) if blob == expected => Ok(()),
        Some(blob) => Err(format!("expected {expected:?} under {key}, got {blob:?}")),
        None => Err(format!("expected {expected:?} under {key}, got nothing")),
    }
}

fn expect_missing<S: ChallengeStore>(s: &S, key: &str) -> Result<(), String> {
    match s.load(key).map_err(|e| e.to_string())? {
        None => Ok(()),
        Some(blob) => Err(format!("expected nothing under {key}, got {blob:?}")),
    }
}
