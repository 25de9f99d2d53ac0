//! Runs the store conformance suite against every bundled backend.

use std::cell::Cell;

use tally_storage::conformance::run_conformance_suite;
use tally_storage::{FileStore, MemoryStore};

#[test]
fn memory_store_conformance() {
    let report = run_conformance_suite(MemoryStore::new);
    assert!(report.total() > 0);
    assert!(report.is_clean(), "{report}");
}

#[test]
fn file_store_conformance() {
    let root = tempfile::tempdir().unwrap();
    let next = Cell::new(0u32);
    let report = run_conformance_suite(|| {
        next.set(next.get() + 1);
        FileStore::new(root.path().join(format!("store-{}", next.get())))
    });
    assert!(report.is_clean(), "{report}");
}
