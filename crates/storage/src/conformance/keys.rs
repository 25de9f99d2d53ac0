use super::{expect_blob, expect_missing, CheckResult};
use crate::{ChallengeStore, StorageError};

pub(super) fn run_key_tests<S, F>(factory: &F) -> Vec<CheckResult>
where
    S: ChallengeStore,
    F: Fn() -> S,
{
    vec![
        CheckResult::new(
            "keys",
            "different_keys_are_independent",
            different_keys_are_independent(factory),
        ),
        CheckResult::new(
            "keys",
            "invalid_keys_rejected_on_save",
            invalid_keys_rejected_on_save(factory),
        ),
        CheckResult::new(
            "keys",
            "invalid_keys_rejected_on_load",
            invalid_keys_rejected_on_load(factory),
        ),
        CheckResult::new(
            "keys",
            "invalid_key_error_names_the_key",
            invalid_key_error_names_the_key(factory),
        ),
    ]
}

const INVALID_KEYS: [&str; 5] = ["", "../escape", "a/b", "with space", "dot.ted"];

// ── Test implementations ──────────────────────────────────────────────────────

fn different_keys_are_independent<S, F>(factory: &F) -> Result<(), String>
where
    S: ChallengeStore,
    F: Fn() -> S,
{
    let s = factory();
    s.save("first", "1").map_err(|e| e.to_string())?;
    s.save("second_key", "2").map_err(|e| e.to_string())?;
    expect_blob(&s, "first", "1")?;
    expect_blob(&s, "second_key", "2")?;
    s.remove("first").map_err(|e| e.to_string())?;
    expect_missing(&s, "first")?;
    expect_blob(&s, "second_key", "2")
}

fn invalid_keys_rejected_on_save<S, F>(factory: &F) -> Result<(), String>
where
    S: ChallengeStore,
    F: Fn() -> S,
{
    let s = factory();
    for key in INVALID_KEYS {
        match s.save(key, "{}") {
            Err(StorageError::InvalidKey { .. }) => {}
            Err(e) => return Err(format!("save({key:?}): expected InvalidKey, got {e}")),
            Ok(()) => return Err(format!("save({key:?}) unexpectedly succeeded")),
        }
    }
    Ok(())
}

fn invalid_keys_rejected_on_load<S, F>(factory: &F) -> Result<(), String>
where
    S: ChallengeStore,
    F: Fn() -> S,
{
    let s = factory();
    for key in INVALID_KEYS {
        match s.load(key) {
            Err(StorageError::InvalidKey { .. }) => {}
            Err(e) => return Err(format!("load({key:?}): expected InvalidKey, got {e}")),
            Ok(_) => return Err(format!("load({key:?}) unexpectedly succeeded")),
        }
    }
    Ok(())
}

fn invalid_key_error_names_the_key<S, F>(factory: &F) -> Result<(), String>
where
    S: ChallengeStore,
    F: Fn() -> S,
{
    let s = factory();
    match s.remove("a/b") {
        Err(StorageError::InvalidKey { key }) if key == "a/b" => Ok(()),
        Err(e) => Err(format!("expected InvalidKey {{ key: \"a/b\" }}, got {e}")),
        Ok(_) => Err("remove(\"a/b\") unexpectedly succeeded".to_string()),
    }
}
