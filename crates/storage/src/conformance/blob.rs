use super::{expect_blob, expect_missing, CheckResult};
use crate::ChallengeStore;

pub(super) fn run_blob_tests<S, F>(factory: &F) -> Vec<CheckResult>
where
    S: ChallengeStore,
    F: Fn() -> S,
{
    vec![
        CheckResult::new(
            "blob",
            "load_missing_key_is_none",
            load_missing_key_is_none(factory),
        ),
        CheckResult::new(
            "blob",
            "save_then_load_round_trips",
            save_then_load_round_trips(factory),
        ),
        CheckResult::new(
            "blob",
            "save_overwrites_previous_blob",
            save_overwrites_previous_blob(factory),
        ),
        CheckResult::new(
            "blob",
            "blob_text_is_preserved_exactly",
            blob_text_is_preserved_exactly(factory),
        ),
        CheckResult::new(
            "blob",
            "empty_blob_is_stored",
            empty_blob_is_stored(factory),
        ),
    ]
}

// ── Test implementations ──────────────────────────────────────────────────────

/// A fresh store has nothing under any valid key.
fn load_missing_key_is_none<S, F>(factory: &F) -> Result<(), String>
where
    S: ChallengeStore,
    F: Fn() -> S,
{
    let s = factory();
    expect_missing(&s, "challengeData")
}

fn save_then_load_round_trips<S, F>(factory: &F) -> Result<(), String>
where
    S: ChallengeStore,
    F: Fn() -> S,
{
    let s = factory();
    s.save("challengeData", r#"{"durationDays":30}"#)
        .map_err(|e| e.to_string())?;
    expect_blob(&s, "challengeData", r#"{"durationDays":30}"#)
}

/// A second save replaces the first; no merging.
fn save_overwrites_previous_blob<S, F>(factory: &F) -> Result<(), String>
where
    S: ChallengeStore,
    F: Fn() -> S,
{
    let s = factory();
    s.save("challengeData", r#"{"a":1,"b":2}"#)
        .map_err(|e| e.to_string())?;
    s.save("challengeData", r#"{"a":3}"#)
        .map_err(|e| e.to_string())?;
    expect_blob(&s, "challengeData", r#"{"a":3}"#)
}

/// Whitespace, newlines and non-ASCII text come back byte for byte.
fn blob_text_is_preserved_exactly<S, F>(factory: &F) -> Result<(), String>
where
    S: ChallengeStore,
    F: Fn() -> S,
{
    let s = factory();
    let blob = "{\n  \"participantName\": \"Zoë ❄ 北\",\n  \"note\": \"  trailing  \"\n}\n";
    s.save("challengeData", blob).map_err(|e| e.to_string())?;
    expect_blob(&s, "challengeData", blob)
}

/// Stores do not interpret blobs, so even an empty one is kept.
fn empty_blob_is_stored<S, F>(factory: &F) -> Result<(), String>
where
    S: ChallengeStore,
    F: Fn() -> S,
{
    let s = factory();
    s.save("challengeData", "").map_err(|e| e.to_string())?;
    expect_blob(&s, "challengeData", "")
}
