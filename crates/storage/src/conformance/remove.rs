use super::{expect_missing, CheckResult};
use crate::ChallengeStore;

pub(super) fn run_remove_tests<S, F>(factory: &F) -> Vec<CheckResult>
where
    S: ChallengeStore,
    F: Fn() -> S,
{
    vec![
        CheckResult::new(
            "remove",
            "remove_existing_reports_true",
            remove_existing_reports_true(factory),
        ),
        CheckResult::new(
            "remove",
            "remove_missing_reports_false",
            remove_missing_reports_false(factory),
        ),
        CheckResult::new(
            "remove",
            "save_after_remove_works",
            save_after_remove_works(factory),
        ),
    ]
}

// ── Test implementations ──────────────────────────────────────────────────────

fn remove_existing_reports_true<S, F>(factory: &F) -> Result<(), String>
where
    S: ChallengeStore,
    F: Fn() -> S,
{
    let s = factory();
    s.save("challengeData", "{}").map_err(|e| e.to_string())?;
    if !s.remove("challengeData").map_err(|e| e.to_string())? {
        return Err("remove of a stored key reported false".to_string());
    }
    expect_missing(&s, "challengeData")
}

/// Removing twice is harmless; the second call reports nothing was there.
fn remove_missing_reports_false<S, F>(factory: &F) -> Result<(), String>
where
    S: ChallengeStore,
    F: Fn() -> S,
{
    let s = factory();
    if s.remove("challengeData").map_err(|e| e.to_string())? {
        return Err("remove of a missing key reported true".to_string());
    }
    Ok(())
}

fn save_after_remove_works<S, F>(factory: &F) -> Result<(), String>
where
    S: ChallengeStore,
    F: Fn() -> S,
{
    let s = factory();
    s.save("challengeData", "old").map_err(|e| e.to_string())?;
    s.remove("challengeData").map_err(|e| e.to_string())?;
    s.save("challengeData", "new").map_err(|e| e.to_string())?;
    super::expect_blob(&s, "challengeData", "new")
}
