use tally_core::{action, CalendarDate, Clock, ProblemKind};

use super::CheckResult;
use crate::{ChallengeStore, ProgressRepository};

pub(super) fn run_repository_tests<S, F>(factory: &F) -> Vec<CheckResult>
where
    S: ChallengeStore,
    F: Fn() -> S,
{
    vec![
        CheckResult::new(
            "repository",
            "saved_state_loads_without_problems",
            saved_state_loads_without_problems(factory),
        ),
        CheckResult::new(
            "repository",
            "legacy_blob_is_migrated_on_load",
            legacy_blob_is_migrated_on_load(factory),
        ),
        CheckResult::new(
            "repository",
            "unparseable_blob_yields_no_state",
            unparseable_blob_yields_no_state(factory),
        ),
    ]
}

fn clock() -> Result<Clock, String> {
    CalendarDate::from_ymd(2024, 3, 10)
        .map(Clock::fixed)
        .ok_or_else(|| "invalid fixture date".to_string())
}

// ── Test implementations ──────────────────────────────────────────────────────

fn saved_state_loads_without_problems<S, F>(factory: &F) -> Result<(), String>
where
    S: ChallengeStore,
    F: Fn() -> S,
{
    let clock = clock()?;
    let repo = ProgressRepository::new(factory());
    let start = CalendarDate::from_ymd(2024, 3, 1).ok_or("invalid start date")?;
    let state = action::start_challenge(30, start, "Robin").map_err(|e| e.to_string())?;
    let state = action::log_today(&state, Some("cold"), &clock).map_err(|e| e.to_string())?;

    let saved = repo.save(&state).map_err(|e| e.to_string())?;
    let loaded = repo.load(&clock).map_err(|e| e.to_string())?;
    if !loaded.ok() {
        return Err(format!("unexpected problems: {:?}", loaded.messages()));
    }
    if loaded.state.as_ref() != Some(&saved) {
        return Err(format!("expected {saved:?}, got {:?}", loaded.state));
    }
    Ok(())
}

/// Notes stored as a list of `{date, note}` pairs come back as canonical
/// notes, with nothing reported.
fn legacy_blob_is_migrated_on_load<S, F>(factory: &F) -> Result<(), String>
where
    S: ChallengeStore,
    F: Fn() -> S,
{
    let store = factory();
    store
        .save(
            tally_core::STORAGE_KEY,
            r#"{
                "durationDays": 30,
                "startDate": "2024-03-01",
                "participantName": "Robin",
                "completedDates": ["2024-03-02"],
                "notes": [{"date": "2024-03-02", "note": "icy"}],
                "lastLoggedDate": "2024-03-02"
            }"#,
        )
        .map_err(|e| e.to_string())?;
    let repo = ProgressRepository::new(store);
    let loaded = repo.load(&clock()?).map_err(|e| e.to_string())?;
    if !loaded.problems.is_empty() {
        return Err(format!("legacy blob reported problems: {:?}", loaded.messages()));
    }
    let state = loaded.state.ok_or("legacy blob produced no state")?;
    let date = CalendarDate::from_ymd(2024, 3, 2).ok_or("invalid note date")?;
    match state.notes.get(&date) {
        Some(note) if note.note == "icy" => Ok(()),
        other => Err(format!("expected migrated note \"icy\", got {other:?}")),
    }
}

fn unparseable_blob_yields_no_state<S, F>(factory: &F) -> Result<(), String>
where
    S: ChallengeStore,
    F: Fn() -> S,
{
    let store = factory();
    store
        .save(tally_core::STORAGE_KEY, "{not json")
        .map_err(|e| e.to_string())?;
    let repo = ProgressRepository::new(store);
    let loaded = repo.load(&clock()?).map_err(|e| e.to_string())?;
    if loaded.state.is_some() {
        return Err("unparseable blob produced a state".to_string());
    }
    if !loaded
        .problems
        .iter()
        .any(|p| p.kind == ProblemKind::TypeMismatch)
    {
        return Err(format!("expected a type mismatch, got {:?}", loaded.messages()));
    }
    Ok(())
}
