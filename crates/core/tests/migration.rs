//! End-to-end behavior of validation and migration over realistic stored
//! records.

use serde_json::json;
use tally_core::{
    calendar, progress, sanitize, validate, validate_str, CalendarDate, ChallengeState, Clock,
    ProblemKind, Timestamp, PLACEHOLDER_NAME,
};

fn date(s: &str) -> CalendarDate {
    s.parse().unwrap()
}

fn clock() -> Clock {
    Clock::fixed(date("2024-06-01"))
}

fn fixture(name: &str) -> String {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../fixtures/legacy")
        .join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read {}: {}", path.display(), e))
}

#[test]
fn corrupted_record_recovers_with_four_problems() {
    let v = validate(
        &json!({
            "durationDays": "30",
            "startDate": "2024-01-01",
            "participantName": "",
            "completedDates": ["2024-01-01", "bad"],
            "notes": {"2024-01-01": "felt great"}
        }),
        &clock(),
    );
    assert!(!v.ok());
    assert_eq!(v.problems.len(), 4, "{:#?}", v.problems);

    let state = v.state.expect("object input always yields a state");
    assert_eq!(state.duration_days, 10);
    assert_eq!(state.start_date, date("2024-01-01"));
    assert_eq!(state.participant_name, PLACEHOLDER_NAME);
    assert_eq!(state.completed_dates, vec![date("2024-01-01")]);
    assert_eq!(state.notes[&date("2024-01-01")].note, "felt great");

    let kinds: Vec<_> = v.problems.iter().map(|p| p.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ProblemKind::TypeMismatch,
            ProblemKind::OutOfRange,
            ProblemKind::UnparseableDate,
            ProblemKind::MissingField,
        ]
    );
}

#[test]
fn corrupted_fixture_matches_inline_scenario() {
    let v = validate_str(&fixture("corrupted.json"), &clock());
    assert_eq!(v.problems.len(), 4);
    assert_eq!(v.state.unwrap().duration_days, 10);
}

#[test]
fn pair_list_fixture_migrates_cleanly() {
    let v = validate_str(&fixture("pair_list_notes.json"), &clock());
    assert!(v.ok(), "{:#?}", v.problems);
    let state = v.state.unwrap();
    assert_eq!(state.notes.len(), 2);
    assert_eq!(state.notes[&date("2024-01-02")].note, "easier");
    assert_eq!(state.notes[&date("2024-01-02")].created_at, clock().now);
}

#[test]
fn plain_text_fixture_normalizes_start_name_and_duplicates() {
    let v = validate_str(&fixture("plain_text_notes.json"), &clock());
    assert!(v.ok(), "{:#?}", v.problems);
    let state = v.state.unwrap();
    assert_eq!(state.start_date, date("2024-02-01"));
    assert_eq!(state.participant_name, "Sam");
    assert_eq!(
        state.completed_dates,
        vec![date("2024-02-01"), date("2024-02-02")]
    );
    assert_eq!(state.notes[&date("2024-02-02")].note, "");
}

#[test]
fn stamped_fixture_keeps_original_times() {
    let v = validate_str(&fixture("stamped_notes.json"), &clock());
    assert!(v.ok(), "{:#?}", v.problems);
    let state = v.state.unwrap();
    let windy = &state.notes[&date("2024-04-01")];
    assert_eq!(
        windy.created_at,
        Timestamp::parse("2024-04-01T06:30:00Z").unwrap()
    );
    assert_eq!(windy.updated_at, windy.created_at);
    let numeric = &state.notes[&date("2024-04-03")];
    assert_eq!(
        numeric.created_at,
        Timestamp::parse("2024-04-03T06:30:00Z").unwrap()
    );
}

#[test]
fn mixed_fixture_migrates_every_shape() {
    let v = validate_str(&fixture("mixed_notes.json"), &clock());
    assert!(v.ok(), "{:#?}", v.problems);
    let state = v.state.unwrap();
    assert_eq!(state.notes.len(), 4);
    for (key, note) in &state.notes {
        assert_eq!(note.date, *key);
        assert!(note.updated_at >= note.created_at);
    }
}

#[test]
fn persisted_output_validates_back_to_the_same_state() {
    let first = validate_str(&fixture("mixed_notes.json"), &clock())
        .state
        .unwrap();
    let persisted = serde_json::to_string(&sanitize(first.clone())).unwrap();

    let later = Clock::fixed(date("2025-01-01"));
    let reread = validate_str(&persisted, &later);
    assert!(reread.ok(), "{:#?}", reread.problems);
    assert_eq!(reread.state.unwrap(), first);
}

#[test]
fn any_object_yields_a_state() {
    let samples = [
        json!({}),
        json!({"durationDays": {"nested": true}}),
        json!({"completedDates": [[], {}, 1.5]}),
        json!({"notes": [1, 2, 3], "startDate": false}),
        json!({"notes": {"": "", "2024-01-01": null}}),
        json!({"participantName": ["a"], "lastLoggedDate": 12}),
    ];
    for raw in samples {
        let v = validate(&raw, &clock());
        let state = v.state.expect("state must be present for object input");
        assert!((10..=365).contains(&state.duration_days));
        assert!(!state.participant_name.is_empty());
    }
}

#[test]
fn sanitize_is_idempotent_over_validated_samples() {
    for name in [
        "pair_list_notes.json",
        "plain_text_notes.json",
        "stamped_notes.json",
        "mixed_notes.json",
        "corrupted.json",
    ] {
        let state = validate_str(&fixture(name), &clock()).state.unwrap();
        let once = sanitize(state);
        assert_eq!(sanitize(once.clone()), once, "{}", name);
    }
}

#[test]
fn derived_figures_follow_the_validated_state() {
    let state: ChallengeState = validate_str(&fixture("mixed_notes.json"), &clock())
        .state
        .unwrap();
    let today = date("2024-05-05");
    let p = progress::Progress::of(&state, today);
    assert_eq!(p.completed, 4);
    assert_eq!(p.days_left, 41);
    assert_eq!(p.streak, 4);

    for k in 1..=i64::from(state.duration_days) {
        let d = calendar::date_for_day(state.start_date, k).unwrap();
        assert_eq!(calendar::day_index_for_date(state.start_date, d), k);
    }
    assert!(calendar::is_day_completed(&state, 4));
    assert!(!calendar::is_day_completed(&state, 5));
}
