//! Migration of the `notes` field from every shape it has been stored in.
//!
//! | shape        | container | value                               |
//! |--------------|-----------|-------------------------------------|
//! | `PairList`   | array     | `{date, note}`                      |
//! | `PlainText`  | object    | `"text"`                            |
//! | `Stamped`    | object    | `{note, timestamp}`                 |
//! | `Canonical`  | object    | `{note, createdAt, updatedAt?}`     |
//!
//! Stored data carries no version tag, and one map may hold entries written
//! by different releases, so detection runs independently on every entry.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::date::{CalendarDate, Timestamp};
use crate::problem::{json_type_name, Problem, ProblemKind};
use crate::state::SessionNote;

/// A historical representation of a single note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteShape {
    /// Element of an array of `{date, note}` pairs.
    PairList,
    /// Bare note text stored under its date.
    PlainText,
    /// `{note, timestamp}` stored under its date.
    Stamped,
    /// `{note, createdAt, updatedAt}`, the shape written today.
    Canonical,
}

/// Classify one value of a date-keyed notes map.
///
/// Returns `None` for values that match no known shape.
pub fn detect_map_value(value: &Value) -> Option<NoteShape> {
    match value {
        Value::String(_) => Some(NoteShape::PlainText),
        Value::Object(fields) if fields.get("note").is_some_and(Value::is_string) => {
            if fields.contains_key("createdAt") {
                Some(NoteShape::Canonical)
            } else if fields.contains_key("timestamp") {
                Some(NoteShape::Stamped)
            } else {
                None
            }
        }
        _ => None,
    }
}

/// Classify one element of a pair-list array. Elements that also carry
/// timestamps are read with those timestamps.
fn detect_list_item(item: &Value) -> Option<NoteShape> {
    match detect_map_value(item) {
        Some(shape @ (NoteShape::Canonical | NoteShape::Stamped)) => Some(shape),
        _ if item.get("note").is_some_and(Value::is_string) => Some(NoteShape::PairList),
        _ => None,
    }
}

/// Read the `notes` field into canonical form, recording a problem for every
/// entry that had to be dropped or repaired.
pub(crate) fn read_notes(
    value: Option<&Value>,
    now: Timestamp,
    problems: &mut Vec<Problem>,
) -> BTreeMap<CalendarDate, SessionNote> {
    match value {
        None => {
            problems.push(Problem::missing_field("notes", "no notes"));
            BTreeMap::new()
        }
        Some(Value::Array(items)) => read_pair_list(items, now, problems),
        Some(Value::Object(map)) => read_note_map(map, now, problems),
        Some(other) => {
            problems.push(Problem::type_mismatch(
                "notes",
                "an object",
                other,
                "no notes",
            ));
            BTreeMap::new()
        }
    }
}

fn read_pair_list(
    items: &[Value],
    now: Timestamp,
    problems: &mut Vec<Problem>,
) -> BTreeMap<CalendarDate, SessionNote> {
    let mut notes = BTreeMap::new();
    for (i, item) in items.iter().enumerate() {
        let field = format!("notes[{}]", i);
        let (Some(raw_date), Some(shape)) = (
            item.get("date").and_then(Value::as_str),
            detect_list_item(item),
        ) else {
            problems.push(unrecognized(&field, item, "an object with date and note"));
            continue;
        };
        let Some(date) = CalendarDate::parse(raw_date) else {
            problems.push(Problem::unparseable_date(field, raw_date));
            continue;
        };
        // Later pairs for the same date replace earlier ones.
        if let Some(note) = convert(shape, date, item, now, &field, problems) {
            if notes.insert(date, note).is_some() {
                problems.push(Problem::new(
                    ProblemKind::OutOfRange,
                    field,
                    format!("duplicate note for {}; replacing the earlier one", date),
                ));
            }
        }
    }
    notes
}

fn read_note_map(
    map: &Map<String, Value>,
    now: Timestamp,
    problems: &mut Vec<Problem>,
) -> BTreeMap<CalendarDate, SessionNote> {
    let mut notes = BTreeMap::new();
    for (key, value) in map {
        let field = format!("notes.{}", key);
        let Some(date) = CalendarDate::parse(key) else {
            problems.push(Problem::unparseable_date(field, key));
            continue;
        };
        let Some(shape) = detect_map_value(value) else {
            problems.push(unrecognized(
                &field,
                value,
                "note text or an object with note and createdAt or timestamp",
            ));
            continue;
        };
        let Some(note) = convert(shape, date, value, now, &field, problems) else {
            continue;
        };
        // Date-time keys reduce to a date that may already be taken.
        if notes.contains_key(&date) {
            problems.push(Problem::new(
                ProblemKind::OutOfRange,
                field,
                format!("duplicate note for {}; keeping the first", date),
            ));
            continue;
        }
        notes.insert(date, note);
    }
    notes
}

/// Convert a value already classified as `shape` into a canonical note keyed
/// by `date`.
fn convert(
    shape: NoteShape,
    date: CalendarDate,
    value: &Value,
    now: Timestamp,
    field: &str,
    problems: &mut Vec<Problem>,
) -> Option<SessionNote> {
    match shape {
        NoteShape::PlainText => value.as_str().map(|text| SessionNote::new(date, text, now)),
        NoteShape::PairList => note_text(value).map(|text| SessionNote::new(date, text, now)),
        NoteShape::Stamped => {
            let text = note_text(value)?;
            let raw = &value["timestamp"];
            let Some(at) = Timestamp::from_json(raw) else {
                problems.push(bad_timestamp(format!("{}.timestamp", field), raw, "dropping note"));
                return None;
            };
            Some(SessionNote::new(date, text, at))
        }
        NoteShape::Canonical => {
            let text = note_text(value)?;
            let raw_created = &value["createdAt"];
            let Some(created_at) = Timestamp::from_json(raw_created) else {
                problems.push(bad_timestamp(
                    format!("{}.createdAt", field),
                    raw_created,
                    "dropping note",
                ));
                return None;
            };
            let updated_at = match value.get("updatedAt") {
                None | Some(Value::Null) => created_at,
                Some(raw) => match Timestamp::from_json(raw) {
                    Some(at) if at >= created_at => at,
                    Some(at) => {
                        problems.push(Problem::new(
                            ProblemKind::OutOfRange,
                            format!("{}.updatedAt", field),
                            format!(
                                "{} precedes createdAt {}; using createdAt",
                                at, created_at
                            ),
                        ));
                        created_at
                    }
                    None => {
                        problems.push(bad_timestamp(
                            format!("{}.updatedAt", field),
                            raw,
                            "using createdAt",
                        ));
                        created_at
                    }
                },
            };
            Some(SessionNote {
                date,
                note: text.to_string(),
                created_at,
                updated_at,
            })
        }
    }
}

fn note_text(value: &Value) -> Option<&str> {
    value.get("note").and_then(Value::as_str)
}

fn unrecognized(field: &str, value: &Value, expected: &str) -> Problem {
    Problem::new(
        ProblemKind::UnrecognizedNoteShape,
        field,
        format!(
            "expected {}, got {}; dropping entry",
            expected,
            json_type_name(value)
        ),
    )
}

fn bad_timestamp(field: String, raw: &Value, action: &str) -> Problem {
    let shown = match raw {
        Value::String(s) => format!("'{}'", s),
        other => json_type_name(other).to_string(),
    };
    Problem::new(
        ProblemKind::UnparseableDate,
        field,
        format!("{} is not a valid timestamp; {}", shown, action),
    )
}
