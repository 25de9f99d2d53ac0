//! Load-time validation and normalization of stored challenge data.
//!
//! [`validate`] accepts any decoded JSON value and always produces the best
//! state it can, alongside the list of problems it repaired. It only gives up
//! (returns no state) when the input is not a JSON object at all, which the
//! caller treats as "no challenge yet".

use serde_json::{Map, Value};

use crate::date::{CalendarDate, Clock};
use crate::notes::read_notes;
use crate::problem::{Problem, ProblemKind};
use crate::state::{
    ChallengeState, DEFAULT_DURATION_DAYS, MAX_DURATION_DAYS, MIN_DURATION_DAYS,
    PLACEHOLDER_NAME, SCHEMA_VERSION,
};

/// Outcome of validating stored data.
#[derive(Debug, Clone, PartialEq)]
pub struct Validation {
    /// `None` only when the input was not an object.
    pub state: Option<ChallengeState>,
    /// Every defect found, in field order.
    pub problems: Vec<Problem>,
}

impl Validation {
    /// True when a state was produced and nothing needed repair.
    pub fn ok(&self) -> bool {
        self.state.is_some() && self.problems.is_empty()
    }

    fn no_data(message: String) -> Self {
        Validation {
            state: None,
            problems: vec![Problem::new(ProblemKind::TypeMismatch, "$", message)],
        }
    }

    /// Human-readable problem lines.
    pub fn messages(&self) -> Vec<String> {
        self.problems.iter().map(ToString::to_string).collect()
    }
}

/// Decode a stored blob and validate it.
///
/// Undecodable JSON is reported the same way as a non-object value.
pub fn validate_str(blob: &str, clock: &Clock) -> Validation {
    match serde_json::from_str::<Value>(blob) {
        Ok(raw) => validate(&raw, clock),
        Err(e) => {
            tracing::warn!(error = %e, "stored challenge data is not valid JSON");
            Validation::no_data(format!("no challenge data found: invalid JSON ({})", e))
        }
    }
}

/// Validate and normalize a decoded value into a [`ChallengeState`].
pub fn validate(raw: &Value, clock: &Clock) -> Validation {
    let Some(obj) = raw.as_object() else {
        return Validation::no_data(format!(
            "no challenge data found: expected an object, got {}",
            crate::problem::json_type_name(raw)
        ));
    };

    let mut problems = Vec::new();

    check_schema_version(obj, &mut problems);
    let duration_days = read_duration(obj.get("durationDays"), &mut problems);
    let start_date = read_start_date(obj.get("startDate"), clock.today, &mut problems);
    let participant_name = read_name(obj.get("participantName"), &mut problems);
    let completed_dates = read_completed_dates(obj.get("completedDates"), &mut problems);
    let notes = read_notes(obj.get("notes"), clock.now, &mut problems);
    let last_logged_date = read_last_logged(obj.get("lastLoggedDate"), &mut problems);

    for problem in &problems {
        tracing::debug!(kind = %problem.kind, field = %problem.field, "{}", problem.message);
    }
    if !problems.is_empty() {
        tracing::warn!(
            problems = problems.len(),
            "challenge data was repaired during validation"
        );
    }

    Validation {
        state: Some(ChallengeState {
            schema_version: SCHEMA_VERSION,
            duration_days,
            start_date,
            participant_name,
            completed_dates,
            notes,
            last_logged_date,
        }),
        problems,
    }
}

/// Clamp a requested duration into the allowed range.
pub fn clamp_duration(days: i64) -> u16 {
    days.clamp(i64::from(MIN_DURATION_DAYS), i64::from(MAX_DURATION_DAYS)) as u16
}

/// Absence is normal (legacy data); only a malformed or future version is
/// reported.
fn check_schema_version(obj: &Map<String, Value>, problems: &mut Vec<Problem>) {
    let Some(raw) = obj.get("schemaVersion") else {
        return;
    };
    match raw.as_u64() {
        Some(v) if v <= u64::from(SCHEMA_VERSION) => {}
        Some(v) => problems.push(Problem::new(
            ProblemKind::OutOfRange,
            "schemaVersion",
            format!(
                "version {} is newer than supported version {}; reading best-effort",
                v, SCHEMA_VERSION
            ),
        )),
        None => problems.push(Problem::type_mismatch(
            "schemaVersion",
            "a non-negative integer",
            raw,
            SCHEMA_VERSION,
        )),
    }
}

fn read_duration(value: Option<&Value>, problems: &mut Vec<Problem>) -> u16 {
    const FIELD: &str = "durationDays";
    let Some(value) = value else {
        problems.push(Problem::missing_field(FIELD, DEFAULT_DURATION_DAYS));
        return DEFAULT_DURATION_DAYS;
    };
    let Some(n) = value.as_f64() else {
        problems.push(Problem::type_mismatch(
            FIELD,
            "a number",
            value,
            DEFAULT_DURATION_DAYS,
        ));
        return DEFAULT_DURATION_DAYS;
    };

    let days = clamp_duration(n.round() as i64);
    if n.fract() != 0.0 {
        problems.push(Problem::new(
            ProblemKind::TypeMismatch,
            FIELD,
            format!("expected an integer, got {}; using {}", n, days),
        ));
    } else if f64::from(days) != n {
        problems.push(Problem::new(
            ProblemKind::OutOfRange,
            FIELD,
            format!(
                "{} is outside {}..={}; using {}",
                n, MIN_DURATION_DAYS, MAX_DURATION_DAYS, days
            ),
        ));
    }
    days
}

fn read_start_date(
    value: Option<&Value>,
    today: CalendarDate,
    problems: &mut Vec<Problem>,
) -> CalendarDate {
    const FIELD: &str = "startDate";
    match value {
        None => {
            problems.push(Problem::missing_field(FIELD, today));
            today
        }
        Some(Value::String(raw)) => CalendarDate::parse(raw).unwrap_or_else(|| {
            problems.push(Problem::new(
                ProblemKind::UnparseableDate,
                FIELD,
                format!("'{}' is not a valid date; using {}", raw, today),
            ));
            today
        }),
        Some(other) => {
            problems.push(Problem::type_mismatch(FIELD, "a date string", other, today));
            today
        }
    }
}

fn read_name(value: Option<&Value>, problems: &mut Vec<Problem>) -> String {
    const FIELD: &str = "participantName";
    let placeholder = || PLACEHOLDER_NAME.to_string();
    match value {
        None => {
            problems.push(Problem::missing_field(
                FIELD,
                format!("'{}'", PLACEHOLDER_NAME),
            ));
            placeholder()
        }
        Some(Value::String(raw)) if raw.trim().is_empty() => {
            problems.push(Problem::new(
                ProblemKind::OutOfRange,
                FIELD,
                format!("name is blank; using '{}'", PLACEHOLDER_NAME),
            ));
            placeholder()
        }
        Some(Value::String(raw)) => raw.trim().to_string(),
        Some(other) => {
            problems.push(Problem::type_mismatch(
                FIELD,
                "a string",
                other,
                format!("'{}'", PLACEHOLDER_NAME),
            ));
            placeholder()
        }
    }
}

/// Invalid entries are dropped one by one; duplicates are removed silently,
/// keeping the first occurrence.
fn read_completed_dates(value: Option<&Value>, problems: &mut Vec<Problem>) -> Vec<CalendarDate> {
    const FIELD: &str = "completedDates";
    let items = match value {
        None => {
            problems.push(Problem::missing_field(FIELD, "an empty list"));
            return Vec::new();
        }
        Some(Value::Array(items)) => items,
        Some(other) => {
            problems.push(Problem::type_mismatch(
                FIELD,
                "an array",
                other,
                "an empty list",
            ));
            return Vec::new();
        }
    };

    let mut dates: Vec<CalendarDate> = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let field = format!("{}[{}]", FIELD, i);
        let parsed = match item {
            Value::String(raw) => CalendarDate::parse(raw).ok_or_else(|| {
                Problem::new(
                    ProblemKind::UnparseableDate,
                    field,
                    format!("'{}' is not a valid date; dropping entry", raw),
                )
            }),
            other => Err(Problem::type_mismatch(
                field,
                "a date string",
                other,
                "nothing (entry dropped)",
            )),
        };
        match parsed {
            Ok(date) if dates.contains(&date) => {}
            Ok(date) => dates.push(date),
            Err(problem) => problems.push(problem),
        }
    }
    dates
}

fn read_last_logged(value: Option<&Value>, problems: &mut Vec<Problem>) -> Option<CalendarDate> {
    const FIELD: &str = "lastLoggedDate";
    match value {
        None => {
            problems.push(Problem::missing_field(FIELD, "null"));
            None
        }
        Some(Value::Null) => None,
        Some(Value::String(raw)) => {
            let parsed = CalendarDate::parse(raw);
            if parsed.is_none() {
                problems.push(Problem::new(
                    ProblemKind::UnparseableDate,
                    FIELD,
                    format!("'{}' is not a valid date; using null", raw),
                ));
            }
            parsed
        }
        Some(other) => {
            problems.push(Problem::type_mismatch(
                FIELD,
                "a date string or null",
                other,
                "null",
            ));
            None
        }
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
