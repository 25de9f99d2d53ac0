//! Advisory problems reported while validating stored challenge data.
//!
//! A problem is never an error: each one records a field that was repaired
//! with a safe default. Callers decide whether to surface them.

use std::fmt;

use serde::Serialize;

/// What kind of defect was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProblemKind {
    /// A required field was absent.
    MissingField,
    /// A field held the wrong JSON type.
    TypeMismatch,
    /// A value was outside its permitted range (or blank where text is required).
    OutOfRange,
    /// A string could not be read as a date or timestamp.
    UnparseableDate,
    /// A note value matched none of the known historical shapes.
    UnrecognizedNoteShape,
}

impl ProblemKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ProblemKind::MissingField => "missing field",
            ProblemKind::TypeMismatch => "type mismatch",
            ProblemKind::OutOfRange => "out of range",
            ProblemKind::UnparseableDate => "unparseable date",
            ProblemKind::UnrecognizedNoteShape => "unrecognized note shape",
        }
    }
}

impl fmt::Display for ProblemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One repaired defect. `field` is a path such as `durationDays`,
/// `completedDates[3]` or `notes.2024-01-01`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Problem {
    pub kind: ProblemKind,
    pub field: String,
    pub message: String,
}

impl Problem {
    pub fn new(kind: ProblemKind, field: impl Into<String>, message: impl Into<String>) -> Self {
        Problem {
            kind,
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn missing_field(field: impl Into<String>, default: impl fmt::Display) -> Self {
        Problem::new(
            ProblemKind::MissingField,
            field,
            format!("missing required field, using {}", default),
        )
    }

    pub fn type_mismatch(
        field: impl Into<String>,
        expected: &str,
        got: &serde_json::Value,
        default: impl fmt::Display,
    ) -> Self {
        Problem::new(
            ProblemKind::TypeMismatch,
            field,
            format!(
                "expected {}, got {}; using {}",
                expected,
                json_type_name(got),
                default
            ),
        )
    }

    pub fn unparseable_date(field: impl Into<String>, raw: &str) -> Self {
        Problem::new(
            ProblemKind::UnparseableDate,
            field,
            format!("'{}' is not a valid date", raw),
        )
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.field, self.kind, self.message)
    }
}

/// Return a descriptive type name for a JSON value (for problem messages).
pub fn json_type_name(v: &serde_json::Value) -> &'static str {
    match v {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
