//! The canonical challenge record.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::date::{CalendarDate, Timestamp};

/// Shortest allowed challenge, in days.
pub const MIN_DURATION_DAYS: u16 = 10;
/// Longest allowed challenge, in days.
pub const MAX_DURATION_DAYS: u16 = 365;
/// Duration used when the stored value is not a number at all.
pub const DEFAULT_DURATION_DAYS: u16 = MIN_DURATION_DAYS;
/// Name substituted when the stored participant name is missing or blank.
pub const PLACEHOLDER_NAME: &str = "Anonymous";
/// Layout version written by this crate. Legacy data carries no version.
pub const SCHEMA_VERSION: u32 = 1;

/// A note attached to one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionNote {
    /// Always equal to the key this note is stored under.
    pub date: CalendarDate,
    pub note: String,
    pub created_at: Timestamp,
    /// Never earlier than `created_at`.
    pub updated_at: Timestamp,
}

impl SessionNote {
    pub fn new(date: CalendarDate, note: impl Into<String>, at: Timestamp) -> Self {
        SessionNote {
            date,
            note: note.into(),
            created_at: at,
            updated_at: at,
        }
    }
}

/// The persisted, fully-validated state of one challenge.
///
/// Values of this type are produced by [`crate::validate`] or by the actions
/// in [`crate::action`], and are replaced wholesale on every change.
///
/// Stored data is read only through the validator, which migrates legacy
/// shapes; there is no `Deserialize` impl.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeState {
    pub schema_version: u32,
    pub duration_days: u16,
    pub start_date: CalendarDate,
    pub participant_name: String,
    /// Unique dates, in the order they were logged.
    pub completed_dates: Vec<CalendarDate>,
    pub notes: BTreeMap<CalendarDate, SessionNote>,
    pub last_logged_date: Option<CalendarDate>,
}

impl ChallengeState {
    /// A fresh challenge with nothing logged yet.
    pub fn new(duration_days: u16, start_date: CalendarDate, participant_name: &str) -> Self {
        ChallengeState {
            schema_version: SCHEMA_VERSION,
            duration_days,
            start_date,
            participant_name: participant_name.trim().to_string(),
            completed_dates: Vec::new(),
            notes: BTreeMap::new(),
            last_logged_date: None,
        }
    }

    pub fn is_completed(&self, date: CalendarDate) -> bool {
        self.completed_dates.contains(&date)
    }

    pub fn completed_count(&self) -> usize {
        self.completed_dates.len()
    }

    pub fn note_for(&self, date: CalendarDate) -> Option<&SessionNote> {
        self.notes.get(&date)
    }

    /// Serialize to the persisted JSON layout.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_else(|_| serde_json::Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persisted_layout_uses_camel_case_and_canonical_notes() {
        let start: CalendarDate = "2024-01-01".parse().unwrap();
        let at = Timestamp::parse("2024-01-01T07:00:00Z").unwrap();
        let mut state = ChallengeState::new(30, start, "  Kai ");
        state.completed_dates.push(start);
        state
            .notes
            .insert(start, SessionNote::new(start, "brisk", at));
        state.last_logged_date = Some(start);

        let json = state.to_json();
        assert_eq!(
            json,
            serde_json::json!({
                "schemaVersion": 1,
                "durationDays": 30,
                "startDate": "2024-01-01",
                "participantName": "Kai",
                "completedDates": ["2024-01-01"],
                "notes": {
                    "2024-01-01": {
                        "date": "2024-01-01",
                        "note": "brisk",
                        "createdAt": "2024-01-01T07:00:00Z",
                        "updatedAt": "2024-01-01T07:00:00Z"
                    }
                },
                "lastLoggedDate": "2024-01-01"
            })
        );
    }
}
