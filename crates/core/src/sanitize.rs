//! Pre-save normalization of an already-typed state.
//!
//! The front end may produce values the type system cannot rule out (a
//! duration typed in as 1000, a name of spaces, a date logged twice). This
//! pass repairs them the same way load-time validation would.

use crate::state::{ChallengeState, PLACEHOLDER_NAME, SCHEMA_VERSION};
use crate::validate::clamp_duration;

/// Re-apply the normalization rules to `state`.
///
/// Idempotent: `sanitize(sanitize(x)) == sanitize(x)`.
pub fn sanitize(mut state: ChallengeState) -> ChallengeState {
    state.schema_version = SCHEMA_VERSION;

    let duration = clamp_duration(i64::from(state.duration_days));
    if duration != state.duration_days {
        tracing::debug!(from = state.duration_days, to = duration, "clamped duration");
        state.duration_days = duration;
    }

    let trimmed = state.participant_name.trim();
    state.participant_name = if trimmed.is_empty() {
        tracing::debug!("blank participant name replaced");
        PLACEHOLDER_NAME.to_string()
    } else {
        trimmed.to_string()
    };

    let mut seen = Vec::with_capacity(state.completed_dates.len());
    state.completed_dates.retain(|date| {
        if seen.contains(date) {
            false
        } else {
            seen.push(*date);
            true
        }
    });

    for (date, note) in state.notes.iter_mut() {
        note.date = *date;
        if note.updated_at < note.created_at {
            note.updated_at = note.created_at;
        }
    }

    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::{CalendarDate, Timestamp};
    use crate::state::SessionNote;

    fn date(s: &str) -> CalendarDate {
        s.parse().unwrap()
    }

    fn messy() -> ChallengeState {
        let mut state = ChallengeState::new(1000, date("2024-01-01"), "x");
        state.participant_name = "   ".to_string();
        state.completed_dates = vec![
            date("2024-01-03"),
            date("2024-01-01"),
            date("2024-01-03"),
            date("2024-01-02"),
        ];
        let created = Timestamp::parse("2024-01-03T10:00:00Z").unwrap();
        let mut note = SessionNote::new(date("1999-01-01"), "mislabelled", created);
        note.updated_at = Timestamp::parse("2024-01-03T09:00:00Z").unwrap();
        state.notes.insert(date("2024-01-03"), note);
        state.schema_version = 0;
        state
    }

    #[test]
    fn repairs_every_rule() {
        let clean = sanitize(messy());
        assert_eq!(clean.duration_days, 365);
        assert_eq!(clean.participant_name, PLACEHOLDER_NAME);
        assert_eq!(
            clean.completed_dates,
            vec![date("2024-01-03"), date("2024-01-01"), date("2024-01-02")]
        );
        let note = &clean.notes[&date("2024-01-03")];
        assert_eq!(note.date, date("2024-01-03"));
        assert_eq!(note.updated_at, note.created_at);
        assert_eq!(clean.schema_version, SCHEMA_VERSION);
    }

    #[test]
    fn low_duration_is_raised() {
        let state = ChallengeState::new(0, date("2024-01-01"), "Robin");
        assert_eq!(sanitize(state).duration_days, 10);
    }

    #[test]
    fn is_idempotent() {
        let once = sanitize(messy());
        let twice = sanitize(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn leaves_clean_state_untouched() {
        let mut state = ChallengeState::new(30, date("2024-01-01"), "Robin");
        state.completed_dates.push(date("2024-01-01"));
        assert_eq!(sanitize(state.clone()), state);
    }
}
