//! User actions that produce a new challenge state.
//!
//! Every action reads the current state, builds a modified copy, and returns
//! it sanitized; the input is never edited in place. Unlike load-time
//! validation, a rejected action has no safe default, so it fails with an
//! [`ActionError`] and the caller keeps the previous state.

use crate::date::{CalendarDate, Clock, Timestamp};
use crate::sanitize::sanitize;
use crate::state::{ChallengeState, SessionNote, MAX_DURATION_DAYS, MIN_DURATION_DAYS};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    /// Requested duration is outside the allowed range.
    #[error("challenge duration must be between {min} and {max} days, got {requested}")]
    DurationOutOfRange { requested: i64, min: u16, max: u16 },

    /// Requested duration is shorter than the days already logged.
    #[error("new duration ({requested} days) cannot be less than the {completed} days already completed")]
    DurationBelowCompleted { requested: u16, completed: usize },

    #[error("participant name must not be blank")]
    BlankName,

    #[error("{date} is already logged")]
    AlreadyLogged { date: CalendarDate },

    #[error("cannot log {date}: the challenge starts on {start}")]
    BeforeStart {
        date: CalendarDate,
        start: CalendarDate,
    },

    #[error("cannot log {date}: it is after today ({today})")]
    InFuture {
        date: CalendarDate,
        today: CalendarDate,
    },

    #[error("{date} is not logged")]
    NotLogged { date: CalendarDate },

    #[error("note text must not be blank")]
    BlankNote,

    #[error("there is no note for {date}")]
    NoteNotFound { date: CalendarDate },
}

fn check_duration(requested: i64) -> Result<u16, ActionError> {
    if (i64::from(MIN_DURATION_DAYS)..=i64::from(MAX_DURATION_DAYS)).contains(&requested) {
        Ok(requested as u16)
    } else {
        Err(ActionError::DurationOutOfRange {
            requested,
            min: MIN_DURATION_DAYS,
            max: MAX_DURATION_DAYS,
        })
    }
}

/// Begin a new challenge.
pub fn start_challenge(
    duration_days: i64,
    start_date: CalendarDate,
    participant_name: &str,
) -> Result<ChallengeState, ActionError> {
    let duration_days = check_duration(duration_days)?;
    if participant_name.trim().is_empty() {
        return Err(ActionError::BlankName);
    }
    tracing::info!(duration_days, %start_date, "challenge started");
    Ok(sanitize(ChallengeState::new(
        duration_days,
        start_date,
        participant_name,
    )))
}

/// Mark today complete, optionally with a note.
pub fn log_today(
    state: &ChallengeState,
    note: Option<&str>,
    clock: &Clock,
) -> Result<ChallengeState, ActionError> {
    if state.is_completed(clock.today) {
        return Err(ActionError::AlreadyLogged { date: clock.today });
    }
    Ok(record(state, clock.today, note, clock.now))
}

/// Mark an earlier day complete. The date must lie between the start date and
/// today, inclusive.
pub fn log_past_date(
    state: &ChallengeState,
    date: CalendarDate,
    note: Option<&str>,
    clock: &Clock,
) -> Result<ChallengeState, ActionError> {
    if date < state.start_date {
        return Err(ActionError::BeforeStart {
            date,
            start: state.start_date,
        });
    }
    if date > clock.today {
        return Err(ActionError::InFuture {
            date,
            today: clock.today,
        });
    }
    if state.is_completed(date) {
        return Err(ActionError::AlreadyLogged { date });
    }
    Ok(record(state, date, note, clock.now))
}

fn record(
    state: &ChallengeState,
    date: CalendarDate,
    note: Option<&str>,
    now: Timestamp,
) -> ChallengeState {
    let mut next = state.clone();
    next.completed_dates.push(date);
    if let Some(text) = note.map(str::trim).filter(|t| !t.is_empty()) {
        upsert_note(&mut next, date, text, now);
    }
    next.last_logged_date = next.completed_dates.iter().copied().max();
    tracing::info!(%date, completed = next.completed_dates.len(), "day logged");
    sanitize(next)
}

/// Create or replace the note for `date`. Blank text is rejected.
pub fn save_note(
    state: &ChallengeState,
    date: CalendarDate,
    text: &str,
    now: Timestamp,
) -> Result<ChallengeState, ActionError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ActionError::BlankNote);
    }
    let mut next = state.clone();
    upsert_note(&mut next, date, text, now);
    Ok(sanitize(next))
}

/// Change the text of an existing note. The text may be empty.
pub fn edit_note(
    state: &ChallengeState,
    date: CalendarDate,
    text: &str,
    now: Timestamp,
) -> Result<ChallengeState, ActionError> {
    if !state.notes.contains_key(&date) {
        return Err(ActionError::NoteNotFound { date });
    }
    let mut next = state.clone();
    upsert_note(&mut next, date, text.trim(), now);
    Ok(sanitize(next))
}

fn upsert_note(state: &mut ChallengeState, date: CalendarDate, text: &str, now: Timestamp) {
    state
        .notes
        .entry(date)
        .and_modify(|existing| {
            existing.note = text.to_string();
            existing.updated_at = now;
        })
        .or_insert_with(|| SessionNote::new(date, text, now));
}

/// Remove a logged date and its note.
pub fn delete_date(
    state: &ChallengeState,
    date: CalendarDate,
) -> Result<ChallengeState, ActionError> {
    if !state.is_completed(date) {
        return Err(ActionError::NotLogged { date });
    }
    let mut next = state.clone();
    next.completed_dates.retain(|d| *d != date);
    next.notes.remove(&date);
    next.last_logged_date = next.completed_dates.iter().copied().max();
    tracing::info!(%date, "logged day removed");
    Ok(sanitize(next))
}

/// Change the challenge length.
///
/// This is the only place the completed-count bound is enforced: the new
/// duration must be within range and not below the number of logged days.
pub fn change_duration(
    state: &ChallengeState,
    requested: i64,
) -> Result<ChallengeState, ActionError> {
    let duration_days = check_duration(requested)?;
    let completed = state.completed_count();
    if usize::from(duration_days) < completed {
        return Err(ActionError::DurationBelowCompleted {
            requested: duration_days,
            completed,
        });
    }
    let mut next = state.clone();
    next.duration_days = duration_days;
    tracing::info!(duration_days, "challenge duration changed");
    Ok(sanitize(next))
}
