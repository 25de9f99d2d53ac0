use tally_core::{action, CalendarDate, ChallengeState};

use super::Session;

pub(crate) fn cmd_note(session: &Session, date: Option<CalendarDate>, text: &str) {
    let state = session.require_state();
    let date = date.unwrap_or(session.clock.today);
    match action::save_note(&state, date, text, session.clock.now) {
        Ok(next) => report_note(session, "Saved", date, &session.save(&next)),
        Err(e) => session.fail(&e.to_string()),
    }
}

pub(crate) fn cmd_edit_note(session: &Session, date: CalendarDate, text: &str) {
    let state = session.require_state();
    match action::edit_note(&state, date, text, session.clock.now) {
        Ok(next) => report_note(session, "Updated", date, &session.save(&next)),
        Err(e) => session.fail(&e.to_string()),
    }
}

fn report_note(session: &Session, verb: &str, date: CalendarDate, state: &ChallengeState) {
    let json = match state.note_for(date) {
        Some(note) => serde_json::to_value(note).unwrap_or_default(),
        None => serde_json::Value::Null,
    };
    session.emit(&format!("{} note for {}.", verb, date), &json);
}
