use tally_core::{action, CalendarDate, ChallengeState, Progress};

use super::Session;

pub(crate) fn cmd_log(session: &Session, note: Option<&str>) {
    let state = session.require_state();
    match action::log_today(&state, note, &session.clock) {
        Ok(next) => report_logged(session, session.clock.today, &session.save(&next)),
        Err(e) => session.fail(&e.to_string()),
    }
}

pub(crate) fn cmd_log_past(session: &Session, date: CalendarDate, note: Option<&str>) {
    let state = session.require_state();
    match action::log_past_date(&state, date, note, &session.clock) {
        Ok(next) => report_logged(session, date, &session.save(&next)),
        Err(e) => session.fail(&e.to_string()),
    }
}

fn report_logged(session: &Session, date: CalendarDate, state: &ChallengeState) {
    let progress = Progress::of(state, session.clock.today);
    session.emit(
        &format!(
            "Logged {}. {}/{} days done, streak {}.",
            date, progress.completed, progress.duration_days, progress.streak
        ),
        &serde_json::json!({
            "logged": date,
            "progress": progress,
        }),
    );
}

pub(crate) fn cmd_delete(session: &Session, date: CalendarDate) {
    let state = session.require_state();
    let next = match action::delete_date(&state, date) {
        Ok(s) => session.save(&s),
        Err(e) => session.fail(&e.to_string()),
    };
    session.emit(
        &format!("Removed {}.", date),
        &serde_json::json!({
            "removed": date,
            "lastLoggedDate": next.last_logged_date,
        }),
    );
}
