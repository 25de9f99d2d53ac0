use tally_core::{action, CalendarDate};

use super::Session;

pub(crate) fn cmd_start(
    session: &Session,
    name: &str,
    days: i64,
    start: Option<CalendarDate>,
    force: bool,
) {
    if !force && session.load().is_some() {
        session.fail("a challenge is already in progress; pass --force to replace it");
    }

    let start_date = start.unwrap_or(session.clock.today);
    let state = match action::start_challenge(days, start_date, name) {
        Ok(s) => s,
        Err(e) => session.fail(&e.to_string()),
    };
    let state = session.save(&state);

    session.emit(
        &format!(
            "Started a {}-day challenge for {} on {}.",
            state.duration_days, state.participant_name, state.start_date
        ),
        &state.to_json(),
    );
}
