use tally_core::{action, Progress};

use super::Session;

pub(crate) fn cmd_duration(session: &Session, days: i64) {
    let state = session.require_state();
    let next = match action::change_duration(&state, days) {
        Ok(s) => session.save(&s),
        Err(e) => session.fail(&e.to_string()),
    };
    let progress = Progress::of(&next, session.clock.today);
    session.emit(
        &format!(
            "Challenge is now {} days ({} left).",
            next.duration_days,
            progress.days_left.max(0)
        ),
        &serde_json::json!({
            "durationDays": next.duration_days,
            "progress": progress,
        }),
    );
}
