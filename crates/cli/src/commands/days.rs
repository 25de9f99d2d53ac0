use tally_core::calendar::challenge_days;

use super::Session;

pub(crate) fn cmd_days(session: &Session) {
    let state = session.require_state();
    let days = challenge_days(&state);
    let today = session.clock.today;

    let lines: Vec<String> = days
        .iter()
        .map(|day| {
            let mark = if day.completed {
                "[x]"
            } else if day.date > today {
                "   "
            } else {
                "[ ]"
            };
            let mut line = format!("{:>3}  {}  {}", day.index, day.date, mark);
            if let Some(note) = day.note.filter(|n| !n.note.is_empty()) {
                line.push_str("  ");
                line.push_str(&note.note);
            }
            line
        })
        .collect();

    session.emit(
        &lines.join("\n"),
        &serde_json::to_value(&days).unwrap_or_default(),
    );
}
