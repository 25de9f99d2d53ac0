use tally_core::calendar::{day_index_for_date, is_challenge_day};
use tally_core::milestone::next_milestone;
use tally_core::Progress;

use super::Session;

pub(crate) fn cmd_status(session: &Session) {
    let state = session.require_state();
    let today = session.clock.today;
    let progress = Progress::of(&state, today);
    let day_index = day_index_for_date(state.start_date, today);
    let logged_today = state.is_completed(today);
    let next = next_milestone(progress.percent_complete);

    let mut text = String::new();
    let position = if is_challenge_day(day_index, state.duration_days) {
        format!("day {} of {}", day_index, state.duration_days)
    } else if day_index < 1 {
        format!("starts {}", state.start_date)
    } else {
        "challenge period over".to_string()
    };
    text.push_str(&format!("{}: {}\n", state.participant_name, position));
    text.push_str(&format!(
        "Completed: {}/{} ({:.1}%)\n",
        progress.completed, progress.duration_days, progress.percent_complete
    ));
    text.push_str(&format!("Days left: {}\n", progress.days_left.max(0)));
    text.push_str(&format!("Streak:    {}\n", progress.streak));
    text.push_str(&format!(
        "Today:     {}",
        if logged_today { "done" } else { "not logged yet" }
    ));
    if let Some(m) = next {
        text.push_str(&format!(
            "\nNext milestone: {} ({}%)",
            m.name, m.required_progress
        ));
    }

    let json = serde_json::json!({
        "participantName": state.participant_name,
        "startDate": state.start_date,
        "today": today,
        "dayIndex": day_index,
        "loggedToday": logged_today,
        "lastLoggedDate": state.last_logged_date,
        "progress": progress,
        "nextMilestone": next,
    });
    session.emit(&text, &json);
}
