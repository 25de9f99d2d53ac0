use tally_core::milestone::{milestone_statuses, MilestoneStatus};
use tally_core::Progress;

use super::Session;

pub(crate) fn cmd_milestones(session: &Session) {
    let state = session.require_state();
    let percent = Progress::of(&state, session.clock.today).percent_complete;
    let statuses = milestone_statuses(percent);

    let text = statuses
        .iter()
        .map(|(m, status)| {
            let mark = match status {
                MilestoneStatus::Achieved => "[x]",
                MilestoneStatus::Next => "[>]",
                MilestoneStatus::Locked => "[ ]",
            };
            format!(
                "{} {:>3}%  {}: {}",
                mark, m.required_progress, m.name, m.description
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let json: Vec<serde_json::Value> = statuses
        .iter()
        .map(|(m, status)| {
            serde_json::json!({
                "id": m.id,
                "name": m.name,
                "description": m.description,
                "requiredProgress": m.required_progress,
                "status": status,
            })
        })
        .collect();
    session.emit(&text, &serde_json::Value::Array(json));
}
