//! Progress milestones.

use serde::Serialize;

/// A named progress threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Percent complete needed to reach this milestone.
    pub required_progress: u8,
}

/// All milestones, in ascending order of `required_progress`.
pub const MILESTONES: [Milestone; 5] = [
    Milestone {
        id: "ice-breaker",
        name: "Ice Breaker",
        description: "Started your challenge journey",
        required_progress: 10,
    },
    Milestone {
        id: "frost-walker",
        name: "Frost Walker",
        description: "25% of your challenge completed",
        required_progress: 25,
    },
    Milestone {
        id: "cold-warrior",
        name: "Cold Warrior",
        description: "Halfway through your challenge",
        required_progress: 50,
    },
    Milestone {
        id: "ice-master",
        name: "Ice Master",
        description: "75% of your challenge mastered",
        required_progress: 75,
    },
    Milestone {
        id: "frost-legend",
        name: "Frost Legend",
        description: "Challenge completed!",
        required_progress: 100,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneStatus {
    Achieved,
    /// The lowest milestone not yet reached, once any progress exists.
    Next,
    Locked,
}

/// The milestone that comes next at `percent` progress, if any remain.
pub fn next_milestone(percent: f64) -> Option<&'static Milestone> {
    MILESTONES
        .iter()
        .find(|m| f64::from(m.required_progress) > percent)
}

pub fn milestone_status(milestone: &Milestone, percent: f64) -> MilestoneStatus {
    if percent >= f64::from(milestone.required_progress) {
        MilestoneStatus::Achieved
    } else if percent > 0.0 && next_milestone(percent).is_some_and(|next| next.id == milestone.id)
    {
        MilestoneStatus::Next
    } else {
        MilestoneStatus::Locked
    }
}

/// Every milestone paired with its status at `percent` progress.
pub fn milestone_statuses(percent: f64) -> Vec<(&'static Milestone, MilestoneStatus)> {
    MILESTONES
        .iter()
        .map(|m| (m, milestone_status(m, percent)))
        .collect()
}
