//! Streak and progress figures derived from the canonical state.

use serde::Serialize;

use crate::date::CalendarDate;
use crate::state::ChallengeState;

/// Consecutive logged days ending at the most recent logged date.
///
/// The streak is alive only if the most recent date is today or yesterday;
/// otherwise it is 0. Input order does not matter, but duplicates count as a
/// break, so pass a deduplicated set.
pub fn current_streak(completed_dates: &[CalendarDate], today: CalendarDate) -> u32 {
    let mut sorted = completed_dates.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));

    let Some(latest) = sorted.first() else {
        return 0;
    };
    if latest.days_until(today) > 1 {
        return 0;
    }

    let mut streak = 1;
    for pair in sorted.windows(2) {
        if pair[1].days_until(pair[0]) == 1 {
            streak += 1;
        } else {
            break;
        }
    }
    streak
}

/// Percentage of the challenge completed. Not clamped: a state with more
/// logged days than its duration reports over 100.
pub fn percent_complete(completed: usize, duration_days: u16) -> f64 {
    if duration_days == 0 {
        return 0.0;
    }
    100.0 * completed as f64 / f64::from(duration_days)
}

/// Days still to log. Negative if more days were logged than the duration.
pub fn days_left(completed: usize, duration_days: u16) -> i64 {
    i64::from(duration_days) - completed as i64
}

/// Summary figures for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub completed: usize,
    pub duration_days: u16,
    pub percent_complete: f64,
    pub days_left: i64,
    pub streak: u32,
}

impl Progress {
    pub fn of(state: &ChallengeState, today: CalendarDate) -> Self {
        let completed = state.completed_count();
        Progress {
            completed,
            duration_days: state.duration_days,
            percent_complete: percent_complete(completed, state.duration_days),
            days_left: days_left(completed, state.duration_days),
            streak: current_streak(&state.completed_dates, today),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dates(list: &[&str]) -> Vec<CalendarDate> {
        list.iter().map(|s| s.parse().unwrap()).collect()
    }

    fn today() -> CalendarDate {
        "2024-03-10".parse().unwrap()
    }

    #[test]
    fn streak_ending_today() {
        let d = dates(&["2024-03-10", "2024-03-09", "2024-03-08"]);
        assert_eq!(current_streak(&d, today()), 3);
    }

    #[test]
    fn streak_ending_yesterday_is_alive() {
        let d = dates(&["2024-03-07", "2024-03-09", "2024-03-08"]);
        assert_eq!(current_streak(&d, today()), 3);
    }

    #[test]
    fn stale_streak_is_zero() {
        assert_eq!(current_streak(&dates(&["2024-03-07"]), today()), 0);
        assert_eq!(current_streak(&[], today()), 0);
    }

    #[test]
    fn streak_stops_at_first_gap() {
        let d = dates(&["2024-03-10", "2024-03-09", "2024-03-06", "2024-03-05"]);
        assert_eq!(current_streak(&d, today()), 2);
    }

    #[test]
    fn streak_ignores_insertion_order() {
        let a = dates(&["2024-03-08", "2024-03-10", "2024-03-09"]);
        let b = dates(&["2024-03-10", "2024-03-09", "2024-03-08"]);
        assert_eq!(current_streak(&a, today()), current_streak(&b, today()));
    }

    #[test]
    fn progress_figures() {
        assert_eq!(percent_complete(3, 30), 10.0);
        assert_eq!(days_left(3, 30), 27);
        assert_eq!(percent_complete(12, 10), 120.0);
        assert_eq!(days_left(12, 10), -2);
    }

    #[test]
    fn progress_summary() {
        let mut state = ChallengeState::new(20, "2024-03-01".parse().unwrap(), "Robin");
        state.completed_dates = dates(&["2024-03-08", "2024-03-09", "2024-03-10"]);
        let p = Progress::of(&state, today());
        assert_eq!(p.completed, 3);
        assert_eq!(p.percent_complete, 15.0);
        assert_eq!(p.days_left, 17);
        assert_eq!(p.streak, 3);
    }
}
