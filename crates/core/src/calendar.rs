//! Mapping between 1-based challenge days and calendar dates.
//!
//! Day 1 is the start date. All arithmetic is on calendar dates, so results do
//! not move across time-zone or daylight-saving changes.

use serde::Serialize;

use crate::date::CalendarDate;
use crate::state::{ChallengeState, SessionNote};

/// The calendar date of challenge day `day_index` (1-based).
///
/// Indexes outside the challenge are still mapped; `None` is returned only if
/// the date would leave the supported calendar.
pub fn date_for_day(start: CalendarDate, day_index: i64) -> Option<CalendarDate> {
    start.add_days(day_index.checked_sub(1)?)
}

/// The 1-based challenge day that `date` falls on. Dates before the start
/// give indexes below 1.
pub fn day_index_for_date(start: CalendarDate, date: CalendarDate) -> i64 {
    start.days_until(date) + 1
}

/// Whether `day_index` is one of the challenge's days.
pub fn is_challenge_day(day_index: i64, duration_days: u16) -> bool {
    (1..=i64::from(duration_days)).contains(&day_index)
}

/// Whether `date` falls inside a challenge of `duration_days` starting at
/// `start`.
pub fn is_within_challenge(start: CalendarDate, duration_days: u16, date: CalendarDate) -> bool {
    is_challenge_day(day_index_for_date(start, date), duration_days)
}

/// The completed date that maps to `day_index`, if any.
pub fn completed_date_for_day(state: &ChallengeState, day_index: i64) -> Option<CalendarDate> {
    state
        .completed_dates
        .iter()
        .copied()
        .find(|date| day_index_for_date(state.start_date, *date) == day_index)
}

pub fn is_day_completed(state: &ChallengeState, day_index: i64) -> bool {
    completed_date_for_day(state, day_index).is_some()
}

/// One cell of the challenge grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChallengeDay<'a> {
    pub index: i64,
    pub date: CalendarDate,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<&'a SessionNote>,
}

/// Every day of the challenge, in order, with its completion status and the
/// note logged for it.
pub fn challenge_days(state: &ChallengeState) -> Vec<ChallengeDay<'_>> {
    (1..=i64::from(state.duration_days))
        .filter_map(|index| {
            let date = date_for_day(state.start_date, index)?;
            let completed = completed_date_for_day(state, index);
            Some(ChallengeDay {
                index,
                date,
                completed: completed.is_some(),
                note: completed.and_then(|d| state.note_for(d)),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::Timestamp;

    fn date(s: &str) -> CalendarDate {
        s.parse().unwrap()
    }

    #[test]
    fn maps_days_to_dates() {
        let start = date("2024-01-01");
        assert_eq!(date_for_day(start, 1), Some(date("2024-01-01")));
        assert_eq!(date_for_day(start, 5), Some(date("2024-01-05")));
        assert_eq!(date_for_day(start, 32), Some(date("2024-02-01")));
        assert_eq!(date_for_day(start, 0), Some(date("2023-12-31")));
    }

    #[test]
    fn round_trips_every_challenge_day() {
        let start = date("2024-01-01");
        for k in 1..=365 {
            let d = date_for_day(start, k).unwrap();
            assert_eq!(day_index_for_date(start, d), k);
        }
    }

    #[test]
    fn round_trips_across_leap_day_and_dst_dates() {
        let start = date("2024-02-20");
        for k in 1..=60 {
            let d = date_for_day(start, k).unwrap();
            assert_eq!(day_index_for_date(start, d), k);
        }
        assert_eq!(day_index_for_date(start, date("2024-03-01")), 11);
    }

    #[test]
    fn out_of_range_indexes_are_not_errors() {
        let start = date("2024-01-01");
        assert_eq!(day_index_for_date(start, date("2023-12-30")), -1);
        assert!(!is_challenge_day(0, 30));
        assert!(!is_challenge_day(31, 30));
        assert!(is_challenge_day(30, 30));
        assert!(is_within_challenge(start, 10, date("2024-01-10")));
        assert!(!is_within_challenge(start, 10, date("2024-01-11")));
    }

    #[test]
    fn grid_marks_completed_days_and_notes() {
        let start = date("2024-01-01");
        let mut state = ChallengeState::new(10, start, "Robin");
        state.completed_dates = vec![date("2024-01-03"), date("2024-01-01")];
        let at = Timestamp::parse("2024-01-03T08:00:00Z").unwrap();
        state.notes.insert(
            date("2024-01-03"),
            SessionNote::new(date("2024-01-03"), "icy", at),
        );

        let days = challenge_days(&state);
        assert_eq!(days.len(), 10);
        assert!(days[0].completed);
        assert!(!days[1].completed);
        assert!(days[2].completed);
        assert_eq!(days[2].note.map(|n| n.note.as_str()), Some("icy"));
        assert_eq!(days[9].date, date("2024-01-10"));
        assert!(is_day_completed(&state, 3));
        assert_eq!(completed_date_for_day(&state, 1), Some(start));
    }
}
