//! Calendar dates and timestamps.
//!
//! Challenge progress is tracked per calendar day. A [`CalendarDate`] carries
//! no time of day and no offset, so day arithmetic is immune to time-zone and
//! daylight-saving shifts. [`Timestamp`] is only used for note bookkeeping.
//!
//! Nothing in this module reads the system clock: "today" and "now" always
//! arrive through a [`Clock`] built by the caller.

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, Duration, Month, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};

// ──────────────────────────────────────────────
// CalendarDate
// ──────────────────────────────────────────────

/// A date with no time-of-day component, written as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(Date);

/// Error returned when a string is not a recognizable calendar date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDateError {
    pub input: String,
}

impl fmt::Display for ParseDateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a calendar date (expected YYYY-MM-DD)", self.input)
    }
}

impl std::error::Error for ParseDateError {}

impl CalendarDate {
    /// Build a date from its parts. Returns `None` for impossible dates.
    pub fn from_ymd(year: i32, month: u8, day: u8) -> Option<Self> {
        let month = Month::try_from(month).ok()?;
        Date::from_calendar_date(year, month, day).ok().map(Self)
    }

    /// Parse a stored date value.
    ///
    /// Accepts `YYYY-MM-DD` and date-time strings (RFC 3339, or an ISO
    /// date-time without offset). Date-times are reduced to the calendar date
    /// as written; no time-zone conversion is applied.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if let Ok(date) = Date::parse(input, format_description!("[year]-[month]-[day]")) {
            return Some(Self(date));
        }
        if let Ok(datetime) = OffsetDateTime::parse(input, &Rfc3339) {
            return Some(Self(datetime.date()));
        }
        PrimitiveDateTime::parse(
            input,
            format_description!(
                "[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]"
            ),
        )
        .ok()
        .map(|datetime| Self(datetime.date()))
    }

    /// The date `days` calendar days after this one (negative moves back).
    ///
    /// Returns `None` when the result falls outside the supported calendar.
    pub fn add_days(self, days: i64) -> Option<Self> {
        self.0.checked_add(Duration::days(days)).map(Self)
    }

    /// Whole calendar days from `self` to `later` (negative if `later` is
    /// earlier).
    pub fn days_until(self, later: CalendarDate) -> i64 {
        (later.0 - self.0).whole_days()
    }

    pub fn year(self) -> i32 {
        self.0.year()
    }

    pub fn month(self) -> u8 {
        self.0.month() as u8
    }

    pub fn day(self) -> u8 {
        self.0.day()
    }

    /// Midnight UTC on this date.
    pub fn start_of_day(self) -> Timestamp {
        Timestamp(PrimitiveDateTime::new(self.0, Time::MIDNIGHT).assume_utc())
    }
}

impl From<Date> for CalendarDate {
    fn from(date: Date) -> Self {
        Self(date)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.0.year(),
            self.0.month() as u8,
            self.0.day()
        )
    }
}

impl FromStr for CalendarDate {
    type Err = ParseDateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ParseDateError {
            input: s.to_string(),
        })
    }
}

impl Serialize for CalendarDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

// ──────────────────────────────────────────────
// Timestamp
// ──────────────────────────────────────────────

/// An instant, normalized to UTC and written as RFC 3339.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(OffsetDateTime);

impl Timestamp {
    /// Wrap an instant. Returns `None` if its UTC year cannot be written as
    /// RFC 3339 (outside 0000..=9999).
    pub fn new(instant: OffsetDateTime) -> Option<Self> {
        let utc = instant.to_offset(UtcOffset::UTC);
        (0..=9999).contains(&utc.year()).then_some(Self(utc))
    }

    pub fn parse(input: &str) -> Option<Self> {
        OffsetDateTime::parse(input.trim(), &Rfc3339)
            .ok()
            .and_then(Self::new)
    }

    /// Unix epoch milliseconds, the form older clients stored numerically.
    pub fn from_unix_millis(millis: i64) -> Option<Self> {
        OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000)
            .ok()
            .and_then(Self::new)
    }

    /// Read a stored timestamp: an RFC 3339 string or epoch milliseconds.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(s) => Self::parse(s),
            serde_json::Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
                .and_then(Self::from_unix_millis),
            _ => None,
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let formatted = self.0.format(&Rfc3339).map_err(|_| fmt::Error)?;
        f.write_str(&formatted)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw)
            .ok_or_else(|| de::Error::custom(format!("'{}' is not an RFC 3339 timestamp", raw)))
    }
}

// ──────────────────────────────────────────────
// Clock
// ──────────────────────────────────────────────

/// The caller's notion of "today" and "now".
///
/// Validation uses `today` as the default start date and `now` to stamp
/// notes migrated from shapes that never recorded a creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clock {
    pub today: CalendarDate,
    pub now: Timestamp,
}

impl Clock {
    /// Read today's date from `instant` in its own offset, so a local time
    /// yields the local calendar day.
    pub fn from_instant(instant: OffsetDateTime) -> Option<Self> {
        Some(Clock {
            today: CalendarDate::from(instant.date()),
            now: Timestamp::new(instant)?,
        })
    }

    /// A clock frozen at midnight UTC of `today`.
    pub fn fixed(today: CalendarDate) -> Self {
        Clock {
            today,
            now: today.start_of_day(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> CalendarDate {
        s.parse().unwrap()
    }

    #[test]
    fn parses_plain_dates() {
        let d = date("2024-03-10");
        assert_eq!((d.year(), d.month(), d.day()), (2024, 3, 10));
        assert_eq!(d.to_string(), "2024-03-10");
    }

    #[test]
    fn parses_legacy_iso_datetimes_as_written() {
        assert_eq!(date("2024-01-01T23:30:00.000Z"), date("2024-01-01"));
        assert_eq!(date("2024-01-01T23:30:00+09:00"), date("2024-01-01"));
        assert_eq!(date("2024-01-01T08:15:00"), date("2024-01-01"));
    }

    #[test]
    fn rejects_garbage_and_impossible_dates() {
        for bad in ["", "not-a-date", "2024-02-30", "2024-13-01", "2024-1-5", "20240101"] {
            assert!(CalendarDate::parse(bad).is_none(), "accepted {bad:?}");
        }
    }

    #[test]
    fn day_arithmetic_crosses_month_and_leap_boundaries() {
        assert_eq!(date("2024-02-28").add_days(1), Some(date("2024-02-29")));
        assert_eq!(date("2024-02-29").add_days(1), Some(date("2024-03-01")));
        assert_eq!(date("2024-03-01").add_days(-1), Some(date("2024-02-29")));
        assert_eq!(date("2023-12-31").days_until(date("2024-01-01")), 1);
        assert_eq!(date("2024-03-10").days_until(date("2024-03-07")), -3);
        // 2024-03-10 is a DST change day in many zones; date math ignores it.
        assert_eq!(date("2024-03-09").days_until(date("2024-03-11")), 2);
    }

    #[test]
    fn timestamps_accept_rfc3339_and_epoch_millis() {
        let a = Timestamp::parse("2024-01-01T10:00:00.000Z").unwrap();
        let b = Timestamp::from_json(&serde_json::json!(1_704_103_200_000_i64)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "2024-01-01T10:00:00Z");

        let offset = Timestamp::parse("2024-01-01T12:00:00+02:00").unwrap();
        assert_eq!(offset, a);
        assert!(Timestamp::parse("yesterday").is_none());
        assert!(Timestamp::from_json(&serde_json::json!(true)).is_none());
    }

    #[test]
    fn serde_uses_string_forms() {
        let json = serde_json::to_value(date("2024-01-05")).unwrap();
        assert_eq!(json, serde_json::json!("2024-01-05"));
        let back: CalendarDate = serde_json::from_value(json).unwrap();
        assert_eq!(back, date("2024-01-05"));
    }

    #[test]
    fn clock_uses_the_instant_local_day() {
        let clock = Clock::from_instant(time::macros::datetime!(2024-01-01 23:30 -5)).unwrap();
        assert_eq!(clock.today, date("2024-01-01"));
        assert_eq!(clock.now.to_string(), "2024-01-02T04:30:00Z");
    }
}
