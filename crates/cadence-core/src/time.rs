//! Wall-clock time values.
//!
//! All times are naive local values with minute resolution. No timezone offset
//! is modeled anywhere in the engine.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

use crate::types::ValidationError;

/// Number of minutes in a calendar day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Day of the week an availability window recurs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    /// All days, Monday first.
    pub const ALL: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    /// Full English name, as stored by the availability source.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
        }
    }

    /// Three-letter abbreviation for compact output.
    #[must_use]
    pub fn short(self) -> &'static str {
        &self.as_str()[..3]
    }

    /// Weekday of a calendar date.
    pub fn of(date: NaiveDate) -> Self {
        date.weekday().into()
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Mon => Self::Monday,
            Weekday::Tue => Self::Tuesday,
            Weekday::Wed => Self::Wednesday,
            Weekday::Thu => Self::Thursday,
            Weekday::Fri => Self::Friday,
            Weekday::Sat => Self::Saturday,
            Weekday::Sun => Self::Sunday,
        }
    }
}

impl From<DayOfWeek> for Weekday {
    fn from(day: DayOfWeek) -> Self {
        match day {
            DayOfWeek::Monday => Self::Mon,
            DayOfWeek::Tuesday => Self::Tue,
            DayOfWeek::Wednesday => Self::Wed,
            DayOfWeek::Thursday => Self::Thu,
            DayOfWeek::Friday => Self::Fri,
            DayOfWeek::Saturday => Self::Sat,
            DayOfWeek::Sunday => Self::Sun,
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DayOfWeek {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|day| {
                lower == day.as_str().to_lowercase() || lower == day.short().to_lowercase()
            })
            .ok_or_else(|| ValidationError::UnknownDay {
                value: s.to_string(),
            })
    }
}

impl Serialize for DayOfWeek {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DayOfWeek {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A wall-clock instant with minute resolution.
///
/// Ordering and equality follow (year, month, day, hour, minute). Seconds are
/// always zero: anything finer is truncated when the value is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimePoint(NaiveDateTime);

impl TimePoint {
    /// Builds a time point from calendar fields.
    pub fn new(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
    ) -> Result<Self, ValidationError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(hour, minute, 0))
            .map(Self)
            .ok_or_else(|| ValidationError::InvalidTime {
                value: format!("{year:04}-{month:02}-{day:02}T{hour:02}:{minute:02}"),
            })
    }

    /// Wraps a chrono value, dropping seconds and sub-second precision.
    pub fn from_naive(value: NaiveDateTime) -> Self {
        let time = value.time();
        let truncated = value
            - Duration::seconds(i64::from(time.second()))
            - Duration::nanoseconds(i64::from(time.nanosecond()));
        Self(truncated)
    }

    /// The instant `minute_of_day` minutes after midnight on `date`.
    pub fn on(date: NaiveDate, minute_of_day: u32) -> Self {
        let midnight = date.and_time(NaiveTime::MIN);
        Self(saturating_add_minutes(midnight, minute_of_day))
    }

    /// Midnight at the start of `date`.
    pub fn start_of(date: NaiveDate) -> Self {
        Self::on(date, 0)
    }

    pub fn date(self) -> NaiveDate {
        self.0.date()
    }

    pub fn weekday(self) -> DayOfWeek {
        DayOfWeek::of(self.date())
    }

    pub fn hour(self) -> u32 {
        self.0.hour()
    }

    pub fn minute(self) -> u32 {
        self.0.minute()
    }

    /// Minutes since midnight: `hour * 60 + minute`.
    pub fn minute_of_day(self) -> u32 {
        self.hour() * 60 + self.minute()
    }

    /// This instant shifted forward by `minutes`.
    ///
    /// Saturates at the last representable minute instead of overflowing.
    #[must_use]
    pub fn plus_minutes(self, minutes: u32) -> Self {
        Self(saturating_add_minutes(self.0, minutes))
    }

    /// Same wall-clock time of day on another date.
    #[must_use]
    pub fn with_date(self, date: NaiveDate) -> Self {
        Self::on(date, self.minute_of_day())
    }

    pub const fn as_naive(self) -> NaiveDateTime {
        self.0
    }
}

impl From<NaiveDateTime> for TimePoint {
    fn from(value: NaiveDateTime) -> Self {
        Self::from_naive(value)
    }
}

impl fmt::Display for TimePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%dT%H:%M"))
    }
}

impl FromStr for TimePoint {
    type Err = ValidationError;

    /// Accepts `YYYY-MM-DDTHH:MM[:SS]`, the same with a space separator, or an
    /// RFC 3339 timestamp whose offset is discarded.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const FORMATS: [&str; 4] = [
            "%Y-%m-%dT%H:%M:%S%.f",
            "%Y-%m-%dT%H:%M",
            "%Y-%m-%d %H:%M:%S",
            "%Y-%m-%d %H:%M",
        ];

        let s = s.trim();
        for format in FORMATS {
            if let Ok(value) = NaiveDateTime::parse_from_str(s, format) {
                return Ok(Self::from_naive(value));
            }
        }
        if let Ok(value) = DateTime::parse_from_rfc3339(s) {
            return Ok(Self::from_naive(value.naive_local()));
        }
        Err(ValidationError::InvalidTime {
            value: s.to_string(),
        })
    }
}

impl TryFrom<String> for TimePoint {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimePoint> for String {
    fn from(value: TimePoint) -> Self {
        value.to_string()
    }
}

fn saturating_add_minutes(value: NaiveDateTime, minutes: u32) -> NaiveDateTime {
    value
        .checked_add_signed(Duration::minutes(i64::from(minutes)))
        .unwrap_or_else(|| TimePoint::from_naive(NaiveDateTime::MAX).0)
}

/// Parses an `HH:MM` clock string into minutes since midnight.
pub fn parse_clock(s: &str) -> Result<u32, ValidationError> {
    let time = NaiveTime::parse_from_str(s.trim(), "%H:%M").map_err(|_| {
        ValidationError::InvalidClock {
            value: s.to_string(),
        }
    })?;
    Ok(time.hour() * 60 + time.minute())
}

/// Formats minutes since midnight as `HH:MM`.
pub fn format_clock(minute_of_day: u32) -> String {
    format!("{:02}:{:02}", minute_of_day / 60, minute_of_day % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_of_week_roundtrips_through_strings() {
        for day in DayOfWeek::ALL {
            let parsed: DayOfWeek = day.to_string().parse().expect("should parse");
            assert_eq!(parsed, day);
        }
    }

    #[test]
    fn day_of_week_accepts_case_and_abbreviations() {
        assert_eq!("monday".parse::<DayOfWeek>().unwrap(), DayOfWeek::Monday);
        assert_eq!("SAT".parse::<DayOfWeek>().unwrap(), DayOfWeek::Saturday);
        assert_eq!(" Wed ".parse::<DayOfWeek>().unwrap(), DayOfWeek::Wednesday);
    }

    #[test]
    fn day_of_week_rejects_unknown() {
        let err = "Funday".parse::<DayOfWeek>().unwrap_err();
        assert_eq!(err.to_string(), "unknown day of week: Funday");
    }

    #[test]
    fn day_of_week_serializes_full_name() {
        let json = serde_json::to_string(&DayOfWeek::Thursday).unwrap();
        assert_eq!(json, "\"Thursday\"");
        let parsed: DayOfWeek = serde_json::from_str("\"thu\"").unwrap();
        assert_eq!(parsed, DayOfWeek::Thursday);
    }

    #[test]
    fn day_of_week_of_date() {
        // 2025-01-13 is a Monday
        let date = NaiveDate::from_ymd_opt(2025, 1, 13).unwrap();
        assert_eq!(DayOfWeek::of(date), DayOfWeek::Monday);
        assert_eq!(DayOfWeek::of(date + Duration::days(6)), DayOfWeek::Sunday);
    }

    #[test]
    fn time_point_rejects_impossible_dates() {
        assert!(TimePoint::new(2025, 2, 30, 10, 0).is_err());
        assert!(TimePoint::new(2025, 1, 1, 24, 0).is_err());
        assert!(TimePoint::new(2025, 1, 1, 23, 59).is_ok());
    }

    #[test]
    fn time_point_orders_by_fields() {
        let a = TimePoint::new(2025, 1, 13, 9, 0).unwrap();
        let b = TimePoint::new(2025, 1, 13, 9, 1).unwrap();
        let c = TimePoint::new(2025, 1, 14, 0, 0).unwrap();
        assert!(a < b);
        assert!(b < c);
        assert_eq!(a, TimePoint::new(2025, 1, 13, 9, 0).unwrap());
    }

    #[test]
    fn time_point_truncates_seconds() {
        let parsed: TimePoint = "2025-01-13T09:15:42".parse().unwrap();
        assert_eq!(parsed, TimePoint::new(2025, 1, 13, 9, 15).unwrap());
    }

    #[test]
    fn time_point_parses_rfc3339_as_wall_clock() {
        let parsed: TimePoint = "2025-01-13T09:15:00Z".parse().unwrap();
        assert_eq!(parsed.to_string(), "2025-01-13T09:15");

        let parsed: TimePoint = "2025-01-13T09:15:00+02:00".parse().unwrap();
        assert_eq!(parsed.to_string(), "2025-01-13T09:15");
    }

    #[test]
    fn time_point_parses_space_separator() {
        let parsed: TimePoint = "2025-01-13 18:00".parse().unwrap();
        assert_eq!(parsed, TimePoint::new(2025, 1, 13, 18, 0).unwrap());
    }

    #[test]
    fn time_point_rejects_garbage() {
        let err = "next tuesday".parse::<TimePoint>().unwrap_err();
        assert_eq!(err.to_string(), "invalid time: next tuesday");
    }

    #[test]
    fn time_point_serde_roundtrip() {
        let t = TimePoint::new(2025, 1, 13, 7, 5).unwrap();
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, "\"2025-01-13T07:05\"");
        let parsed: TimePoint = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, t);
    }

    #[test]
    fn minute_of_day_and_shifts() {
        let t = TimePoint::new(2025, 1, 13, 23, 30).unwrap();
        assert_eq!(t.minute_of_day(), 23 * 60 + 30);

        let next = t.plus_minutes(45);
        assert_eq!(next, TimePoint::new(2025, 1, 14, 0, 15).unwrap());
        assert_eq!(next.weekday(), DayOfWeek::Tuesday);
    }

    #[test]
    fn shifts_saturate_at_the_last_minute() {
        let last = TimePoint::from_naive(NaiveDateTime::MAX);
        assert_eq!(last.plus_minutes(90), last);
        assert_eq!(TimePoint::on(NaiveDate::MAX, 2 * MINUTES_PER_DAY), last);

        let near_end = TimePoint::from_naive(last.as_naive() - Duration::minutes(10));
        assert_eq!(near_end.plus_minutes(60), last);
    }

    #[test]
    fn with_date_keeps_time_of_day() {
        let t = TimePoint::new(2025, 1, 8, 18, 0).unwrap();
        let moved = t.with_date(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());
        assert_eq!(moved, TimePoint::new(2025, 1, 15, 18, 0).unwrap());
    }

    #[test]
    fn clock_strings() {
        assert_eq!(parse_clock("09:30").unwrap(), 570);
        assert_eq!(parse_clock("00:00").unwrap(), 0);
        assert_eq!(parse_clock("23:59").unwrap(), 1439);
        assert!(parse_clock("24:00").is_err());
        assert!(parse_clock("noon").is_err());
        assert_eq!(format_clock(570), "09:30");
        assert_eq!(format_clock(0), "00:00");
    }
}
