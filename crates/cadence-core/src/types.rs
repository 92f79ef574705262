//! Core type definitions with validation.

use std::fmt;
use std::num::NonZeroU32;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::interval::Interval;
use crate::time::{DayOfWeek, MINUTES_PER_DAY, TimePoint, format_clock, parse_clock};

/// Validation errors for core types.
///
/// These are raised where values enter the engine, so the scheduling
/// functions themselves only ever see well-formed inputs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// A date/time string or set of calendar fields does not name a real instant.
    #[error("invalid time: {value}")]
    InvalidTime { value: String },

    /// A clock string was not `HH:MM`.
    #[error("invalid clock time (expected HH:MM): {value}")]
    InvalidClock { value: String },

    /// A weekday label was not recognised.
    #[error("unknown day of week: {value}")]
    UnknownDay { value: String },

    /// A minute-of-day value was outside `[0, 1440)`.
    #[error("minute of day must be below 1440, got {minute}")]
    MinuteOutOfRange { minute: u32 },

    /// An availability window does not start before it ends.
    #[error("availability window must start before it ends ({start} >= {end})")]
    EmptyWindow { start: String, end: String },

    /// An interval does not end after it starts.
    #[error("interval must end after it starts ({start} >= {end})")]
    EmptyInterval { start: TimePoint, end: TimePoint },

    /// A session duration was zero.
    #[error("session duration must be at least one minute")]
    ZeroDuration,

    /// A session type priority was outside `1..=5`.
    #[error("priority must be between 1 and 5, got {value}")]
    PriorityOutOfRange { value: u8 },
}

/// Generates a validated string ID newtype with common trait implementations.
macro_rules! define_string_id {
    (
        $(#[$meta:meta])*
        $name:ident, $field_name:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new ID after validation.
            pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
                let id = id.into();
                if id.trim().is_empty() {
                    return Err(ValidationError::Empty { field: $field_name });
                }
                Ok(Self(id))
            }

            /// Returns the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_string_id!(
    /// Identifier of a session type (e.g. "guitar").
    ///
    /// Sessions refer to their type through this ID; the engine treats it as opaque.
    SessionTypeId, "session type ID"
);

define_string_id!(
    /// Identifier of a scheduled session, as assigned by the session store.
    SessionId, "session ID"
);

define_string_id!(
    /// Identifier of an availability window, as assigned by the availability store.
    WindowId, "window ID"
);

/// A weekly recurring time range during which sessions may be scheduled.
///
/// Covers `[start_minute, end_minute)` on every occurrence of `day`. Windows
/// are independent: two windows on the same day are never merged, even when
/// they touch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "WindowRecord", into = "WindowRecord")]
pub struct AvailabilityWindow {
    id: Option<WindowId>,
    day: DayOfWeek,
    start_minute: u32,
    end_minute: u32,
}

impl AvailabilityWindow {
    /// Creates a window from minute-of-day bounds.
    pub fn new(
        day: DayOfWeek,
        start_minute: u32,
        end_minute: u32,
    ) -> Result<Self, ValidationError> {
        for minute in [start_minute, end_minute] {
            if minute >= MINUTES_PER_DAY {
                return Err(ValidationError::MinuteOutOfRange { minute });
            }
        }
        if start_minute >= end_minute {
            return Err(ValidationError::EmptyWindow {
                start: format_clock(start_minute),
                end: format_clock(end_minute),
            });
        }
        Ok(Self {
            id: None,
            day,
            start_minute,
            end_minute,
        })
    }

    /// Creates a window from `HH:MM` clock strings.
    pub fn from_clock(day: DayOfWeek, start: &str, end: &str) -> Result<Self, ValidationError> {
        Self::new(day, parse_clock(start)?, parse_clock(end)?)
    }

    /// Attaches the store-assigned identifier.
    #[must_use]
    pub fn with_id(mut self, id: WindowId) -> Self {
        self.id = Some(id);
        self
    }

    pub const fn id(&self) -> Option<&WindowId> {
        self.id.as_ref()
    }

    pub const fn day(&self) -> DayOfWeek {
        self.day
    }

    pub const fn start_minute(&self) -> u32 {
        self.start_minute
    }

    pub const fn end_minute(&self) -> u32 {
        self.end_minute
    }

    pub const fn length_minutes(&self) -> u32 {
        self.end_minute - self.start_minute
    }

    /// Whether `[start_min, end_min)` on `day` lies entirely inside this window.
    pub fn contains(&self, day: DayOfWeek, start_min: u32, end_min: u32) -> bool {
        self.day == day && start_min >= self.start_minute && end_min <= self.end_minute
    }

    /// Whether two windows share any minute on the same day. Touching windows
    /// do not overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.day == other.day
            && self.start_minute < other.end_minute
            && other.start_minute < self.end_minute
    }
}

impl fmt::Display for AvailabilityWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}-{}",
            self.day,
            format_clock(self.start_minute),
            format_clock(self.end_minute)
        )
    }
}

/// Wire shape of an availability window, using clock strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct WindowRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<WindowId>,
    day: DayOfWeek,
    #[serde(alias = "startHour")]
    start: String,
    #[serde(alias = "endHour")]
    end: String,
}

impl TryFrom<WindowRecord> for AvailabilityWindow {
    type Error = ValidationError;

    fn try_from(record: WindowRecord) -> Result<Self, Self::Error> {
        let window = Self::from_clock(record.day, &record.start, &record.end)?;
        Ok(Self {
            id: record.id,
            ..window
        })
    }
}

impl From<AvailabilityWindow> for WindowRecord {
    fn from(window: AvailabilityWindow) -> Self {
        Self {
            id: window.id,
            day: window.day,
            start: format_clock(window.start_minute),
            end: format_clock(window.end_minute),
        }
    }
}

/// A session placed on the calendar.
///
/// Occupies `[start, start + duration_minutes)`. The engine only reads
/// sessions; creating and completing them is the session store's job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScheduledSession {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<SessionId>,

    #[serde(alias = "sessionTypeId")]
    pub session_type_id: SessionTypeId,

    #[serde(alias = "startTime", alias = "dateTime")]
    pub start: TimePoint,

    #[serde(alias = "duration")]
    pub duration_minutes: NonZeroU32,

    #[serde(default)]
    pub completed: bool,
}

impl ScheduledSession {
    /// Creates an incomplete session after validating its duration.
    pub fn new(
        session_type_id: SessionTypeId,
        start: TimePoint,
        duration_minutes: u32,
    ) -> Result<Self, ValidationError> {
        let duration_minutes =
            NonZeroU32::new(duration_minutes).ok_or(ValidationError::ZeroDuration)?;
        Ok(Self {
            id: None,
            session_type_id,
            start,
            duration_minutes,
            completed: false,
        })
    }

    #[must_use]
    pub fn with_id(mut self, id: SessionId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub const fn completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    /// The interval this session occupies on the calendar.
    pub fn occupied(&self) -> Interval {
        Interval::spanning(self.start, self.duration_minutes)
    }

    pub fn end(&self) -> TimePoint {
        self.start.plus_minutes(self.duration_minutes.get())
    }

    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn weekday(&self) -> DayOfWeek {
        self.start.weekday()
    }
}

/// Priority of a session type, from 1 (lowest) to 5 (highest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Priority(u8);

impl Priority {
    pub const MIN: Self = Self(1);
    pub const MAX: Self = Self(5);

    pub fn new(value: u8) -> Result<Self, ValidationError> {
        if value < Self::MIN.0 || value > Self::MAX.0 {
            return Err(ValidationError::PriorityOutOfRange { value });
        }
        Ok(Self(value))
    }

    pub const fn value(self) -> u8 {
        self.0
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self(3)
    }
}

impl TryFrom<u8> for Priority {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Priority> for u8 {
    fn from(p: Priority) -> Self {
        p.0
    }
}

/// A kind of activity sessions are scheduled for (e.g. "Guitar" in "Music").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionType {
    pub id: SessionTypeId,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub priority: Priority,
}
