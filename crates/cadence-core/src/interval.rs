//! Half-open time intervals.

use std::fmt;
use std::num::NonZeroU32;

use crate::time::TimePoint;
use crate::types::ValidationError;

/// A half-open span `[start, end)` with `end > start`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval {
    start: TimePoint,
    end: TimePoint,
}

impl Interval {
    /// Creates an interval, rejecting empty or inverted spans.
    pub fn new(start: TimePoint, end: TimePoint) -> Result<Self, ValidationError> {
        if end <= start {
            return Err(ValidationError::EmptyInterval { start, end });
        }
        Ok(Self { start, end })
    }

    /// The interval of `duration` minutes beginning at `start`.
    ///
    /// The end saturates at the last representable minute.
    pub fn spanning(start: TimePoint, duration: NonZeroU32) -> Self {
        Self {
            start,
            end: start.plus_minutes(duration.get()),
        }
    }

    /// Like [`Interval::spanning`] but validates a raw minute count.
    pub fn with_duration(start: TimePoint, minutes: u32) -> Result<Self, ValidationError> {
        let duration = NonZeroU32::new(minutes).ok_or(ValidationError::ZeroDuration)?;
        Ok(Self::spanning(start, duration))
    }

    pub const fn start(&self) -> TimePoint {
        self.start
    }

    pub const fn end(&self) -> TimePoint {
        self.end
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end.as_naive() - self.start.as_naive()).num_minutes()
    }

    /// Whether the interval starts and ends on the same calendar date.
    pub fn is_single_day(&self) -> bool {
        self.start.date() == self.end.date()
    }

    /// Half-open overlap: intervals that only touch at an endpoint do not overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl fmt::Debug for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single_day() {
            write!(f, "{}-{}", self.start, self.end.as_naive().format("%H:%M"))
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// Minutes since midnight of `t`.
pub fn minutes_of_day(t: TimePoint) -> u32 {
    t.minute_of_day()
}

/// Whether `a` and `b` share at least one minute.
pub fn overlaps(a: &Interval, b: &Interval) -> bool {
    a.overlaps(b)
}
