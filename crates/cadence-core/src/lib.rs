//! Scheduling engine for weekly availability and time-boxed sessions.
//!
//! This crate contains the pure logic for:
//! - Availability: whether a candidate interval fits a declared weekly window
//! - Conflicts: whether a candidate overlaps an existing session
//! - Slot search: finding open start times across a horizon of days
//! - Recurrence: suggesting repeats of past completed sessions
//! - Progress: completion counts, streaks and spacing
//!
//! Every operation is a deterministic function of its arguments. Nothing is
//! cached between calls and no input collection is mutated.

pub mod availability;
pub mod conflict;
pub mod interval;
pub mod planner;
pub mod progress;
pub mod recurrence;
pub mod slots;
pub mod time;
pub mod types;

pub use availability::{find_overlapping_window, is_within_availability, windows_for_day};
pub use conflict::{conflicts, first_conflict, has_conflict};
pub use interval::{Interval, minutes_of_day, overlaps};
pub use planner::{
    AvailabilitySource, CommitError, NewSession, Rejection, Schedule, SessionSink, SessionSource,
    validate_candidate,
};
pub use progress::{ProgressSummary, TypeProgress, progress_summary};
pub use recurrence::{SuggestionCandidate, suggest_recurrences};
pub use slots::{OpenSlots, SlotSearchConfig, find_open_slots};
pub use time::{DayOfWeek, TimePoint, format_clock, parse_clock};
pub use types::{
    AvailabilityWindow, Priority, ScheduledSession, SessionId, SessionType, SessionTypeId,
    ValidationError, WindowId,
};
