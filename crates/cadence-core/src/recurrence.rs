//! Recurrence suggestions: "repeat this session today".
//!
//! A completed session from an earlier occurrence of today's weekday is
//! projected onto today at the same wall-clock time. The projection is kept
//! only if it fits the user's availability and does not collide with anything
//! already scheduled.

use chrono::NaiveDate;

use crate::availability::is_within_availability;
use crate::conflict::has_conflict;
use crate::interval::Interval;
use crate::time::{DayOfWeek, TimePoint};
use crate::types::{AvailabilityWindow, ScheduledSession};

/// A proposed repeat of a past session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionCandidate<'a> {
    /// Where the repeat would start on the reference day.
    pub start: TimePoint,

    /// The completed session this suggestion repeats.
    pub source: &'a ScheduledSession,

    /// Whole days between the source session and the reference day.
    pub recurrence_gap_days: i64,
}

impl SuggestionCandidate<'_> {
    /// The interval the repeated session would occupy.
    pub fn interval(&self) -> Interval {
        Interval::spanning(self.start, self.source.duration_minutes)
    }
}

/// Proposes repeats of completed sessions for `reference_day`.
///
/// Candidates are emitted in `history` order; equal inputs always yield equal
/// output. Sessions from `reference_day` itself are never suggested.
pub fn suggest_recurrences<'a>(
    history: &'a [ScheduledSession],
    windows: &[AvailabilityWindow],
    existing: &[ScheduledSession],
    reference_day: NaiveDate,
) -> Vec<SuggestionCandidate<'a>> {
    let weekday = DayOfWeek::of(reference_day);

    let suggestions: Vec<_> = history
        .iter()
        .filter(|session| session.completed)
        .filter(|session| session.weekday() == weekday)
        .filter(|session| session.date() != reference_day)
        .filter_map(|session| {
            let start = session.start.with_date(reference_day);
            let candidate = Interval::spanning(start, session.duration_minutes);

            if !is_within_availability(&candidate, windows) {
                tracing::trace!(%start, "recurrence outside availability");
                return None;
            }
            if has_conflict(&candidate, existing) {
                tracing::trace!(%start, "recurrence conflicts with existing session");
                return None;
            }

            Some(SuggestionCandidate {
                start,
                source: session,
                recurrence_gap_days: (reference_day - session.date()).num_days(),
            })
        })
        .collect();

    tracing::debug!(
        history = history.len(),
        suggestions = suggestions.len(),
        %reference_day,
        "computed recurrence suggestions"
    );

    suggestions
}
