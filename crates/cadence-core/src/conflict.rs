//! Conflict detection against already scheduled sessions.
//!
//! Two intervals conflict when `a.start < b.end && b.start < a.end`. A session
//! that ends exactly when the candidate starts is not a conflict. Completed
//! sessions still occupy their slot.

use crate::interval::Interval;
use crate::types::ScheduledSession;

/// Sessions whose occupied interval overlaps `candidate`, in input order.
pub fn conflicts<'a>(
    candidate: &'a Interval,
    existing: &'a [ScheduledSession],
) -> impl Iterator<Item = &'a ScheduledSession> + 'a {
    existing
        .iter()
        .filter(move |session| candidate.overlaps(&session.occupied()))
}

/// The first session that overlaps `candidate`, if any.
pub fn first_conflict<'a>(
    candidate: &Interval,
    existing: &'a [ScheduledSession],
) -> Option<&'a ScheduledSession> {
    existing
        .iter()
        .find(|session| candidate.overlaps(&session.occupied()))
}

/// Whether `candidate` overlaps any existing session.
pub fn has_conflict(candidate: &Interval, existing: &[ScheduledSession]) -> bool {
    first_conflict(candidate, existing).is_some()
}
