//! The boundary between the engine and its collaborators.
//!
//! The engine never loads or stores anything itself. Callers implement
//! [`AvailabilitySource`] and [`SessionSource`] over whatever store holds one
//! user's data, take a [`Schedule`] snapshot, and run the engine against it.
//! Committing a session goes through a [`SessionSink`], and only after the
//! candidate passes both availability and conflict checks.

use std::num::NonZeroU32;

use chrono::NaiveDate;
use thiserror::Error;

use crate::availability::is_within_availability;
use crate::conflict::first_conflict;
use crate::interval::Interval;
use crate::progress::{ProgressSummary, progress_summary};
use crate::recurrence::{SuggestionCandidate, suggest_recurrences};
use crate::slots::{OpenSlots, SlotSearchConfig, find_open_slots};
use crate::time::{DayOfWeek, TimePoint};
use crate::types::{AvailabilityWindow, ScheduledSession, SessionId, SessionType, SessionTypeId};

/// Lists one user's availability windows, in no particular order.
pub trait AvailabilitySource {
    type Error;

    fn availability(&self) -> Result<Vec<AvailabilityWindow>, Self::Error>;
}

/// Lists one user's scheduled sessions, completed or not.
pub trait SessionSource {
    type Error;

    fn sessions(&self) -> Result<Vec<ScheduledSession>, Self::Error>;
}

/// Persists a new session. This is the commit action.
pub trait SessionSink {
    type Error;

    fn create_session(&mut self, session: NewSession) -> Result<ScheduledSession, Self::Error>;
}

/// A session the user wants to commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSession {
    pub session_type_id: SessionTypeId,
    pub start: TimePoint,
    pub duration_minutes: NonZeroU32,
}

impl NewSession {
    pub fn interval(&self) -> Interval {
        Interval::spanning(self.start, self.duration_minutes)
    }
}

/// Why a candidate cannot be committed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// No single availability window covers the candidate.
    #[error("no availability for {candidate} on {day}")]
    NotAvailable { candidate: String, day: DayOfWeek },

    /// The candidate overlaps an already scheduled session.
    #[error("conflicts with the session at {}", label(.existing_start, .existing_id.as_ref()))]
    Conflict {
        existing_start: TimePoint,
        existing_id: Option<SessionId>,
    },
}

fn label(start: &TimePoint, id: Option<&SessionId>) -> String {
    match id {
        Some(id) => format!("{start} ({id})"),
        None => start.to_string(),
    }
}

/// Error from [`Schedule::commit`].
#[derive(Debug, Error)]
pub enum CommitError<E> {
    #[error(transparent)]
    Rejected(#[from] Rejection),

    #[error("failed to create session")]
    Sink(#[source] E),
}

/// Checks a candidate the same way a commit would: availability, then conflicts.
pub fn validate_candidate(
    candidate: &Interval,
    windows: &[AvailabilityWindow],
    existing: &[ScheduledSession],
) -> Result<(), Rejection> {
    if !is_within_availability(candidate, windows) {
        return Err(Rejection::NotAvailable {
            candidate: candidate.to_string(),
            day: candidate.start().weekday(),
        });
    }
    if let Some(session) = first_conflict(candidate, existing) {
        return Err(Rejection::Conflict {
            existing_start: session.start,
            existing_id: session.id.clone(),
        });
    }
    Ok(())
}

/// A snapshot of one user's availability and sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schedule {
    pub windows: Vec<AvailabilityWindow>,
    pub sessions: Vec<ScheduledSession>,
}

impl Schedule {
    pub const fn new(windows: Vec<AvailabilityWindow>, sessions: Vec<ScheduledSession>) -> Self {
        Self { windows, sessions }
    }

    /// Reads a snapshot from the caller's stores.
    pub fn load<A, S, E>(availability: &A, sessions: &S) -> Result<Self, E>
    where
        A: AvailabilitySource,
        S: SessionSource,
        E: From<A::Error> + From<S::Error>,
    {
        let windows = availability.availability()?;
        let sessions = sessions.sessions()?;
        tracing::debug!(
            windows = windows.len(),
            sessions = sessions.len(),
            "loaded schedule"
        );
        Ok(Self { windows, sessions })
    }

    /// Whether `candidate` could be committed.
    pub fn check(&self, candidate: &Interval) -> Result<(), Rejection> {
        validate_candidate(candidate, &self.windows, &self.sessions)
    }

    pub fn open_slots(
        &self,
        duration: NonZeroU32,
        today: NaiveDate,
        config: &SlotSearchConfig,
    ) -> OpenSlots<'_> {
        find_open_slots(duration, &self.windows, &self.sessions, today, config)
    }

    /// Repeats of completed sessions for `today`, checked against everything
    /// already on the calendar.
    pub fn recurrences(&self, today: NaiveDate) -> Vec<SuggestionCandidate<'_>> {
        suggest_recurrences(&self.sessions, &self.windows, &self.sessions, today)
    }

    pub fn progress(&self, types: &[SessionType], today: NaiveDate) -> ProgressSummary {
        progress_summary(&self.sessions, types, today)
    }

    /// Validates `session` and hands it to `sink`.
    ///
    /// On success the created session joins this snapshot, so later checks see it.
    pub fn commit<K: SessionSink>(
        &mut self,
        sink: &mut K,
        session: NewSession,
    ) -> Result<&ScheduledSession, CommitError<K::Error>> {
        self.check(&session.interval())?;
        let created = sink.create_session(session).map_err(CommitError::Sink)?;
        tracing::info!(start = %created.start, "committed session");
        self.sessions.push(created);
        Ok(&self.sessions[self.sessions.len() - 1])
    }
}
