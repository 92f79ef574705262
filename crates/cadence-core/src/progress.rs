//! Progress statistics over a user's sessions.

use std::collections::{BTreeSet, HashMap};

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::types::{ScheduledSession, SessionType, SessionTypeId};

/// Completion counts for one session type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeProgress {
    pub session_type_id: SessionTypeId,
    /// Display name from the catalogue, if the type is known.
    pub name: Option<String>,
    pub scheduled: usize,
    pub completed: usize,
}

/// Summary of scheduled and completed sessions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressSummary {
    pub total_sessions: usize,
    pub completed_sessions: usize,
    /// Consecutive days with at least one completed session, ending today
    /// (or yesterday, if nothing has been completed today yet).
    pub streak_days: u32,
    /// Mean number of days between consecutive days with completed sessions.
    pub average_spacing_days: Option<f64>,
    pub per_type: Vec<TypeProgress>,
}

/// Computes progress as of `today`.
///
/// `per_type` lists catalogue types first, in catalogue order, followed by any
/// type IDs that only appear on sessions, in first-seen order.
pub fn progress_summary(
    sessions: &[ScheduledSession],
    types: &[SessionType],
    today: NaiveDate,
) -> ProgressSummary {
    let completed_dates: BTreeSet<NaiveDate> = sessions
        .iter()
        .filter(|s| s.completed)
        .map(ScheduledSession::date)
        .collect();

    ProgressSummary {
        total_sessions: sessions.len(),
        completed_sessions: sessions.iter().filter(|s| s.completed).count(),
        streak_days: streak_days(&completed_dates, today),
        average_spacing_days: average_spacing_days(&completed_dates),
        per_type: per_type(sessions, types),
    }
}

fn streak_days(completed_dates: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    let previous = |day: NaiveDate| day.checked_sub_days(Days::new(1));
    let mut day = if completed_dates.contains(&today) {
        Some(today)
    } else {
        previous(today)
    };

    let mut streak = 0;
    while let Some(current) = day.filter(|d| completed_dates.contains(d)) {
        streak += 1;
        day = previous(current);
    }
    streak
}

#[allow(clippy::cast_precision_loss)]
fn average_spacing_days(completed_dates: &BTreeSet<NaiveDate>) -> Option<f64> {
    if completed_dates.len() < 2 {
        return None;
    }
    let dates: Vec<NaiveDate> = completed_dates.iter().copied().collect();
    let total: i64 = dates
        .windows(2)
        .map(|pair| (pair[1] - pair[0]).num_days())
        .sum();
    Some(total as f64 / (dates.len() - 1) as f64)
}

fn per_type(sessions: &[ScheduledSession], types: &[SessionType]) -> Vec<TypeProgress> {
    let mut rows: Vec<TypeProgress> = types
        .iter()
        .map(|t| TypeProgress {
            session_type_id: t.id.clone(),
            name: Some(t.name.clone()),
            scheduled: 0,
            completed: 0,
        })
        .collect();
    let mut index: HashMap<SessionTypeId, usize> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| (row.session_type_id.clone(), i))
        .collect();

    for session in sessions {
        let i = *index
            .entry(session.session_type_id.clone())
            .or_insert_with(|| {
                rows.push(TypeProgress {
                    session_type_id: session.session_type_id.clone(),
                    name: None,
                    scheduled: 0,
                    completed: 0,
                });
                rows.len() - 1
            });
        rows[i].scheduled += 1;
        if session.completed {
            rows[i].completed += 1;
        }
    }

    rows
}
