//! Open slot search.
//!
//! Walks a bounded horizon of calendar days, scans every availability window
//! that recurs on each day at a fixed granularity, and yields the start times
//! whose session-length interval is free of conflicts.
//!
//! # Ordering
//!
//! Slots come out in chronological order: by day, then by minute of day,
//! whatever order the windows were supplied in. When two overlapping windows
//! offer the same start minute, the one supplied first is yielded first.

use std::iter::FusedIterator;
use std::num::NonZeroU32;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::conflict::has_conflict;
use crate::interval::Interval;
use crate::time::{DayOfWeek, TimePoint};
use crate::types::{AvailabilityWindow, ScheduledSession};

const DEFAULT_GRANULARITY_MINUTES: NonZeroU32 = match NonZeroU32::new(30) {
    Some(n) => n,
    None => panic!("granularity must be non-zero"),
};

/// Configuration for slot search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotSearchConfig {
    /// Step between candidate start times within a window.
    /// Default: 30 minutes.
    pub granularity_minutes: NonZeroU32,

    /// Number of calendar days to scan, starting with the reference day.
    /// Default: 14.
    pub horizon_days: u32,

    /// Maximum number of slots to return.
    /// Default: 5.
    pub max_results: usize,
}

impl Default for SlotSearchConfig {
    fn default() -> Self {
        Self {
            granularity_minutes: DEFAULT_GRANULARITY_MINUTES,
            horizon_days: 14,
            max_results: 5,
        }
    }
}

/// Lazily enumerates open slots.
///
/// Created by [`find_open_slots`]. The iterator holds only borrowed inputs and
/// per-window cursors, so a fresh call always starts the search over.
#[derive(Debug, Clone)]
pub struct OpenSlots<'a> {
    duration: NonZeroU32,
    windows: &'a [AvailabilityWindow],
    existing: &'a [ScheduledSession],
    today: NaiveDate,
    granularity: u32,
    horizon_days: u32,
    remaining: usize,

    day_offset: u32,
    /// Next start minute per window on the current day, `None` once the
    /// window is exhausted or recurs on another weekday. Empty until the
    /// day has been entered.
    cursors: Vec<Option<u32>>,
    day_entered: bool,
}

/// Last start minute that still lets the session end inside the window.
fn last_start(window: &AvailabilityWindow, duration: u32) -> Option<u32> {
    window
        .end_minute()
        .checked_sub(duration)
        .filter(|last| *last >= window.start_minute())
}

impl OpenSlots<'_> {
    fn enter_day(&mut self, day: DayOfWeek) {
        let duration = self.duration.get();
        self.cursors = self
            .windows
            .iter()
            .map(|w| {
                let open = w.day() == day && last_start(w, duration).is_some();
                open.then_some(w.start_minute())
            })
            .collect();
        self.day_entered = true;
    }

    fn next_day(&mut self) {
        self.day_offset += 1;
        self.cursors.clear();
        self.day_entered = false;
    }

    /// Earliest pending start minute of the day, ties going to the window
    /// supplied first.
    fn earliest(&self) -> Option<(u32, usize)> {
        self.cursors
            .iter()
            .enumerate()
            .filter_map(|(index, cursor)| cursor.map(|minute| (minute, index)))
            .min()
    }

    fn finish(&mut self) {
        self.remaining = 0;
    }
}

impl Iterator for OpenSlots<'_> {
    type Item = TimePoint;

    fn next(&mut self) -> Option<TimePoint> {
        loop {
            if self.remaining == 0 || self.day_offset >= self.horizon_days {
                return None;
            }

            let Some(date) = self
                .today
                .checked_add_days(Days::new(u64::from(self.day_offset)))
            else {
                self.finish();
                return None;
            };

            if !self.day_entered {
                self.enter_day(DayOfWeek::of(date));
            }

            let Some((minute, index)) = self.earliest() else {
                self.next_day();
                continue;
            };

            let following = minute.saturating_add(self.granularity);
            let last = last_start(&self.windows[index], self.duration.get());
            self.cursors[index] = last.filter(|bound| following <= *bound).map(|_| following);

            let start = TimePoint::on(date, minute);
            let candidate = Interval::spanning(start, self.duration);
            if has_conflict(&candidate, self.existing) {
                tracing::trace!(%start, "slot blocked by existing session");
                continue;
            }

            self.remaining -= 1;
            return Some(start);
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}

impl FusedIterator for OpenSlots<'_> {}

/// Searches for open slots of `duration` minutes, starting on `today`.
///
/// Every candidate lies inside a single availability window by construction
/// and is skipped if it overlaps any entry of `existing`, completed or not.
/// Yields at most `config.max_results` start times; an empty result means no
/// capacity within the horizon, which is not an error.
pub fn find_open_slots<'a>(
    duration: NonZeroU32,
    windows: &'a [AvailabilityWindow],
    existing: &'a [ScheduledSession],
    today: NaiveDate,
    config: &SlotSearchConfig,
) -> OpenSlots<'a> {
    tracing::debug!(
        duration = duration.get(),
        windows = windows.len(),
        existing = existing.len(),
        %today,
        horizon_days = config.horizon_days,
        granularity = config.granularity_minutes.get(),
        max_results = config.max_results,
        "searching for open slots"
    );

    OpenSlots {
        duration,
        windows,
        existing,
        today,
        granularity: config.granularity_minutes.get(),
        horizon_days: config.horizon_days,
        remaining: config.max_results,
        day_offset: 0,
        cursors: Vec::new(),
        day_entered: false,
    }
}
