//! Check command: would a session fit at a given time?

use std::io::Write;
use std::num::NonZeroU32;

use anyhow::{Context, Result};
use cadence_core::{Interval, Rejection, Schedule, TimePoint};

/// Writes the verdict for a candidate session. Returns whether it fits.
pub fn run<W: Write>(
    writer: &mut W,
    schedule: &Schedule,
    start: &str,
    duration: NonZeroU32,
) -> Result<bool> {
    let start: TimePoint = start
        .parse()
        .with_context(|| format!("invalid --start {start}"))?;
    let candidate = Interval::spanning(start, duration);

    match schedule.check(&candidate) {
        Ok(()) => {
            writeln!(writer, "ok: {candidate} ({} min)", duration.get())?;
            Ok(true)
        }
        Err(rejection @ Rejection::NotAvailable { .. }) => {
            writeln!(writer, "not available: {rejection}")?;
            Ok(false)
        }
        Err(rejection @ Rejection::Conflict { .. }) => {
            writeln!(writer, "conflict: {candidate} {rejection}")?;
            Ok(false)
        }
    }
}
