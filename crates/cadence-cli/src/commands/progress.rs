//! Progress command: completion counts and streaks.

use std::io::Write;

use anyhow::Result;
use cadence_core::Schedule;
use chrono::NaiveDate;

use crate::PlanFile;
use crate::commands::util::plural_days;

pub fn run<W: Write>(
    writer: &mut W,
    plan: &PlanFile,
    schedule: &Schedule,
    date: NaiveDate,
    json: bool,
) -> Result<()> {
    let summary = schedule.progress(&plan.session_types, date);

    if json {
        serde_json::to_writer_pretty(&mut *writer, &summary)?;
        writeln!(writer)?;
        return Ok(());
    }

    writeln!(writer, "Progress as of {date}")?;
    writeln!(
        writer,
        "Sessions: {} scheduled, {} completed",
        summary.total_sessions, summary.completed_sessions
    )?;
    writeln!(
        writer,
        "Streak: {}",
        plural_days(i64::from(summary.streak_days))
    )?;
    match summary.average_spacing_days {
        Some(spacing) => writeln!(writer, "Average spacing: {spacing:.1} days")?,
        None => writeln!(writer, "Average spacing: -")?,
    }

    if summary.per_type.is_empty() {
        return Ok(());
    }

    writeln!(writer)?;
    writeln!(writer, "By type:")?;
    for row in &summary.per_type {
        writeln!(
            writer,
            "  {}: {}/{} completed",
            plan.type_label(&row.session_type_id),
            row.completed,
            row.scheduled
        )?;
    }

    Ok(())
}
