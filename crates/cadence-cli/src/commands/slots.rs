//! Slots command: open start times for a session of a given length.

use std::io::Write;
use std::num::NonZeroU32;

use anyhow::Result;
use cadence_core::{DayOfWeek, Interval, Schedule, SlotSearchConfig, TimePoint};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Serialize)]
struct SlotJson {
    start: TimePoint,
    end: TimePoint,
    day: DayOfWeek,
}

pub fn run<W: Write>(
    writer: &mut W,
    schedule: &Schedule,
    duration: NonZeroU32,
    from: NaiveDate,
    config: &SlotSearchConfig,
    json: bool,
) -> Result<()> {
    let slots: Vec<Interval> = schedule
        .open_slots(duration, from, config)
        .map(|start| Interval::spanning(start, duration))
        .collect();

    if json {
        let rows: Vec<SlotJson> = slots
            .iter()
            .map(|slot| SlotJson {
                start: slot.start(),
                end: slot.end(),
                day: slot.start().weekday(),
            })
            .collect();
        serde_json::to_writer_pretty(&mut *writer, &rows)?;
        writeln!(writer)?;
        return Ok(());
    }

    if slots.is_empty() {
        writeln!(
            writer,
            "No open slots found in the next {} days from {from}.",
            config.horizon_days
        )?;
        writeln!(
            writer,
            "Hint: try a shorter --duration or a longer --horizon."
        )?;
        return Ok(());
    }

    writeln!(
        writer,
        "Open {}-minute slots (every {}m, {} days from {from}):",
        duration.get(),
        config.granularity_minutes.get(),
        config.horizon_days
    )?;
    for slot in &slots {
        writeln!(writer, "  {} {slot}", slot.start().weekday().short())?;
    }

    Ok(())
}
