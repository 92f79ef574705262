//! Recurrences command: suggest repeating past sessions on a given day.

use std::io::Write;

use anyhow::Result;
use cadence_core::{DayOfWeek, Schedule, SessionTypeId, TimePoint};
use chrono::NaiveDate;
use serde::Serialize;

use crate::PlanFile;
use crate::commands::util::plural_days;

#[derive(Serialize)]
struct SuggestionJson<'a> {
    start: TimePoint,
    end: TimePoint,
    session_type_id: &'a SessionTypeId,
    label: String,
    source_start: TimePoint,
    recurrence_gap_days: i64,
}

pub fn run<W: Write>(
    writer: &mut W,
    plan: &PlanFile,
    schedule: &Schedule,
    date: NaiveDate,
    json: bool,
) -> Result<()> {
    let suggestions = schedule.recurrences(date);

    if json {
        let rows: Vec<SuggestionJson<'_>> = suggestions
            .iter()
            .map(|s| SuggestionJson {
                start: s.start,
                end: s.interval().end(),
                session_type_id: &s.source.session_type_id,
                label: plan.type_label(&s.source.session_type_id),
                source_start: s.source.start,
                recurrence_gap_days: s.recurrence_gap_days,
            })
            .collect();
        serde_json::to_writer_pretty(&mut *writer, &rows)?;
        writeln!(writer)?;
        return Ok(());
    }

    let day = DayOfWeek::of(date);
    if suggestions.is_empty() {
        writeln!(writer, "No sessions to repeat on {day} {date}.")?;
        return Ok(());
    }

    writeln!(writer, "Repeat on {day} {date}:")?;
    for s in &suggestions {
        let when = if s.recurrence_gap_days >= 0 {
            format!("last done {} ago", plural_days(s.recurrence_gap_days))
        } else {
            format!("done {} later", plural_days(-s.recurrence_gap_days))
        };
        writeln!(
            writer,
            "  {} {} ({when})",
            s.interval(),
            plan.type_label(&s.source.session_type_id)
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use cadence_core::{AvailabilityWindow, ScheduledSession};
    use insta::assert_snapshot;

    use super::*;

    const PLAN: &str = r#"{
        "session_types": [
            {"id": "guitar", "name": "Guitar", "category": "Music"}
        ],
        "availability": [
            {"day": "Wednesday", "start": "17:00", "end": "19:00"}
        ],
        "sessions": [
            {"sessionTypeId": "guitar", "startTime": "2025-01-08T18:00",
             "duration": 45, "completed": true},
            {"sessionTypeId": "run", "startTime": "2025-01-01T17:00",
             "duration": 30, "completed": true},
            {"sessionTypeId": "run", "startTime": "2025-01-01T20:00",
             "duration": 30, "completed": true}
        ]
    }"#;

    fn wednesday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    fn render(plan: &PlanFile, date: NaiveDate, json: bool) -> String {
        let schedule = Schedule::new(plan.availability.clone(), plan.sessions.clone());
        let mut output = Vec::new();
        run(&mut output, plan, &schedule, date, json).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn suggests_sessions_that_fit_availability() {
        let plan: PlanFile = serde_json::from_str(PLAN).unwrap();
        assert_snapshot!(render(&plan, wednesday(), false), @r"
        Repeat on Wednesday 2025-01-15:
          2025-01-15T18:00-18:45 Guitar (Music) (last done 7 days ago)
          2025-01-15T17:00-17:30 run (last done 14 days ago)
        ");
    }

    #[test]
    fn suggestions_json_includes_gap() {
        let mut plan: PlanFile = serde_json::from_str(PLAN).unwrap();
        plan.sessions.truncate(1);
        assert_snapshot!(render(&plan, wednesday(), true), @r#"
        [
          {
            "start": "2025-01-15T18:00",
            "end": "2025-01-15T18:45",
            "session_type_id": "guitar",
            "label": "Guitar (Music)",
            "source_start": "2025-01-08T18:00",
            "recurrence_gap_days": 7
          }
        ]
        "#);
    }

    #[test]
    fn later_sessions_are_described_as_later() {
        let mut plan: PlanFile = serde_json::from_str(PLAN).unwrap();
        plan.sessions.truncate(1);
        let earlier = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_snapshot!(render(&plan, earlier, false), @r"
        Repeat on Wednesday 2025-01-01:
          2025-01-01T18:00-18:45 Guitar (Music) (done 7 days later)
        ");
    }

    #[test]
    fn empty_day_says_so() {
        let plan = PlanFile {
            availability: vec![
                AvailabilityWindow::from_clock(DayOfWeek::Thursday, "09:00", "10:00").unwrap(),
            ],
            sessions: vec![
                ScheduledSession::new(
                    SessionTypeId::new("guitar").unwrap(),
                    TimePoint::new(2025, 1, 9, 9, 0).unwrap(),
                    30,
                )
                .unwrap(),
            ],
            ..PlanFile::default()
        };
        let thursday = NaiveDate::from_ymd_opt(2025, 1, 16).unwrap();
        let output = render(&plan, thursday, false);
        assert_snapshot!(output, @"No sessions to repeat on Thursday 2025-01-16.");
    }
}
