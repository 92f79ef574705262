//! Windows command: declared availability grouped by weekday.

use std::io::Write;

use anyhow::Result;
use cadence_core::{AvailabilityWindow, DayOfWeek, find_overlapping_window, format_clock};
use serde::Serialize;

#[derive(Serialize)]
struct WindowJson {
    day: DayOfWeek,
    start: String,
    end: String,
    minutes: u32,
}

pub fn run<W: Write>(writer: &mut W, windows: &[AvailabilityWindow], json: bool) -> Result<()> {
    let mut sorted: Vec<&AvailabilityWindow> = windows.iter().collect();
    sorted.sort_by_key(|w| (w.day(), w.start_minute(), w.end_minute()));

    if json {
        let rows: Vec<WindowJson> = sorted
            .iter()
            .map(|w| WindowJson {
                day: w.day(),
                start: format_clock(w.start_minute()),
                end: format_clock(w.end_minute()),
                minutes: w.length_minutes(),
            })
            .collect();
        serde_json::to_writer_pretty(&mut *writer, &rows)?;
        writeln!(writer)?;
        return Ok(());
    }

    if sorted.is_empty() {
        writeln!(writer, "No availability declared.")?;
        return Ok(());
    }

    for day in DayOfWeek::ALL {
        let on_day: Vec<&AvailabilityWindow> =
            sorted.iter().copied().filter(|w| w.day() == day).collect();
        if on_day.is_empty() {
            continue;
        }
        writeln!(writer, "{day}:")?;
        for w in on_day {
            writeln!(
                writer,
                "  {}-{}",
                format_clock(w.start_minute()),
                format_clock(w.end_minute())
            )?;
        }
    }

    for (i, window) in windows.iter().enumerate() {
        if let Some(other) = find_overlapping_window(window, &windows[i + 1..]) {
            writeln!(writer, "warning: {window} overlaps {other}")?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;

    use super::*;

    fn window(day: DayOfWeek, start: &str, end: &str) -> AvailabilityWindow {
        AvailabilityWindow::from_clock(day, start, end).unwrap()
    }

    fn render(windows: &[AvailabilityWindow], json: bool) -> String {
        let mut output = Vec::new();
        run(&mut output, windows, json).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn groups_windows_by_weekday() {
        let windows = [
            window(DayOfWeek::Wednesday, "17:00", "19:00"),
            window(DayOfWeek::Monday, "13:00", "15:00"),
            window(DayOfWeek::Monday, "09:00", "12:00"),
        ];
        assert_snapshot!(render(&windows, false), @r"
        Monday:
          09:00-12:00
          13:00-15:00
        Wednesday:
          17:00-19:00
        ");
    }

    #[test]
    fn warns_about_overlapping_windows() {
        let windows = [
            window(DayOfWeek::Friday, "09:00", "12:00"),
            window(DayOfWeek::Friday, "11:00", "13:00"),
            window(DayOfWeek::Friday, "13:00", "14:00"),
        ];
        assert_snapshot!(render(&windows, false), @r"
        Friday:
          09:00-12:00
          11:00-13:00
          13:00-14:00
        warning: Friday 09:00-12:00 overlaps Friday 11:00-13:00
        ");
    }

    #[test]
    fn windows_json_is_sorted() {
        let windows = [
            window(DayOfWeek::Sunday, "10:00", "11:30"),
            window(DayOfWeek::Monday, "09:00", "12:00"),
        ];
        assert_snapshot!(render(&windows, true), @r#"
        [
          {
            "day": "Monday",
            "start": "09:00",
            "end": "12:00",
            "minutes": 180
          },
          {
            "day": "Sunday",
            "start": "10:00",
            "end": "11:30",
            "minutes": 90
          }
        ]
        "#);
    }

    #[test]
    fn empty_availability_says_so() {
        assert_snapshot!(render(&[], false), @"No availability declared.");
    }
}
