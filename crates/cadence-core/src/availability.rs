//! Availability checking against weekly windows.

use crate::interval::{Interval, minutes_of_day};
use crate::time::DayOfWeek;
use crate::types::AvailabilityWindow;

/// Windows declared for `day`, in the order they were supplied.
pub fn windows_for_day(
    windows: &[AvailabilityWindow],
    day: DayOfWeek,
) -> impl Iterator<Item = &AvailabilityWindow> {
    windows.iter().filter(move |w| w.day() == day)
}

/// Whether `candidate` lies entirely inside a single window for its weekday.
///
/// Windows are not unioned: a candidate spanning the gap between two windows
/// is not available even if each half is. A candidate that runs past midnight
/// is never available, since windows never do.
pub fn is_within_availability(candidate: &Interval, windows: &[AvailabilityWindow]) -> bool {
    if !candidate.is_single_day() {
        return false;
    }

    let day = candidate.start().weekday();
    let start = minutes_of_day(candidate.start());
    let end = minutes_of_day(candidate.end());

    windows_for_day(windows, day).any(|w| w.contains(day, start, end))
}

/// First existing window that overlaps `new` on the same day.
///
/// Callers run this before saving a window to keep a user's availability free
/// of duplicates. Windows that only touch are allowed.
pub fn find_overlapping_window<'a>(
    new: &AvailabilityWindow,
    windows: &'a [AvailabilityWindow],
) -> Option<&'a AvailabilityWindow> {
    windows.iter().find(|existing| existing.overlaps(new))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::TimePoint;

    fn window(day: DayOfWeek, start: &str, end: &str) -> AvailabilityWindow {
        AvailabilityWindow::from_clock(day, start, end).unwrap()
    }

    // 2025-01-13 is a Monday.
    fn monday(start: (u32, u32), end: (u32, u32)) -> Interval {
        Interval::new(
            TimePoint::new(2025, 1, 13, start.0, start.1).unwrap(),
            TimePoint::new(2025, 1, 13, end.0, end.1).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn inside_single_window() {
        let windows = vec![window(DayOfWeek::Monday, "09:00", "12:00")];
        assert!(is_within_availability(&monday((10, 0), (10, 30)), &windows));
    }

    #[test]
    fn exact_window_bounds_are_available() {
        let windows = vec![window(DayOfWeek::Monday, "09:00", "12:00")];
        assert!(is_within_availability(&monday((9, 0), (12, 0)), &windows));
    }

    #[test]
    fn spanning_a_gap_is_not_available() {
        let windows = vec![
            window(DayOfWeek::Monday, "09:00", "10:00"),
            window(DayOfWeek::Monday, "11:00", "12:00"),
        ];
        let candidate = monday((9, 30), (11, 30));
        assert!(!is_within_availability(&candidate, &windows));
    }

    #[test]
    fn back_to_back_windows_do_not_combine() {
        let windows = vec![
            window(DayOfWeek::Monday, "09:00", "10:00"),
            window(DayOfWeek::Monday, "10:00", "11:00"),
        ];
        let candidate = monday((9, 30), (10, 30));
        assert!(!is_within_availability(&candidate, &windows));
        assert!(is_within_availability(&monday((10, 0), (10, 30)), &windows));
    }

    #[test]
    fn day_without_windows_is_not_available() {
        let windows = vec![window(DayOfWeek::Tuesday, "00:00", "23:59")];
        let candidate = monday((10, 0), (10, 30));
        assert!(!is_within_availability(&candidate, &windows));
        assert!(!is_within_availability(&candidate, &[]));
    }

    #[test]
    fn overrunning_the_window_is_not_available() {
        let windows = vec![window(DayOfWeek::Monday, "09:00", "12:00")];
        let candidate = monday((11, 45), (12, 15));
        assert!(!is_within_availability(&candidate, &windows));
        assert!(!is_within_availability(&monday((8, 45), (9, 15)), &windows));
    }

    #[test]
    fn cross_midnight_is_not_available() {
        let windows = vec![
            window(DayOfWeek::Monday, "22:00", "23:59"),
            window(DayOfWeek::Tuesday, "00:00", "02:00"),
        ];
        let start = TimePoint::new(2025, 1, 13, 23, 30).unwrap();
        let late = Interval::with_duration(start, 60).unwrap();
        assert!(!is_within_availability(&late, &windows));
    }

    #[test]
    fn any_matching_window_suffices() {
        let windows = vec![
            window(DayOfWeek::Monday, "06:00", "07:00"),
            window(DayOfWeek::Wednesday, "09:00", "12:00"),
            window(DayOfWeek::Monday, "17:00", "19:00"),
        ];
        let candidate = monday((17, 30), (18, 15));
        assert!(is_within_availability(&candidate, &windows));
    }

    #[test]
    fn windows_for_day_keeps_input_order() {
        let windows = vec![
            window(DayOfWeek::Monday, "17:00", "19:00"),
            window(DayOfWeek::Tuesday, "09:00", "10:00"),
            window(DayOfWeek::Monday, "06:00", "07:00"),
        ];
        let starts: Vec<u32> = windows_for_day(&windows, DayOfWeek::Monday)
            .map(AvailabilityWindow::start_minute)
            .collect();
        assert_eq!(starts, vec![17 * 60, 6 * 60]);
    }

    #[test]
    fn overlapping_window_is_found() {
        let windows = vec![
            window(DayOfWeek::Monday, "08:00", "10:00"),
            window(DayOfWeek::Tuesday, "08:00", "10:00"),
        ];
        let clash = window(DayOfWeek::Monday, "09:00", "11:00");
        assert_eq!(find_overlapping_window(&clash, &windows), Some(&windows[0]));

        let adjacent = window(DayOfWeek::Monday, "10:00", "11:00");
        assert_eq!(find_overlapping_window(&adjacent, &windows), None);

        let covering = window(DayOfWeek::Tuesday, "07:00", "12:00");
        assert_eq!(
            find_overlapping_window(&covering, &windows),
            Some(&windows[1])
        );
    }
}
