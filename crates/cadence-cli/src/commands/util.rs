//! Shared utilities for CLI commands.

use std::sync::LazyLock;

use anyhow::Context;
use chrono::{Days, NaiveDate};
use regex::Regex;

/// Pre-compiled regex for relative day parsing.
static RELATIVE_DAY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)\s+(day|week)s?\s+(ago|from now)$").expect("valid regex")
});

/// Conservative bound for relative day parsing (~1000 years).
const MAX_RELATIVE_DAYS: u64 = 1000 * 366;

/// Parse a date string relative to `today`.
///
/// Supports:
/// - ISO 8601 dates: "2025-01-15"
/// - Keywords: "today", "tomorrow", "yesterday"
/// - Relative: "3 days ago", "2 weeks from now"
pub fn parse_date(s: &str, today: NaiveDate) -> anyhow::Result<NaiveDate> {
    let s = s.trim().to_lowercase();

    if let Ok(date) = NaiveDate::parse_from_str(&s, "%Y-%m-%d") {
        return Ok(date);
    }

    let shifted = match s.as_str() {
        "today" => Some(today),
        "tomorrow" => today.checked_add_days(Days::new(1)),
        "yesterday" => today.checked_sub_days(Days::new(1)),
        _ => {
            let Some(caps) = RELATIVE_DAY_RE.captures(&s) else {
                anyhow::bail!(
                    "Invalid date: {s}. Use YYYY-MM-DD, today/tomorrow/yesterday, or 'N days ago'"
                );
            };

            let n: u64 = caps[1]
                .parse()
                .context("failed to parse number in relative date")?;
            let days = match &caps[2] {
                "week" => n.saturating_mul(7),
                _ => n,
            };
            if days > MAX_RELATIVE_DAYS {
                anyhow::bail!("Relative date too far away: {s}");
            }

            if &caps[3] == "ago" {
                today.checked_sub_days(Days::new(days))
            } else {
                today.checked_add_days(Days::new(days))
            }
        }
    };

    shifted.with_context(|| format!("date out of range: {s}"))
}

/// "1 day" / "3 days".
pub fn plural_days(n: i64) -> String {
    if n.abs() == 1 {
        format!("{n} day")
    } else {
        format!("{n} days")
    }
}
