//! Token recognizers: pure text/value parsers with no sheet access.

use crate::models::{CellValue, TimeRange};
use chrono::{NaiveDate, NaiveTime};
use regex::Regex;
use std::sync::LazyLock;

/// Weekday headers recognized in the header window (no Sunday classes).
pub const DAYS: [&str; 6] = [
    "понедельник",
    "вторник",
    "среда",
    "четверг",
    "пятница",
    "суббота",
];

static TIME_RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{1,2}):(\d{2})\s*-\s*(\d{1,2}):(\d{2})").expect("valid time range regex")
});

static SINGLE_TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2}):(\d{2})$").expect("valid single time regex"));

static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{1,2})[.,](\d{1,2})").expect("valid date regex"));

// A date header: "03.09", "3,9", "03.09.2025", optionally with a trailing dot.
static DATE_ONLY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{1,2}[.,]\d{1,2}(?:[.,]\d{2,4})?\.?$").expect("valid date-only regex")
});

fn hm(h: &str, m: &str) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(h.parse().ok()?, m.parse().ok()?, 0)
}

/// First `H:MM-H:MM` anywhere in the text with `start < end`.
pub fn parse_time_range(text: &str) -> Option<TimeRange> {
    TIME_RANGE_RE.captures_iter(text).find_map(|caps| {
        let start = hm(&caps[1], &caps[2])?;
        let end = hm(&caps[3], &caps[4])?;
        (start < end).then(|| TimeRange::new(start, end))
    })
}

/// Text that is exactly `H:MM` once trimmed.
pub fn parse_single_time(text: &str) -> Option<NaiveTime> {
    let caps = SINGLE_TIME_RE.captures(text.trim())?;
    hm(&caps[1], &caps[2])
}

/// Time range, or an open range from a lone start time.
pub fn parse_any_time(text: &str) -> Option<TimeRange> {
    parse_time_range(text).or_else(|| parse_single_time(text).map(TimeRange::open))
}

/// First `D.M` / `D,M` occurrence that forms a valid date in `year`.
pub fn parse_date(text: &str, year: i32) -> Option<NaiveDate> {
    DATE_RE.captures_iter(text).find_map(|caps| {
        let day: u32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        NaiveDate::from_ymd_opt(year, month, day)
    })
}

/// Native date values first, then the date text pattern.
pub fn cell_date(value: &CellValue, year: i32) -> Option<NaiveDate> {
    match value {
        CellValue::Date(_) | CellValue::DateTime(_) => value.as_date(),
        CellValue::Text(s) => parse_date(s, year),
        CellValue::Empty | CellValue::Number(_) | CellValue::Time(_) => None,
    }
}

/// Time anchor carried by a cell: a range or lone time in text, or a native
/// time-of-day value (an open range).
pub fn cell_time(value: &CellValue) -> Option<TimeRange> {
    match value {
        CellValue::Text(s) => parse_any_time(s),
        CellValue::Time(t) => Some(TimeRange::open(*t)),
        _ => None,
    }
}

/// Canonical weekday name when the text is exactly one of [`DAYS`].
pub fn day_name(text: &str) -> Option<&'static str> {
    let needle = text.trim().to_lowercase();
    DAYS.iter().copied().find(|d| *d == needle)
}

/// Text that is nothing but a header token: a weekday, a time range, a lone
/// time or a date. Such cells label the grid and never become events.
pub fn is_header_only(text: &str) -> bool {
    let t = text.trim();
    if day_name(t).is_some() || parse_single_time(t).is_some() || DATE_ONLY_RE.is_match(t) {
        return true;
    }
    match TIME_RANGE_RE.find(t) {
        Some(m) => t.replace(m.as_str(), "").trim().is_empty(),
        None => false,
    }
}
