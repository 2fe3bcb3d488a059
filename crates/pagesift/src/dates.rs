//! Date formatting and range parsing for date-derived columns.

use chrono::{DateTime, NaiveDate};

use crate::row::DateParts;

/// Builds the sort/group format string for a date-grouping key: only the
/// requested components, `%Y`/`%m`/`%d`, hyphen-joined in that order.
pub fn group_format(parts: &DateParts) -> String {
    let mut spec = Vec::new();
    if parts.year {
        spec.push("%Y");
    }
    if parts.month {
        spec.push("%m");
    }
    if parts.day {
        spec.push("%d");
    }
    spec.join("-")
}

/// Maps a group format to its spelled-out equivalent for headings, where
/// one exists. Formats without a wordy form (e.g. a bare year) return
/// `None` and headings fall back to the plain value.
pub fn word_format(group_format: &str) -> Option<&'static str> {
    match group_format {
        "%m" => Some("%B"),
        "%d" => Some("%e %A"),
        "%Y-%m" => Some("%B %Y"),
        "%m-%d" => Some("%B %e, %A"),
        "%Y-%m-%d" => Some("%A, %B %e, %Y"),
        _ => None,
    }
}

/// Formats an epoch-seconds timestamp with a strftime-style format.
pub fn format_stamp(stamp: i64, format: &str) -> String {
    match DateTime::from_timestamp(stamp, 0) {
        Some(dt) => dt.format(format).to_string(),
        None => String::new(),
    }
}

/// Parses a `start->end` date-range expression into epoch-second bounds.
///
/// Either side may be empty. An expression without `->` is an open-ended
/// lower bound. The end bound covers its whole day.
pub fn parse_range(expr: &str) -> (Option<i64>, Option<i64>) {
    // allow Euro-style separators
    let expr = expr.replace('/', ".");
    let (begin, end) = match expr.split_once("->") {
        Some((b, e)) => (b.trim().to_string(), e.trim().to_string()),
        None => (expr.trim().to_string(), String::new()),
    };
    let begin = parse_date(&begin).map(day_start);
    let end = parse_date(&end).map(day_end);
    (begin, end)
}

/// Whether a timestamp falls within the closed range, or satisfies the
/// single-sided bound given. No bounds at all never matches.
pub fn in_range(stamp: i64, begin: Option<i64>, end: Option<i64>) -> bool {
    match (begin, end) {
        (Some(b), Some(e)) => stamp >= b && stamp <= e,
        (Some(b), None) => stamp >= b,
        (None, Some(e)) => stamp <= e,
        (None, None) => false,
    }
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    if text.is_empty() {
        return None;
    }
    const FORMATS: [&str; 3] = ["%Y-%m-%d", "%d.%m.%Y", "%Y.%m.%d"];
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
}

fn day_start(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp())
        .unwrap_or(0)
}

fn day_end(date: NaiveDate) -> i64 {
    date.and_hms_opt(23, 59, 59)
        .map(|dt| dt.and_utc().timestamp())
        .unwrap_or(0)
}
