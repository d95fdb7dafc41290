//! Display formatting for durations and backend timestamps
//!
//! The CLI uses [`format_duration`] for play notices. [`format_date`] is for
//! library callers that render backend records; the CLI prints payloads as
//! raw JSON.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};

/// Formats a track length as `m:ss`
pub fn format_duration(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Formats a backend timestamp for display in local time
///
/// Accepts RFC 3339 (`2024-07-15T05:30:00Z`) or the backend's naive
/// `2024-07-15 05:30:00` form, which is taken as local time. Returns `-`
/// when there is no timestamp and the input unchanged when it cannot be
/// parsed.
pub fn format_date(date: Option<&str>) -> String {
    let Some(date) = date.filter(|d| !d.trim().is_empty()) else {
        return "-".to_string();
    };

    parse_timestamp(date.trim())
        .map(|dt| dt.format("%Y/%m/%d %H:%M:%S").to_string())
        .unwrap_or_else(|| date.to_string())
}

fn parse_timestamp(date: &str) -> Option<DateTime<Local>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(date) {
        return Some(dt.with_timezone(&Local));
    }

    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(date, fmt).ok())
        .and_then(|naive| Local.from_local_datetime(&naive).earliest())
}
