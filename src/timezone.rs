//! Server timezone offsets and display-time to UTC conversion.
//!
//! The calendar renders times as year-less, zone-local strings such as
//! `"1:30am"` under a date heading like `"Mon Jan 6"`. This module turns
//! that pair into an absolute UTC instant using a fixed, standard-time
//! offset table.
//!
//! # Known limitations
//!
//! - Offsets are whole-hour standard time. Daylight-saving transitions are
//!   not modelled.
//! - The display date carries no year, so the current system year is used.
//!   A week straddling New Year gets the wrong year for the days on the
//!   other side of the boundary.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Offset, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

/// Zone name to whole-hour UTC offset, standard time only.
const ZONE_OFFSETS: &[(&str, i32)] = &[
    ("UTC", 0),
    ("GMT", 0),
    ("Etc/UTC", 0),
    ("Europe/London", 0),
    ("Europe/Dublin", 0),
    ("Europe/Lisbon", 0),
    ("Europe/Berlin", 1),
    ("Europe/Paris", 1),
    ("Europe/Madrid", 1),
    ("Europe/Rome", 1),
    ("Europe/Zurich", 1),
    ("Europe/Amsterdam", 1),
    ("Europe/Stockholm", 1),
    ("Africa/Lagos", 1),
    ("Europe/Athens", 2),
    ("Europe/Helsinki", 2),
    ("Europe/Kiev", 2),
    ("Africa/Cairo", 2),
    ("Africa/Johannesburg", 2),
    ("Asia/Jerusalem", 2),
    ("Europe/Moscow", 3),
    ("Europe/Istanbul", 3),
    ("Asia/Riyadh", 3),
    ("Asia/Dubai", 4),
    ("Asia/Karachi", 5),
    ("Asia/Dhaka", 6),
    ("Asia/Bangkok", 7),
    ("Asia/Jakarta", 7),
    ("Asia/Shanghai", 8),
    ("Asia/Hong_Kong", 8),
    ("Asia/Singapore", 8),
    ("Australia/Perth", 8),
    ("Asia/Tokyo", 9),
    ("Asia/Seoul", 9),
    ("Australia/Brisbane", 10),
    ("Australia/Sydney", 10),
    ("Australia/Melbourne", 10),
    ("Pacific/Auckland", 12),
    ("Atlantic/Azores", -1),
    ("America/Sao_Paulo", -3),
    ("America/Argentina/Buenos_Aires", -3),
    ("America/Halifax", -4),
    ("America/New_York", -5),
    ("America/Toronto", -5),
    ("America/Chicago", -6),
    ("America/Mexico_City", -6),
    ("America/Denver", -7),
    ("America/Phoenix", -7),
    ("America/Los_Angeles", -8),
    ("America/Anchorage", -9),
    ("Pacific/Honolulu", -10),
];

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const MILLIS_PER_HOUR: i64 = 3_600_000;

static CLOCK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d{1,2}):(\d{2})\s*(am|pm)").expect("valid clock regex"));

/// Look up the standard-time UTC offset, in hours, for a zone name.
pub fn zone_offset_hours(zone: &str) -> Option<i32> {
    ZONE_OFFSETS
        .iter()
        .find(|(name, _)| *name == zone)
        .map(|(_, offset)| *offset)
}

/// Offset for `zone`, falling back to UTC with a warning when the zone is
/// not in the table.
pub fn resolve_offset_hours(zone: &str) -> i32 {
    match zone_offset_hours(zone) {
        Some(offset) => offset,
        None => {
            warn!(%zone, "Zone missing from offset table; assuming UTC");
            0
        }
    }
}

/// Whether a display time names no specific instant.
fn is_sentinel_time(time: &str) -> bool {
    time.is_empty() || time == "Tentative" || time == "All Day" || time.starts_with("Day")
}

/// Parse a 12-hour clock string into 24-hour `(hour, minute)`.
fn parse_clock(time: &str) -> Option<(u32, u32)> {
    let caps = CLOCK_RE.captures(time)?;
    let hour: u32 = caps[1].parse().ok()?;
    let minute: u32 = caps[2].parse().ok()?;
    let pm = caps[3].eq_ignore_ascii_case("pm");

    let hour = match (hour, pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, true) => h + 12,
        (h, false) => h,
    };
    Some((hour, minute))
}

/// Parse `"<weekday> <month> <day>"` into `(month, day)`; month is 1-based.
fn parse_display_date(date: &str) -> Option<(u32, u32)> {
    let parts: Vec<&str> = date.split_whitespace().collect();
    if parts.len() < 3 {
        return None;
    }
    let month = MONTHS.iter().position(|m| *m == parts[1])? as u32 + 1;
    let day: u32 = parts[2].parse().ok()?;
    Some((month, day))
}

/// Convert a display time and date into UTC milliseconds, using `year`.
///
/// Returns `0` for sentinel times ("", "Tentative", "All Day", "Day …") and
/// for anything that fails to parse. Never panics on bad input.
pub fn convert_to_utc_in_year(time: &str, date: &str, offset_hours: i32, year: i32) -> i64 {
    if is_sentinel_time(time) {
        return 0;
    }
    let Some((hour, minute)) = parse_clock(time) else {
        return 0;
    };
    let Some((month, day)) = parse_display_date(date) else {
        return 0;
    };
    let Some(local) =
        NaiveDate::from_ymd_opt(year, month, day).and_then(|d| d.and_hms_opt(hour, minute, 0))
    else {
        return 0;
    };

    // server local = UTC + offset
    local.and_utc().timestamp_millis() - i64::from(offset_hours) * MILLIS_PER_HOUR
}

/// Convert a display time and date into UTC milliseconds for the current
/// system year. See [`convert_to_utc_in_year`].
pub fn convert_to_utc(time: &str, date: &str, offset_hours: i32) -> i64 {
    convert_to_utc_in_year(time, date, offset_hours, Utc::now().year())
}

/// Render a UTC instant in `zone`'s fixed offset, or `"N/A"` for the `0`
/// sentinel. Zones missing from the table render in UTC.
pub fn format_timestamp(utc_millis: i64, zone: &str) -> String {
    if utc_millis == 0 {
        return "N/A".to_string();
    }
    let Some(instant) = DateTime::<Utc>::from_timestamp_millis(utc_millis) else {
        return "N/A".to_string();
    };
    let offset = zone_offset_hours(zone)
        .and_then(|h| FixedOffset::east_opt(h * 3600))
        .unwrap_or_else(|| Utc.fix());

    instant
        .with_timezone(&offset)
        .format("%a %b %-d, %Y %-I:%M%P")
        .to_string()
}
