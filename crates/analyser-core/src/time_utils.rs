use std::sync::OnceLock;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use regex::Regex;
use tracing::warn;

use crate::error::{AnalyserError, Result};
use crate::models::CalendarFields;

/// Weekday names in display order (Monday first).
pub const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Month names in calendar order.
pub const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Characters stripped from both ends of a matched message marker before its
/// date/time is parsed.
const MARKER_BOUNDARY: &[char] = &['\u{202f}', '\u{a0}', '-', ' ', '\n', '\r', '\t'];

fn timestamp_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^(\d{2})/(\d{2})/(\d{4}|\d{2}),\s*(\d{1,2}):(\d{2})\s?(am|pm)$")
            .expect("regex is valid")
    })
}

// ── Marker timestamps ─────────────────────────────────────────────────────────

/// Strip boundary separators (no-break spaces, hyphens, whitespace) from a raw
/// message marker such as `"\n01/01/23, 10:00\u{202f}am - "`.
pub fn clean_marker(marker: &str) -> &str {
    marker.trim_matches(MARKER_BOUNDARY)
}

/// Parse a cleaned marker like `"01/01/23, 10:00\u{202f}am"` into a local
/// date-time.
///
/// The grammar is day/month/year (two- or four-digit year), a 12-hour clock
/// `h:mm` and an `am`/`pm` marker.  Two-digit years are read as `2000 + YY`.
/// Anything else, including impossible dates and 24-hour markers, is a
/// [`AnalyserError::MalformedTimestamp`].
pub fn parse_marker_timestamp(s: &str) -> Result<NaiveDateTime> {
    let malformed = || AnalyserError::MalformedTimestamp(s.to_string());

    let caps = timestamp_regex().captures(s).ok_or_else(malformed)?;
    let field = |i: usize| -> Result<u32> {
        caps[i].parse::<u32>().map_err(|_| malformed())
    };

    let day = field(1)?;
    let month = field(2)?;
    let year_digits = &caps[3];
    let mut year = field(3)? as i32;
    if year_digits.len() == 2 {
        year += 2000;
    }
    let hour12 = field(4)?;
    let minute = field(5)?;

    if !(1..=12).contains(&hour12) {
        warn!("Marker hour {} is outside the 12-hour clock", hour12);
        return Err(malformed());
    }
    let is_pm = caps[6].eq_ignore_ascii_case("pm");
    let hour = hour12 % 12 + if is_pm { 12 } else { 0 };

    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .ok_or_else(malformed)
}

// ── Calendar enrichment ───────────────────────────────────────────────────────

/// Label of the one-hour window starting at `hour`.
///
/// `"H-H+1"` in general, `"23-00"` for the last hour and `"00-1"` for the
/// first.
pub fn hour_bucket(hour: u32) -> String {
    match hour {
        23 => "23-00".to_string(),
        0 => "00-1".to_string(),
        h => format!("{}-{}", h, h + 1),
    }
}

/// English name of a month number (1–12).
pub fn month_name(month: u32) -> &'static str {
    MONTHS[(month as usize).saturating_sub(1).min(11)]
}

impl CalendarFields {
    /// Derive every calendar field of `ts`.  Total for any valid timestamp.
    pub fn from_timestamp(ts: NaiveDateTime) -> Self {
        let date = ts.date();
        Self {
            year: date.year(),
            month: date.month(),
            month_name: month_name(date.month()).to_string(),
            day_of_month: date.day(),
            weekday_name: WEEKDAYS[date.weekday().num_days_from_monday() as usize].to_string(),
            hour: ts.hour(),
            minute: ts.minute(),
            date_only: date,
            hour_bucket: hour_bucket(ts.hour()),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
