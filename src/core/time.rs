//! Date, time-of-day and interval helpers shared by the store and the scheduler.
//!
//! Stored formats:
//! - dates are `DD-MM-YYYY`
//! - showtime times of day are `HHMM`
//! - repair timestamps are `DD-MM-YYYY HH:MMAM`

use super::{CinemaError, Result};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use lazy_static::lazy_static;
use regex::Regex;
use std::ops::Add;

pub const DATE_FORMAT: &str = "%d-%m-%Y";
pub const TIME_FORMAT: &str = "%H%M";
pub const REPAIR_TIME_FORMAT: &str = "%I:%M%p";

lazy_static! {
    static ref DURATION_PATTERN: Regex =
        Regex::new(r"^(?:(\d+)\s*h)?\s*(?:(\d+)\s*m)?$").expect("valid duration pattern");
}

pub fn parse_date(text: &str) -> Result<NaiveDate> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, DATE_FORMAT).map_err(|_| {
        CinemaError::Format(format!(
            "'{}' is not a date in the format DD-MM-YYYY (eg. 31-12-2000)",
            text
        ))
    })
}

pub fn parse_time(text: &str) -> Result<NaiveTime> {
    let text = text.trim();
    let malformed = || {
        CinemaError::Format(format!(
            "'{}' is not a time in the format HHMM (eg. 2359)",
            text
        ))
    };
    if text.len() != 4 || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }
    NaiveTime::parse_from_str(text, TIME_FORMAT).map_err(|_| malformed())
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

/// Parses `DD-MM-YYYY HH:MMAM`. The clock part tolerates a missing leading zero,
/// lowercase suffixes and a space before AM/PM (`8:00 am`).
pub fn parse_repair_timestamp(text: &str) -> Result<NaiveDateTime> {
    let text = text.trim();
    let (date_part, clock_part) = text.split_once(char::is_whitespace).ok_or_else(|| {
        CinemaError::Format(format!(
            "'{}' is not a timestamp in the format DD-MM-YYYY HH:MMAM",
            text
        ))
    })?;
    let date = parse_date(date_part)?;
    let clock: String = clock_part
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase();
    let time = NaiveTime::parse_from_str(&clock, REPAIR_TIME_FORMAT).map_err(|_| {
        CinemaError::Format(format!(
            "'{}' is not a time like 08:00AM or 8:00PM",
            clock_part.trim()
        ))
    })?;
    Ok(date.and_time(time))
}

pub fn format_repair_timestamp(at: NaiveDateTime) -> String {
    format!(
        "{} {}",
        format_date(at.date()),
        at.time().format(REPAIR_TIME_FORMAT)
    )
}

/// Parses a repair duration such as `2h 30m`, `3h` or `45m`.
pub fn parse_duration(text: &str) -> Result<Duration> {
    let normalized = text.trim().to_lowercase();
    let malformed = || {
        CinemaError::Format(format!(
            "'{}' is not a duration like 2h 30m",
            text.trim()
        ))
    };
    let caps = DURATION_PATTERN
        .captures(&normalized)
        .ok_or_else(malformed)?;
    let hours: i64 = match caps.get(1) {
        Some(m) => m.as_str().parse().map_err(|_| malformed())?,
        None => 0,
    };
    let minutes: i64 = match caps.get(2) {
        Some(m) => m.as_str().parse().map_err(|_| malformed())?,
        None => 0,
    };
    let total = hours * 60 + minutes;
    if total <= 0 {
        return Err(malformed());
    }
    Ok(Duration::minutes(total))
}

/// Drops seconds, then rounds up to the next multiple of five minutes.
/// A time already on a boundary is returned unchanged.
pub fn round_up_to_5_minutes(t: NaiveDateTime) -> NaiveDateTime {
    let truncated = t
        .with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(t);
    let remainder = truncated.minute() % 5;
    if remainder == 0 {
        truncated
    } else {
        truncated + Duration::minutes(i64::from(5 - remainder))
    }
}

/// End time of a show starting at `start` and running `duration_minutes`, on the 5-minute grid.
pub fn compute_end_time(start: NaiveTime, duration_minutes: i64) -> NaiveTime {
    let anchor = NaiveDate::default().and_time(start);
    round_up_to_5_minutes(anchor + Duration::minutes(duration_minutes)).time()
}

/// True when `[start_a, end_a]` and `[start_b, end_b]`, each padded by `buffer`,
/// intersect. A start exactly `buffer` after the other's end still conflicts;
/// only a strictly larger gap is disjoint.
pub fn intervals_overlap_with_buffer<T, B>(start_a: T, end_a: T, start_b: T, end_b: T, buffer: B) -> bool
where
    T: Copy + PartialOrd + Add<B, Output = T>,
    B: Copy,
{
    !(start_a > end_b + buffer || end_a + buffer < start_b)
}

// ============================================================================
// Slot
// ============================================================================

/// A concrete `[start, end]` span on the calendar.
///
/// Showtimes persist only a date plus two times of day, so an end time at or
/// before the start time means the show runs past midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Slot {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Slot for a movie of `duration_minutes` starting at `date` `start_time`.
    pub fn for_runtime(date: NaiveDate, start_time: NaiveTime, duration_minutes: i64) -> Self {
        let start = date.and_time(start_time);
        let end = round_up_to_5_minutes(start + Duration::minutes(duration_minutes));
        Self { start, end }
    }

    /// Rebuilds a slot from the stored date / start / end columns.
    pub fn from_stored(date: NaiveDate, start_time: NaiveTime, end_time: NaiveTime) -> Self {
        let start = date.and_time(start_time);
        let mut end = date.and_time(end_time);
        if end <= start {
            end += Duration::days(1);
        }
        Self { start, end }
    }

    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn start_time(&self) -> NaiveTime {
        self.start.time()
    }

    pub fn end_time(&self) -> NaiveTime {
        self.end.time()
    }

    pub fn overlaps(&self, other: &Slot, buffer: Duration) -> bool {
        intervals_overlap_with_buffer(self.start, self.end, other.start, other.end, buffer)
    }
}
