//! Lenient parsing of the simple date and time strings cards carry.
//!
//! Callers treat `None` as "leave the control unset".

use chrono::{NaiveDate, NaiveTime};

/// Parses `HH:mm` (24h). Out-of-range components yield `None`.
pub fn parse_simple_time(value: &str) -> Option<NaiveTime> {
    let (hours, minutes) = value.trim().split_once(':')?;
    if hours.is_empty() || hours.len() > 2 || minutes.len() != 2 {
        return None;
    }
    if !hours.chars().chain(minutes.chars()).all(|c| c.is_ascii_digit()) {
        return None;
    }
    let hours: u32 = hours.parse().ok()?;
    let minutes: u32 = minutes.parse().ok()?;
    NaiveTime::from_hms_opt(hours, minutes, 0)
}

/// Parses `yyyy-MM-dd`, ignoring any time suffix.
pub fn parse_simple_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    let date = value.split_once('T').map_or(value, |(date, _)| date);
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

pub fn format_time(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
