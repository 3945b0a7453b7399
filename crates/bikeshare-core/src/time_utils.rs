use chrono::{Month, NaiveDateTime, Weekday};
use tracing::warn;

/// Naive timestamp layouts found in the published trip files.
const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

// ── Timestamp parsing ─────────────────────────────────────────────────────────

/// Parse a trip start/end time.
///
/// Timestamps carry no offset in the source files and are kept as local
/// wall-clock time. Returns `None` for empty strings or unrecognised layouts.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    for fmt in TIMESTAMP_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    warn!("could not parse timestamp \"{}\"", s);
    None
}

// ── Display names ─────────────────────────────────────────────────────────────

/// Full English month name for a 1-based month number.
///
/// Out-of-range numbers yield `"Unknown"`.
pub fn month_name(number: u32) -> &'static str {
    u8::try_from(number)
        .ok()
        .and_then(|n| Month::try_from(n).ok())
        .map(|m| m.name())
        .unwrap_or("Unknown")
}

/// Full English weekday name.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Full English weekday name for a weekday number (1 = Monday ... 7 = Sunday).
pub fn weekday_name_from_number(number: u32) -> &'static str {
    match number {
        1 => weekday_name(Weekday::Mon),
        2 => weekday_name(Weekday::Tue),
        3 => weekday_name(Weekday::Wed),
        4 => weekday_name(Weekday::Thu),
        5 => weekday_name(Weekday::Fri),
        6 => weekday_name(Weekday::Sat),
        7 => weekday_name(Weekday::Sun),
        _ => "Unknown",
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
