//! Presentation helpers for event values.

use chrono::{DateTime, Datelike, NaiveDateTime, TimeZone, Timelike, Utc};

/// Parses an event start time.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS` and `YYYY-MM-DDTHH:MM:SS`. Times without an
/// offset are taken as UTC.
pub fn parse_event_time(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(time) = DateTime::parse_from_rfc3339(value) {
        return Some(time.with_timezone(&Utc));
    }

    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Formats a time as `Wednesday, January 18th 2017, 3:00:00 pm`.
pub fn format_event_time(time: &DateTime<Utc>) -> String {
    let (is_pm, hour) = time.hour12();
    format!(
        "{}, {} {}{} {}, {}:{:02}:{:02} {}",
        time.format("%A"),
        time.format("%B"),
        time.day(),
        ordinal_suffix(time.day()),
        time.year(),
        hour,
        time.minute(),
        time.second(),
        if is_pm { "pm" } else { "am" }
    )
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

/// Renders a duration in hours, switching to days when it is a whole number of days.
///
/// Fractional hours are kept as given, e.g. `1.5 hours`.
pub fn format_duration(hours: f64) -> String {
    let days = hours / 24.0;
    if days != 0.0 && days.fract() == 0.0 {
        format!("{} {}", days, if days == 1.0 { "day" } else { "days" })
    } else {
        format!("{} {}", hours, if hours == 1.0 { "hour" } else { "hours" })
    }
}

/// Formats a fee as Hong Kong dollars with thousands grouping, e.g. `HKD 1,000`.
pub fn format_fee(fee: i64) -> String {
    let digits = fee.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if fee < 0 {
        format!("-HKD {}", grouped)
    } else {
        format!("HKD {}", grouped)
    }
}
