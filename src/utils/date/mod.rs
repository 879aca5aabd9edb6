// Date and time display helpers

use chrono::{NaiveDate, NaiveDateTime, Timelike};

pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(chrono::NaiveTime::MIN)
}

/// Compact 12-hour clock text: `9am`, `9:30pm`, or `9:30` without the period.
pub fn format_time(time: NaiveDateTime, show_period: bool) -> String {
    let hour = time.hour() % 12;
    let mut text = if hour == 0 { "12".to_string() } else { hour.to_string() };

    if time.minute() != 0 {
        text.push_str(&format!(":{:02}", time.minute()));
    }
    if show_period {
        text.push_str(if time.hour() >= 12 { "pm" } else { "am" });
    }
    text
}

/// `start - end`, naming the start's period only when it differs from the end's.
pub fn format_time_range(start: NaiveDateTime, end: NaiveDateTime) -> String {
    let show_start_period = (start.hour() >= 12) != (end.hour() >= 12);
    format!(
        "{} - {}",
        format_time(start, show_start_period),
        format_time(end, true)
    )
}

/// Label for an hour row in the time column, e.g. `9 AM`
pub fn hour_label(hour: u32) -> String {
    let period = if hour < 12 { "AM" } else { "PM" };
    let display = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{} {}", display, period)
}
