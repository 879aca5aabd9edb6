//! Day and range selection feeding the layout engine.
//!
//! Timed events are selected by the calendar date of their start; all-day
//! events by an inclusive range test. Neither is the strict overlap used for
//! channel assignment.

use chrono::{NaiveDate, NaiveDateTime};

use crate::models::event::Event;
use crate::models::interval::is_same_day;
use crate::services::layout::{compute_layout, PositionedEvent};
use crate::utils::date::start_of_day;

/// Timed events starting on `day`, laid out into channels.
///
/// `preview` is merged in before filtering, so it only takes part in the
/// layout when it lands on `day`.
pub fn events_for_day(
    all: &[Event],
    day: NaiveDate,
    preview: Option<&Event>,
) -> Vec<PositionedEvent> {
    let day_start = start_of_day(day);

    let selected: Vec<Event> = all
        .iter()
        .chain(preview)
        .filter(|event| !event.all_day && is_same_day(event.start, day_start))
        .cloned()
        .collect();

    compute_layout(&selected)
}

/// All-day events touching `[range_start, range_end]` (both inclusive), laid out into rows.
pub fn events_for_range(
    all: &[Event],
    range_start: NaiveDateTime,
    range_end: NaiveDateTime,
) -> Vec<PositionedEvent> {
    let selected: Vec<Event> = all
        .iter()
        .filter(|event| event.all_day && event.end >= range_start && event.start <= range_end)
        .cloned()
        .collect();

    compute_layout(&selected)
}

/// Inclusive bounds covering whole days from `first` through `last`.
pub fn day_range(first: NaiveDate, last: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    let start = start_of_day(first);
    let end = last.and_hms_opt(23, 59, 59).unwrap_or_default();
    (start, end)
}
