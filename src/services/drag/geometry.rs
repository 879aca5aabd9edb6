//! Pixel to wall-clock conversions for day columns.

use chrono::{Duration, NaiveDateTime, Timelike};
use std::cell::Cell;
use std::rc::Rc;

use crate::utils::date::start_of_day;

/// Number of day columns in a week view
pub const DAYS_PER_WEEK: i64 = 7;

/// Bounding box of a day column in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl ColumnRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn center_x(&self) -> f32 {
        self.left + self.width / 2.0
    }
}

/// Live handle to the current geometry of a day column.
///
/// The owning view mounts the rect every time it lays the column out; drag
/// math reads it on every conversion and never keeps a copy.
#[derive(Debug, Clone, Default)]
pub struct ColumnRef {
    rect: Rc<Cell<Option<ColumnRect>>>,
}

impl ColumnRef {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mount(&self, rect: ColumnRect) {
        self.rect.set(Some(rect));
    }

    pub fn unmount(&self) {
        self.rect.set(None);
    }

    pub fn rect(&self) -> Option<ColumnRect> {
        self.rect.get()
    }
}

/// Convert a vertical pointer position into a snapped time on `anchor`'s day.
///
/// The position is clamped to the column, so the bottom edge maps to the
/// following midnight. Without usable geometry `anchor` is returned unchanged.
pub fn pixel_to_time(
    y: f32,
    anchor: NaiveDateTime,
    rect: Option<ColumnRect>,
    snap_minutes: u32,
) -> NaiveDateTime {
    let Some(rect) = rect.filter(|r| r.height > 0.0) else {
        return anchor;
    };

    let fraction = ((f64::from(y) - f64::from(rect.top)) / f64::from(rect.height)).clamp(0.0, 1.0);
    let hours_from_midnight = 24.0 * fraction;
    let whole_hours = hours_from_midnight.floor();

    let snap = f64::from(snap_minutes.max(1));
    let minutes = ((hours_from_midnight - whole_hours) * 60.0 / snap).round() * snap;

    midnight(anchor) + Duration::hours(whole_hours as i64) + Duration::minutes(minutes as i64)
}

/// Signed number of columns the pointer has travelled from the anchor column.
///
/// `anchor_column` is the anchor's position within the week (0..=6); the
/// target column is clamped to the week. Without usable geometry this is 0.
pub fn pixel_to_day_offset(x: f32, anchor_column: i64, rect: Option<ColumnRect>) -> i64 {
    let Some(rect) = rect.filter(|r| r.width > 0.0) else {
        return 0;
    };

    let columns_moved = ((x - rect.center_x()) / rect.width).round() as i64;
    let target = (anchor_column + columns_moved).clamp(0, DAYS_PER_WEEK - 1);
    target - anchor_column
}

/// Fractional hours since midnight of `time`'s own day
pub fn hours_from_midnight(time: NaiveDateTime) -> f32 {
    time.hour() as f32 + time.minute() as f32 / 60.0
}

/// Vertical placement `(top, height)` of an event box inside its column.
///
/// `end` on a later day than `start` is clipped to the bottom of the column.
pub fn event_box(
    start: NaiveDateTime,
    end: NaiveDateTime,
    px_per_hour: f32,
    padding: f32,
) -> (f32, f32) {
    let start_hours = hours_from_midnight(start);
    let end_hours = if end.date() > start.date() {
        24.0
    } else {
        hours_from_midnight(end)
    };
    let duration = (end_hours - start_hours).max(0.0);

    let top = start_hours * px_per_hour + padding;
    let height = (duration * px_per_hour - padding * 2.0).max(0.0);
    (top, height)
}

fn midnight(time: NaiveDateTime) -> NaiveDateTime {
    start_of_day(time.date())
}
