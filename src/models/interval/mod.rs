//! Time interval primitives shared by the layout engine and the drag gestures.
//!
//! All timestamps are local wall-clock values (`NaiveDateTime`).

use chrono::{Datelike, NaiveDateTime};
use std::cmp::Ordering;

/// Anything with a start and an end on the wall clock.
///
/// Implementors are expected to keep `start() <= end()`.
pub trait TimeInterval {
    fn start(&self) -> NaiveDateTime;
    fn end(&self) -> NaiveDateTime;
}

impl TimeInterval for (NaiveDateTime, NaiveDateTime) {
    fn start(&self) -> NaiveDateTime {
        self.0
    }

    fn end(&self) -> NaiveDateTime {
        self.1
    }
}

/// Half-open overlap: an interval ending exactly when another starts does not overlap it.
pub fn overlaps<A, B>(a: &A, b: &B) -> bool
where
    A: TimeInterval + ?Sized,
    B: TimeInterval + ?Sized,
{
    a.start() < b.end() && b.start() < a.end()
}

/// Comparator for sorting timestamps in ascending order.
pub fn time_ascending(a: &NaiveDateTime, b: &NaiveDateTime) -> Ordering {
    a.cmp(b)
}

/// Calendar-date equality (year, month and day), not a 24 hour window.
pub fn is_same_day(a: NaiveDateTime, b: NaiveDateTime) -> bool {
    a.year() == b.year() && a.month() == b.month() && a.day() == b.day()
}

/// Returns the two timestamps ordered so that the first is not after the second.
pub fn sorted_pair(a: NaiveDateTime, b: NaiveDateTime) -> (NaiveDateTime, NaiveDateTime) {
    let mut pair = [a, b];
    pair.sort_by(time_ascending);
    (pair[0], pair[1])
}
