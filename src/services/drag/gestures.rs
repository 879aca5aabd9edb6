//! Creation, resize and move gestures built on [`DragCallbacks`].
//!
//! The interval math is exposed as plain functions; the `*_gesture` builders
//! wire it into drag callbacks and report results through caller closures.

use chrono::{Duration, NaiveDateTime};

use super::session::DragCallbacks;
use crate::models::event::Event;
use crate::models::interval::sorted_pair;
use crate::utils::date::start_of_day;

/// Event edge grabbed by a resize handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeEdge {
    Top,
    Bottom,
}

/// How far a moved event may travel while staying on its anchor day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveBounds {
    /// Zero or negative
    pub max_move_up: Duration,
    /// Zero or positive
    pub max_move_down: Duration,
}

impl MoveBounds {
    pub fn for_event(event: &Event) -> Self {
        let day_start = start_of_day(event.start.date());
        let next_midnight = day_start + Duration::days(1);

        Self {
            max_move_up: -(event.start - day_start),
            max_move_down: (next_midnight - event.end).max(Duration::zero()),
        }
    }

    pub fn clamp(&self, delta: Duration) -> Duration {
        delta.max(self.max_move_up).min(self.max_move_down)
    }
}

/// Interval spanned by a creation drag
pub fn creation_interval(
    anchor_time: NaiveDateTime,
    current_time: NaiveDateTime,
) -> (NaiveDateTime, NaiveDateTime) {
    sorted_pair(anchor_time, current_time)
}

/// Interval after dragging `edge` of `event` to `current_time`.
///
/// The other edge stays fixed; dragging past it swaps which edge is the start.
pub fn resize_interval(
    event: &Event,
    edge: ResizeEdge,
    current_time: NaiveDateTime,
) -> (NaiveDateTime, NaiveDateTime) {
    let fixed = match edge {
        ResizeEdge::Top => event.end,
        ResizeEdge::Bottom => event.start,
    };
    sorted_pair(fixed, current_time)
}

/// Interval after moving `event` by the pointer travel, clamped to its day.
pub fn move_interval(
    event: &Event,
    start_time: NaiveDateTime,
    current_time: NaiveDateTime,
) -> (NaiveDateTime, NaiveDateTime) {
    let delta = MoveBounds::for_event(event).clamp(current_time - start_time);
    (event.start + delta, event.end + delta)
}

/// Drag on empty column space producing a preview event.
///
/// `on_preview` receives the preview on every move; `on_release` receives the
/// final preview when the pointer is released so the caller can open a form.
/// A release without any movement produces nothing.
pub fn creation_gesture(
    category_id: Option<i64>,
    mut on_preview: impl FnMut(Event) + 'static,
    mut on_release: impl FnMut(Event) + 'static,
) -> DragCallbacks {
    DragCallbacks::new()
        .on_move(move |m| {
            let (start, end) = creation_interval(m.start_time, m.current_time);
            on_preview(Event::preview(start, end, category_id));
        })
        .on_end(move |e| {
            if e.end_time == e.start_time {
                return;
            }
            let (start, end) = creation_interval(e.start_time, e.end_time);
            on_release(Event::preview(start, end, category_id));
        })
}

/// Drag on a top or bottom handle of `event`.
pub fn resize_gesture(
    event: Event,
    edge: ResizeEdge,
    mut on_preview: impl FnMut(Event) + 'static,
    mut on_commit: impl FnMut(Event) + 'static,
) -> DragCallbacks {
    let preview_source = event.clone();
    DragCallbacks::new()
        .on_move(move |m| {
            let (start, end) = resize_interval(&preview_source, edge, m.current_time);
            on_preview(preview_source.with_times(start, end));
        })
        .on_end(move |e| {
            let (start, end) = resize_interval(&event, edge, e.end_time);
            on_commit(event.with_times(start, end));
        })
}

/// Drag on the body of `event`.
///
/// `on_preview` receives the time-shifted event and the current day offset.
/// On release the day offset is applied to both edges; nothing is committed
/// when the event did not move.
pub fn move_gesture(
    event: Event,
    mut on_preview: impl FnMut(Event, i64) + 'static,
    mut on_commit: impl FnMut(Event) + 'static,
) -> DragCallbacks {
    let preview_source = event.clone();
    DragCallbacks::new()
        .on_move(move |m| {
            let (start, end) = move_interval(&preview_source, m.start_time, m.current_time);
            on_preview(preview_source.with_times(start, end), m.day_offset);
        })
        .on_end(move |e| {
            let (start, end) = move_interval(&event, e.start_time, e.end_time);
            if start == event.start && e.day_offset == 0 {
                return;
            }
            on_commit(event.with_times(start, end).shifted_by_days(e.day_offset));
        })
}
