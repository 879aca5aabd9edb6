use super::confirm::EventForm;
use super::CalendarApp;
use crate::models::event::{Event, EventId};
use crate::services::drag::{
    creation_gesture, move_gesture, resize_gesture, CursorStyle, DragController, DragOptions,
    PointerEvent,
};
use crate::services::event::{apply_mutation, day_range, events_for_day, events_for_range, Mutation};
use crate::services::layout::PositionedEvent;
use crate::ui_egui::views::DragTarget;
use crate::utils::date::start_of_day;
use chrono::NaiveDate;

/// Results reported by gesture callbacks during bus dispatch
#[derive(Debug, Clone)]
pub(super) enum GestureMessage {
    Preview(Event),
    /// Creation released; open the confirmation form
    Draft(Event),
    Commit(Event),
}

impl CalendarApp {
    pub(super) fn start_drag(&mut self, column: usize, pointer: PointerEvent, target: DragTarget) {
        if self.active_drag.is_some() || self.form.is_some() {
            return;
        }
        let (Some(column_ref), Some(date)) = (
            self.columns.get(column).cloned(),
            self.visible_days().get(column).copied(),
        ) else {
            return;
        };

        let (anchor, cursor) = match &target {
            DragTarget::Create => (start_of_day(date), CursorStyle::ResizeVertical),
            DragTarget::Resize(event, _) => (event.start, CursorStyle::ResizeVertical),
            DragTarget::Move(event) => (event.start, CursorStyle::Move),
        };
        let options = DragOptions {
            snap_minutes: self.settings.snap_minutes,
            anchor_column: self.current_view.allows_day_offset().then_some(column as i64),
            cursor,
        };

        let previews = self.outbox.clone();
        let results = self.outbox.clone();
        let callbacks = match target {
            DragTarget::Create => creation_gesture(
                self.palette.default_category().map(|c| c.id),
                move |event| previews.borrow_mut().push(GestureMessage::Preview(event)),
                move |event| results.borrow_mut().push(GestureMessage::Draft(event)),
            ),
            DragTarget::Resize(event, edge) => resize_gesture(
                event,
                edge,
                move |event| previews.borrow_mut().push(GestureMessage::Preview(event)),
                move |event| results.borrow_mut().push(GestureMessage::Commit(event)),
            ),
            DragTarget::Move(event) => move_gesture(
                event,
                move |event, day_offset| {
                    previews
                        .borrow_mut()
                        .push(GestureMessage::Preview(event.shifted_by_days(day_offset)))
                },
                move |event| results.borrow_mut().push(GestureMessage::Commit(event)),
            ),
        };

        let controller = DragController::new(self.bus.clone(), column_ref, anchor, options);
        self.active_drag = controller.start_drag(&pointer, callbacks);
    }

    /// Apply what gesture callbacks reported since the last frame.
    pub(super) fn process_gesture_messages(&mut self) {
        let messages: Vec<GestureMessage> = self.outbox.borrow_mut().drain(..).collect();

        for message in messages {
            match message {
                GestureMessage::Preview(event) => self.overlay = Some(event),
                GestureMessage::Draft(event) => {
                    self.overlay = Some(event.clone());
                    self.form = Some(EventForm::new(event));
                }
                GestureMessage::Commit(event) => {
                    self.overlay = None;
                    if let Err(err) = self.collection.update(&event, self.store.as_mut()) {
                        log::warn!("Could not save event {}: {}", event.id, err);
                    }
                }
            }
        }

        if self.active_drag.as_ref().is_some_and(|handle| !handle.is_dragging()) {
            self.active_drag = None;
            if self.form.is_none() {
                self.overlay = None;
            }
        }
    }

    /// Abort the running drag or discard the open form.
    pub(super) fn cancel_gesture(&mut self) {
        if let Some(handle) = self.active_drag.take() {
            handle.cancel();
        }
        self.outbox.borrow_mut().clear();
        self.form = None;
        self.overlay = None;
    }

    pub(super) fn delete_event(&mut self, id: EventId) {
        match self.collection.delete(id, self.store.as_mut()) {
            Ok(()) => log::info!("Deleted event {}", id),
            Err(err) => log::warn!("Could not delete event {}: {}", id, err),
        }
    }

    /// Timed events of `day` with the current overlay applied.
    ///
    /// A draft overlay is added to the day; an overlay of an existing event
    /// replaces that event.
    pub(super) fn displayed_day(&self, day: NaiveDate) -> Vec<PositionedEvent> {
        match &self.overlay {
            Some(overlay) if overlay.is_draft() => self.collection.day(day, Some(overlay)),
            Some(overlay) => {
                let events = apply_mutation(self.collection.events(), &Mutation::Update(overlay.clone()));
                events_for_day(&events, day, None)
            }
            None => self.collection.day(day, None),
        }
    }

    pub(super) fn displayed_all_day(&self, days: &[NaiveDate]) -> Vec<PositionedEvent> {
        let (Some(first), Some(last)) = (days.first(), days.last()) else {
            return Vec::new();
        };
        let (start, end) = day_range(*first, *last);

        match &self.overlay {
            Some(overlay) if !overlay.is_draft() => {
                let events = apply_mutation(self.collection.events(), &Mutation::Update(overlay.clone()));
                events_for_range(&events, start, end)
            }
            _ => self.collection.range(start, end),
        }
    }
}
