//! Single pointer-drag lifecycle: `Idle -> Dragging -> Idle`.

use chrono::NaiveDateTime;
use std::cell::RefCell;
use std::rc::Rc;

use super::bus::{CursorStyle, InputBus, ListenerFlow, ListenerId, PointerButton, PointerEvent, PointerInput};
use super::geometry::{pixel_to_day_offset, pixel_to_time, ColumnRef};
use crate::models::settings::DEFAULT_SNAP_MINUTES;

/// Observable state of one drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    /// Timestamp whose day the column represents
    pub anchor: NaiveDateTime,
    pub start_y: f32,
    pub current_x: f32,
    pub current_y: f32,
    pub is_dragging: bool,
    pub day_offset: i64,
}

/// Payload of every pointer move during a drag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragMove {
    pub start_time: NaiveDateTime,
    pub current_time: NaiveDateTime,
    pub start_y: f32,
    pub current_y: f32,
    pub day_offset: i64,
}

/// Payload of the release that ends a drag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragEnd {
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub start_y: f32,
    pub end_y: f32,
    pub day_offset: i64,
}

type MoveCallback = Box<dyn FnMut(&DragMove)>;
type EndCallback = Box<dyn FnMut(&DragEnd)>;

/// Callbacks registered for a single drag.
#[derive(Default)]
pub struct DragCallbacks {
    pub on_drag_move: Option<MoveCallback>,
    pub on_drag_end: Option<EndCallback>,
}

impl DragCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_move(mut self, callback: impl FnMut(&DragMove) + 'static) -> Self {
        self.on_drag_move = Some(Box::new(callback));
        self
    }

    pub fn on_end(mut self, callback: impl FnMut(&DragEnd) + 'static) -> Self {
        self.on_drag_end = Some(Box::new(callback));
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragOptions {
    pub snap_minutes: u32,
    /// Position of the anchor column within the week; `None` pins the day offset to 0
    pub anchor_column: Option<i64>,
    pub cursor: CursorStyle,
}

impl Default for DragOptions {
    fn default() -> Self {
        Self {
            snap_minutes: DEFAULT_SNAP_MINUTES,
            anchor_column: None,
            cursor: CursorStyle::Move,
        }
    }
}

/// Converts pointer input over one day column into drag sessions.
#[derive(Debug, Clone)]
pub struct DragController {
    bus: InputBus,
    column: ColumnRef,
    anchor: NaiveDateTime,
    options: DragOptions,
}

impl DragController {
    pub fn new(bus: InputBus, column: ColumnRef, anchor: NaiveDateTime, options: DragOptions) -> Self {
        Self {
            bus,
            column,
            anchor,
            options,
        }
    }

    pub fn pixel_to_time(&self, y: f32) -> NaiveDateTime {
        pixel_to_time(y, self.anchor, self.column.rect(), self.options.snap_minutes)
    }

    pub fn pixel_to_day_offset(&self, x: f32) -> i64 {
        match self.options.anchor_column {
            Some(anchor_column) => pixel_to_day_offset(x, anchor_column, self.column.rect()),
            None => 0,
        }
    }

    /// Start a drag from `pointer_down`.
    ///
    /// Returns `None` for anything but the primary button. The session ends on
    /// the next pointer release delivered through the bus, wherever it happens.
    pub fn start_drag(&self, pointer_down: &PointerEvent, callbacks: DragCallbacks) -> Option<DragHandle> {
        if pointer_down.button != PointerButton::Primary {
            return None;
        }

        let start_y = pointer_down.y;
        let start_time = self.pixel_to_time(start_y);
        let state = Rc::new(RefCell::new(DragSession {
            anchor: self.anchor,
            start_y,
            current_x: pointer_down.x,
            current_y: start_y,
            is_dragging: true,
            day_offset: 0,
        }));

        let DragCallbacks {
            mut on_drag_move,
            mut on_drag_end,
        } = callbacks;
        let controller = self.clone();
        let session = state.clone();

        let listener_id = self.bus.subscribe(move |input| {
            if !session.borrow().is_dragging {
                return ListenerFlow::Remove;
            }

            match *input {
                PointerInput::Move { x, y } => {
                    let update = {
                        let mut s = session.borrow_mut();
                        s.current_x = x;
                        s.current_y = y;
                        s.day_offset = controller.pixel_to_day_offset(x);
                        DragMove {
                            start_time,
                            current_time: controller.pixel_to_time(y),
                            start_y,
                            current_y: y,
                            day_offset: s.day_offset,
                        }
                    };
                    if let Some(callback) = on_drag_move.as_mut() {
                        callback(&update);
                    }
                    ListenerFlow::Continue
                }
                PointerInput::Up { x, y } => {
                    let end = {
                        let mut s = session.borrow_mut();
                        s.current_x = x;
                        s.current_y = y;
                        s.day_offset = controller.pixel_to_day_offset(x);
                        s.is_dragging = false;
                        DragEnd {
                            start_time,
                            end_time: controller.pixel_to_time(y),
                            start_y,
                            end_y: y,
                            day_offset: s.day_offset,
                        }
                    };
                    if let Some(callback) = on_drag_end.as_mut() {
                        callback(&end);
                    }
                    controller.restore_bus_style();
                    ListenerFlow::Remove
                }
            }
        });

        self.bus.set_text_selection(false);
        self.bus.set_cursor(self.options.cursor);
        log::debug!("Drag started at y={} ({})", start_y, start_time);

        Some(DragHandle {
            bus: self.bus.clone(),
            listener_id,
            state,
        })
    }

    fn restore_bus_style(&self) {
        self.bus.set_text_selection(true);
        self.bus.set_cursor(CursorStyle::Default);
    }
}

/// Owner of a running drag; cancelling removes its bus listener.
///
/// Dropping the handle leaves the session running until the pointer is released.
#[derive(Debug)]
pub struct DragHandle {
    bus: InputBus,
    listener_id: ListenerId,
    state: Rc<RefCell<DragSession>>,
}

impl DragHandle {
    pub fn is_dragging(&self) -> bool {
        self.state.borrow().is_dragging
    }

    pub fn session(&self) -> DragSession {
        *self.state.borrow()
    }

    /// Tear the session down without firing `on_drag_end`.
    pub fn cancel(&self) {
        let was_dragging = {
            let mut s = self.state.borrow_mut();
            std::mem::replace(&mut s.is_dragging, false)
        };
        self.bus.unsubscribe(self.listener_id);

        if was_dragging {
            self.bus.set_text_selection(true);
            self.bus.set_cursor(CursorStyle::Default);
            log::debug!("Drag cancelled");
        }
    }
}
