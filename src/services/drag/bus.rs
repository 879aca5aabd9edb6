//! Process-wide pointer input bus.
//!
//! Drag sessions subscribe here instead of to the widget they started on, so
//! a session keeps receiving moves and its release even when the pointer
//! leaves the column. Hosts (the egui adapter, tests) feed raw pointer input
//! through [`InputBus::dispatch`].

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// Pointer press that may start a drag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub x: f32,
    pub y: f32,
    pub button: PointerButton,
}

impl PointerEvent {
    pub fn primary(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            button: PointerButton::Primary,
        }
    }
}

/// Input delivered to subscribed listeners
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerInput {
    Move { x: f32, y: f32 },
    Up { x: f32, y: f32 },
}

/// What a listener wants after handling an input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerFlow {
    Continue,
    Remove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorStyle {
    #[default]
    Default,
    Move,
    ResizeVertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&PointerInput) -> ListenerFlow>;

struct BusState {
    listeners: Vec<(ListenerId, Listener)>,
    next_id: u64,
    dispatching: bool,
    removed_while_dispatching: Vec<ListenerId>,
    text_selection: bool,
    cursor: CursorStyle,
}

impl Default for BusState {
    fn default() -> Self {
        Self {
            listeners: Vec::new(),
            next_id: 0,
            dispatching: false,
            removed_while_dispatching: Vec::new(),
            text_selection: true,
            cursor: CursorStyle::Default,
        }
    }
}

/// Shared handle to the pointer bus; clones refer to the same bus.
#[derive(Clone, Default)]
pub struct InputBus {
    state: Rc<RefCell<BusState>>,
}

impl fmt::Debug for InputBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("InputBus")
            .field("listeners", &state.listeners.len())
            .field("text_selection", &state.text_selection)
            .field("cursor", &state.cursor)
            .finish()
    }
}

impl InputBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(
        &self,
        listener: impl FnMut(&PointerInput) -> ListenerFlow + 'static,
    ) -> ListenerId {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        let id = ListenerId(state.next_id);
        state.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Unknown ids are ignored.
    pub fn unsubscribe(&self, id: ListenerId) {
        let mut state = self.state.borrow_mut();
        let before = state.listeners.len();
        state.listeners.retain(|(existing, _)| *existing != id);

        // Listeners are moved out while dispatching; remember the removal
        if state.listeners.len() == before && state.dispatching {
            state.removed_while_dispatching.push(id);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.state.borrow().listeners.len()
    }

    /// Deliver `input` to every listener in subscription order.
    pub fn dispatch(&self, input: PointerInput) {
        let mut active = {
            let mut state = self.state.borrow_mut();
            state.dispatching = true;
            std::mem::take(&mut state.listeners)
        };

        let mut finished = Vec::new();
        for (id, listener) in active.iter_mut() {
            let removed = self.state.borrow().removed_while_dispatching.contains(id);
            if removed {
                continue;
            }
            if listener(&input) == ListenerFlow::Remove {
                finished.push(*id);
            }
        }

        let mut state = self.state.borrow_mut();
        state.dispatching = false;
        let removed = std::mem::take(&mut state.removed_while_dispatching);
        active.retain(|(id, _)| !finished.contains(id) && !removed.contains(id));

        // Keep listeners subscribed during dispatch after the existing ones
        let added = std::mem::take(&mut state.listeners);
        active.extend(added);
        state.listeners = active;
    }

    pub fn set_text_selection(&self, enabled: bool) {
        self.state.borrow_mut().text_selection = enabled;
    }

    pub fn text_selection_enabled(&self) -> bool {
        self.state.borrow().text_selection
    }

    pub fn set_cursor(&self, cursor: CursorStyle) {
        self.state.borrow_mut().cursor = cursor;
    }

    pub fn cursor(&self) -> CursorStyle {
        self.state.borrow().cursor
    }
}
