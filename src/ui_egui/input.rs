//! Bridges egui's per-frame pointer state onto the [`InputBus`].

use egui::{Context, CursorIcon, Rect};

use crate::services::drag::{ColumnRect, CursorStyle, InputBus, PointerButton, PointerEvent, PointerInput};

impl From<Rect> for ColumnRect {
    fn from(rect: Rect) -> Self {
        ColumnRect::new(rect.left(), rect.top(), rect.width(), rect.height())
    }
}

pub fn cursor_icon(style: CursorStyle) -> CursorIcon {
    match style {
        CursorStyle::Default => CursorIcon::Default,
        CursorStyle::Move => CursorIcon::Grabbing,
        CursorStyle::ResizeVertical => CursorIcon::ResizeVertical,
    }
}

pub fn pointer_button(button: egui::PointerButton) -> PointerButton {
    match button {
        egui::PointerButton::Primary => PointerButton::Primary,
        egui::PointerButton::Secondary => PointerButton::Secondary,
        _ => PointerButton::Middle,
    }
}

/// The press that started the current egui drag, if any.
pub fn pointer_down(ctx: &Context) -> Option<PointerEvent> {
    ctx.input(|i| {
        let origin = i.pointer.press_origin()?;
        let button = [
            egui::PointerButton::Primary,
            egui::PointerButton::Secondary,
            egui::PointerButton::Middle,
        ]
        .into_iter()
        .find(|b| i.pointer.button_down(*b))?;

        Some(PointerEvent {
            x: origin.x,
            y: origin.y,
            button: pointer_button(button),
        })
    })
}

/// Forward this frame's pointer motion and primary release to the bus.
///
/// Only called while a drag is subscribed, so idle frames cost nothing.
pub fn pump_pointer(ctx: &Context, bus: &InputBus) {
    if bus.listener_count() == 0 {
        return;
    }

    let (position, moved, released) = ctx.input(|i| {
        (
            i.pointer.latest_pos(),
            i.pointer.is_moving(),
            i.pointer.primary_released(),
        )
    });
    let Some(pos) = position else {
        return;
    };

    if released {
        bus.dispatch(PointerInput::Up { x: pos.x, y: pos.y });
    } else if moved {
        bus.dispatch(PointerInput::Move { x: pos.x, y: pos.y });
    }
}

/// Mirror the bus cursor and text-selection flags onto egui.
pub fn apply_bus_style(ctx: &Context, bus: &InputBus) {
    let selectable = bus.text_selection_enabled();
    ctx.style_mut(|style| style.interaction.selectable_labels = selectable);

    let cursor = bus.cursor();
    if cursor != CursorStyle::Default {
        ctx.set_cursor_icon(cursor_icon(cursor));
    }
}
