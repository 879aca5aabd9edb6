pub mod days_view;
pub mod month_view;

use egui::Color32;

use crate::models::category::{parse_hex_rgb, CategoryPalette, FALLBACK_COLOR};
use crate::models::event::{Event, EventId};
use crate::services::drag::{PointerEvent, ResizeEdge};

pub const TIME_LABEL_WIDTH: f32 = 50.0;
pub const COLUMN_SPACING: f32 = 1.0;
pub const HEADER_HEIGHT: f32 = 28.0;
pub const ALL_DAY_ROW_HEIGHT: f32 = 22.0;
/// Grab zone at the top and bottom of an event box
pub const RESIZE_HANDLE_HEIGHT: f32 = 6.0;

/// What a pressed event box or column wants to do
#[derive(Debug, Clone)]
pub enum DragTarget {
    Create,
    Resize(Event, ResizeEdge),
    Move(Event),
}

/// Requests a view hands back to the app after a frame.
#[derive(Debug, Clone)]
pub enum ViewAction {
    StartDrag {
        column: usize,
        pointer: PointerEvent,
        target: DragTarget,
    },
    /// Open the form for an existing event
    Edit(Event),
    /// Open the form for a new event on a date
    NewEvent(chrono::NaiveDate),
    Delete(EventId),
    OpenDay(chrono::NaiveDate),
    OpenMonth(chrono::NaiveDate),
}

pub fn category_color(palette: &CategoryPalette, category_id: Option<i64>) -> Color32 {
    let [r, g, b] = parse_hex_rgb(palette.color_of(category_id))
        .or_else(|| parse_hex_rgb(FALLBACK_COLOR))
        .unwrap_or([115, 115, 115]);
    Color32::from_rgb(r, g, b)
}

/// Black or white, whichever reads better on `background`
pub fn text_color_for(background: Color32) -> Color32 {
    let luminance = 0.299 * background.r() as f32
        + 0.587 * background.g() as f32
        + 0.114 * background.b() as f32;
    if luminance > 160.0 {
        Color32::BLACK
    } else {
        Color32::WHITE
    }
}
