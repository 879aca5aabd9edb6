// Drag-to-time machinery for day columns

pub mod bus;
pub mod geometry;
pub mod gestures;
pub mod session;

pub use bus::{CursorStyle, InputBus, ListenerFlow, PointerButton, PointerEvent, PointerInput};
pub use geometry::{event_box, pixel_to_day_offset, pixel_to_time, ColumnRect, ColumnRef};
pub use gestures::{creation_gesture, move_gesture, resize_gesture, MoveBounds, ResizeEdge};
pub use session::{DragCallbacks, DragController, DragEnd, DragHandle, DragMove, DragOptions, DragSession};
