mod app;
pub mod input;
pub mod views;

pub use app::CalendarApp;
