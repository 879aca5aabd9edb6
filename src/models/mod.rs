// Module exports for models

pub mod category;
pub mod event;
pub mod interval;
pub mod settings;
pub mod ui;
