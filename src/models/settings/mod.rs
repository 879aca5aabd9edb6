// Settings module
// Layout and interaction constants, persisted as TOML

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::ui::ViewType;

pub const DEFAULT_SNAP_MINUTES: u32 = 15;
pub const DEFAULT_PX_PER_HOUR: f32 = 75.0;
pub const DEFAULT_EVENT_PADDING: f32 = 3.0;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("Snap granularity must be between 1 and 60 minutes and divide an hour evenly")]
    InvalidSnap,
    #[error("Pixels per hour must be positive")]
    InvalidHourHeight,
    #[error("Event padding must be non-negative and smaller than half an hour slot")]
    InvalidPadding,
    #[error("First day of week must be between 0 (Sunday) and 6 (Saturday)")]
    InvalidFirstDayOfWeek,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Minute resolution drag positions are rounded to
    pub snap_minutes: u32,
    /// Height of one hour in the time grid
    pub px_per_hour: f32,
    /// Inset applied around each event box
    pub event_padding: f32,
    /// 0 = Sunday .. 6 = Saturday
    pub first_day_of_week: u8,
    pub default_view: ViewType,
    pub show_all_day_row: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            snap_minutes: DEFAULT_SNAP_MINUTES,
            px_per_hour: DEFAULT_PX_PER_HOUR,
            event_padding: DEFAULT_EVENT_PADDING,
            first_day_of_week: 0, // Sunday
            default_view: ViewType::Week,
            show_all_day_row: true,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.snap_minutes == 0 || self.snap_minutes > 60 || 60 % self.snap_minutes != 0 {
            return Err(SettingsError::InvalidSnap);
        }
        if !(self.px_per_hour.is_finite() && self.px_per_hour > 0.0) {
            return Err(SettingsError::InvalidHourHeight);
        }
        if !(self.event_padding >= 0.0 && self.event_padding * 4.0 < self.px_per_hour) {
            return Err(SettingsError::InvalidPadding);
        }
        if self.first_day_of_week > 6 {
            return Err(SettingsError::InvalidFirstDayOfWeek);
        }
        Ok(())
    }

    /// Total height of a 24 hour day column
    pub fn day_height(&self) -> f32 {
        self.px_per_hour * 24.0
    }
}
