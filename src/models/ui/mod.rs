// UI models module
// View selection shared by navigation, settings and the demo app

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewType {
    Day,
    #[default]
    Week,
    Month,
    Year,
}

impl ViewType {
    pub const ALL: [ViewType; 4] = [ViewType::Day, ViewType::Week, ViewType::Month, ViewType::Year];

    pub fn label(&self) -> &'static str {
        match self {
            ViewType::Day => "Day",
            ViewType::Week => "Week",
            ViewType::Month => "Month",
            ViewType::Year => "Year",
        }
    }

    /// Whether drags in this view may move events across day columns
    pub fn allows_day_offset(&self) -> bool {
        matches!(self, ViewType::Week)
    }
}
