//! Category model for colouring events.
//!
//! Events reference categories by id. The layout and drag code never look at
//! categories; only rendering does, through [`CategoryPalette`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Colour used for events whose category is missing or unknown
pub const FALLBACK_COLOR: &str = "#737373";

/// A category for organizing events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    /// Display name of the category
    pub name: String,
    /// Hex color code for the category (e.g., "#0EA5E9")
    pub color: String,
}

impl Category {
    pub fn new(id: i64, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            color: color.into(),
        }
    }

    /// Validate the category data.
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }
        if name.len() > 50 {
            return Err(CategoryValidationError::NameTooLong);
        }

        if !is_valid_hex_color(&self.color) {
            return Err(CategoryValidationError::InvalidColor);
        }

        Ok(())
    }
}

/// Validation errors for Category.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CategoryValidationError {
    #[error("Category name cannot be empty")]
    EmptyName,
    #[error("Category name must be 50 characters or less")]
    NameTooLong,
    #[error("Invalid color format (use hex like #FF0000)")]
    InvalidColor,
}

/// Check if a string is a valid hex color code.
fn is_valid_hex_color(color: &str) -> bool {
    let color = color.trim();
    let Some(hex) = color.strip_prefix('#') else {
        return false;
    };
    // Accept 3, 6, or 8 character hex codes
    matches!(hex.len(), 3 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit())
}

/// Parse `#RGB`, `#RRGGBB` or `#RRGGBBAA` into RGB components (alpha is ignored).
pub fn parse_hex_rgb(color: &str) -> Option<[u8; 3]> {
    if !is_valid_hex_color(color) {
        return None;
    }
    let hex = &color.trim()[1..];
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();

    if hex.len() == 3 {
        let mut rgb = [0u8; 3];
        for (i, c) in hex.chars().enumerate() {
            let v = channel(&c.to_string())?;
            rgb[i] = v * 17;
        }
        return Some(rgb);
    }

    Some([
        channel(&hex[0..2])?,
        channel(&hex[2..4])?,
        channel(&hex[4..6])?,
    ])
}

/// Lookup from category id to its colour.
#[derive(Debug, Clone, Default)]
pub struct CategoryPalette {
    categories: Vec<Category>,
}

impl CategoryPalette {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Category that new events are created in
    pub fn default_category(&self) -> Option<&Category> {
        self.categories.first()
    }

    pub fn get(&self, id: i64) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn color_of(&self, category_id: Option<i64>) -> &str {
        category_id
            .and_then(|id| self.get(id))
            .map(|c| c.color.as_str())
            .unwrap_or(FALLBACK_COLOR)
    }
}

/// Default categories that ship with the application.
pub fn default_categories() -> Vec<Category> {
    vec![
        Category::new(1, "Work", "#0EA5E9"),
        Category::new(2, "Personal", "#22C55E"),
        Category::new(3, "Social", "#F97316"),
        Category::new(4, "Health", "#EC4899"),
        Category::new(5, "Family", "#8B5CF6"),
    ]
}
