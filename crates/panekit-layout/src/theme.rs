//! Theme: colors and metrics handed to controls at construction.
//!
//! Controls never look up shared resources on their own; whoever builds
//! them passes a [`Theme`] explicitly.

use panekit_core::Color;
use serde::{Deserialize, Serialize};

use crate::{validate_length, LayoutError};

/// Colors and control metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub foreground: Color,
    pub disabled_foreground: Color,
    pub accent: Color,
    /// Height of one clickable menu entry.
    pub menu_item_height: f32,
    /// Height of a menu separator.
    pub separator_height: f32,
    /// Width of a menu when the native popup gives no size.
    pub min_menu_width: f32,
    /// Cross-axis size of a progress bar.
    pub progress_bar_thickness: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            foreground: Color::BLACK,
            disabled_foreground: Color::rgb(128, 128, 128),
            accent: Color::rgb(0, 120, 215),
            menu_item_height: 32.0,
            separator_height: 9.0,
            min_menu_width: 120.0,
            progress_bar_thickness: 4.0,
        }
    }
}

impl Theme {
    /// Parse a theme document; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, LayoutError> {
        let theme: Theme = serde_json::from_str(json)?;
        theme.validate()?;
        Ok(theme)
    }

    /// Check that every metric is a finite, non-negative length.
    pub fn validate(&self) -> Result<(), LayoutError> {
        validate_length("Theme.menu_item_height", self.menu_item_height)?;
        validate_length("Theme.separator_height", self.separator_height)?;
        validate_length("Theme.min_menu_width", self.min_menu_width)?;
        validate_length("Theme.progress_bar_thickness", self.progress_bar_thickness)?;
        Ok(())
    }
}
