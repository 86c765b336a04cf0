//! Menu entries shown by a [`crate::MenuFlyout`].

use panekit_core::Color;

use crate::Theme;

/// A clickable menu entry.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuButton {
    text: String,
    foreground: Color,
    disabled_foreground: Color,
    enabled: bool,
}

impl MenuButton {
    pub fn new(text: impl Into<String>, theme: &Theme) -> Self {
        Self {
            text: text.into(),
            foreground: theme.foreground,
            disabled_foreground: theme.disabled_foreground,
            enabled: true,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Color the text is drawn in, taking the enabled state into account.
    pub fn foreground(&self) -> Color {
        if self.enabled {
            self.foreground
        } else {
            self.disabled_foreground
        }
    }

    pub fn set_foreground(&mut self, color: Color) {
        self.foreground = color;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

/// One entry of a menu.
#[derive(Debug, Clone, PartialEq)]
pub enum MenuItem {
    Button(MenuButton),
    Separator,
}

impl MenuItem {
    pub fn button(text: impl Into<String>, theme: &Theme) -> Self {
        MenuItem::Button(MenuButton::new(text, theme))
    }

    pub fn separator() -> Self {
        MenuItem::Separator
    }

    pub fn is_separator(&self) -> bool {
        matches!(self, MenuItem::Separator)
    }

    /// Text color; separators have none.
    pub fn foreground(&self) -> Option<Color> {
        match self {
            MenuItem::Button(button) => Some(button.foreground()),
            MenuItem::Separator => None,
        }
    }
}
