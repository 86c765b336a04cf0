//! Popup containers.
//!
//! A [`Flyout`] is exactly as large as its single content element and puts
//! that content at its own origin. A [`MenuFlyout`] lets the native popup
//! decide its size and never re-measures on arrange.

use panekit_core::{Rect, Size};
use panekit_viewhost::NativePeer;
use tracing::trace;

use crate::{Element, LayoutError, MenuItem, Theme};

/// Popup sized to fit one content element.
#[derive(Debug, Default)]
pub struct Flyout {
    content: Option<Box<Element>>,
}

impl Flyout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content(content: Element) -> Self {
        Self {
            content: Some(Box::new(content)),
        }
    }

    pub fn content(&self) -> Option<&Element> {
        self.content.as_deref()
    }

    pub fn content_mut(&mut self) -> Option<&mut Element> {
        self.content.as_deref_mut()
    }

    /// Replace the content, returning the previous one.
    pub fn set_content(&mut self, content: Option<Element>) -> Option<Element> {
        std::mem::replace(&mut self.content, content.map(Box::new)).map(|c| *c)
    }

    pub(crate) fn measure_override(&mut self, available: Size) -> Result<Size, LayoutError> {
        match self.content.as_mut() {
            Some(content) => {
                content.measure(available)?;
                Ok(content.desired_size())
            }
            None => Ok(Size::ZERO),
        }
    }

    pub(crate) fn arrange_override(&mut self, area: Rect) -> Result<Size, LayoutError> {
        match self.content.as_mut() {
            Some(content) => {
                let desired = content.desired_size();
                content.arrange(Rect::from_parts(area.location(), desired))?;
                Ok(desired)
            }
            None => Ok(Size::ZERO),
        }
    }
}

/// Popup menu whose size comes from the native popup.
///
/// Without a peer the size is estimated from the theme's menu metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuFlyout {
    items: Vec<MenuItem>,
    item_height: f32,
    separator_height: f32,
    min_width: f32,
    measured: Size,
}

impl MenuFlyout {
    pub fn new(theme: &Theme) -> Self {
        Self {
            items: Vec::new(),
            item_height: theme.menu_item_height,
            separator_height: theme.separator_height,
            min_width: theme.min_menu_width,
            measured: Size::ZERO,
        }
    }

    pub fn with_items(mut self, items: impl IntoIterator<Item = MenuItem>) -> Self {
        self.items.extend(items);
        self
    }

    pub fn push(&mut self, item: MenuItem) {
        self.items.push(item);
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut Vec<MenuItem> {
        &mut self.items
    }

    fn estimated_size(&self) -> Size {
        let height = self
            .items
            .iter()
            .map(|item| match item {
                MenuItem::Button(_) => self.item_height,
                MenuItem::Separator => self.separator_height,
            })
            .sum();
        Size::new(self.min_width, height)
    }

    pub(crate) fn measure_override(
        &mut self,
        peer: Option<&mut Box<dyn NativePeer>>,
        available: Size,
    ) -> Size {
        let size = peer
            .and_then(|p| p.measure_hint(available))
            .unwrap_or_else(|| self.estimated_size());
        self.measured = size.min(available);
        trace!(items = self.items.len(), measured = ?self.measured, "menu flyout measured");
        self.measured
    }

    /// Keeps the measured size; the caller's frame only supplies the origin.
    ///
    /// The native frame is margin-exclusive: the element's desired size
    /// carries the margin, while the peer receives the margin-deflated
    /// origin and the measured size alone.
    pub(crate) fn arrange_override(&mut self, _area: Rect) -> Size {
        self.measured
    }
}
