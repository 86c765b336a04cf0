//! Progress bar control.

use panekit_core::Size;
use panekit_viewhost::NativePeer;

use crate::{LayoutError, Theme};

/// A bar showing progress of a value within a range.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressBar {
    minimum: f32,
    maximum: f32,
    value: f32,
    indeterminate: bool,
    thickness: f32,
}

impl ProgressBar {
    /// A bar over `[0, 100]` starting at 0.
    pub fn new(theme: &Theme) -> Self {
        Self {
            minimum: 0.0,
            maximum: 100.0,
            value: 0.0,
            indeterminate: false,
            thickness: theme.progress_bar_thickness,
        }
    }

    pub fn minimum(&self) -> f32 {
        self.minimum
    }

    pub fn maximum(&self) -> f32 {
        self.maximum
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Set the range. A maximum below the minimum is raised to it, and the
    /// current value is pulled into the new range.
    pub fn set_range(&mut self, minimum: f32, maximum: f32) -> Result<(), LayoutError> {
        let minimum = finite("ProgressBar.minimum", minimum)?;
        let maximum = finite("ProgressBar.maximum", maximum)?;
        self.minimum = minimum;
        self.maximum = maximum.max(minimum);
        self.value = self.value.clamp(self.minimum, self.maximum);
        Ok(())
    }

    /// Set the value, clamped into the range.
    pub fn set_value(&mut self, value: f32) -> Result<(), LayoutError> {
        let value = finite("ProgressBar.value", value)?;
        self.value = value.clamp(self.minimum, self.maximum);
        Ok(())
    }

    pub fn is_indeterminate(&self) -> bool {
        self.indeterminate
    }

    pub fn set_indeterminate(&mut self, indeterminate: bool) {
        self.indeterminate = indeterminate;
    }

    /// Completed share in `[0, 1]`; an empty range counts as zero.
    pub fn fraction(&self) -> f32 {
        let span = self.maximum - self.minimum;
        if span <= 0.0 {
            0.0
        } else {
            (self.value - self.minimum) / span
        }
    }

    pub(crate) fn measure_override(
        &mut self,
        peer: Option<&mut Box<dyn NativePeer>>,
        available: Size,
    ) -> Size {
        peer.and_then(|p| p.measure_hint(available))
            .unwrap_or(Size::new(0.0, self.thickness))
            .min(available)
    }
}

fn finite(property: &'static str, value: f32) -> Result<f32, LayoutError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(LayoutError::InvalidValue { property, value })
    }
}
