//! # panekit layout
//!
//! Layout engine for portable panekit controls.
//!
//! Every [`Element`] takes part in a two-phase protocol:
//!
//! 1. **Measure**: the parent offers a constraint and the element reports
//!    its desired size.
//! 2. **Arrange**: the parent assigns a final frame and the element places
//!    its own children inside it.
//!
//! Containers decide how space is shared between children:
//! - [`StackPanel`] lines children up along one axis
//! - [`Grid`] sizes rows and columns from [`GridLength`] track definitions
//!   (fixed, auto and star sizing) and places children in cells
//! - [`Flyout`] and [`MenuFlyout`] size themselves to their content
//!
//! Rendering is not done here. Elements hand their final frames to a
//! [`panekit_viewhost::NativePeer`] supplied by the caller.

pub mod element;
pub mod flyout;
pub mod grid;
pub mod host;
pub mod length;
pub mod menu;
pub mod progress;
pub mod stack;
pub mod theme;
pub mod track;

pub use element::{Alignment, Content, Element, ElementKind, LayoutSnapshot, Visibility};
pub use flyout::{Flyout, MenuFlyout};
pub use grid::{resolve_tracks, Grid, GridChild, GridPlacement};
pub use host::{LayoutBuilder, LayoutConfig, LayoutHost};
pub use length::GridLength;
pub use menu::{MenuButton, MenuItem};
pub use progress::ProgressBar;
pub use stack::{Orientation, StackPanel};
pub use theme::Theme;
pub use track::{ColumnDefinition, RowDefinition, TrackDefinition};

pub use panekit_core::{Color, Point, Rect, Size, Thickness};

use panekit_viewhost::PeerError;
use thiserror::Error;

/// Errors that can occur in layout.
#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Invalid value for {property}: {value}")]
    InvalidValue { property: &'static str, value: f32 },

    #[error("Invalid layout constraint {width}x{height}")]
    InvalidConstraint { width: f32, height: f32 },

    #[error("Measure produced invalid geometry {width}x{height}")]
    InvalidGeometry { width: f32, height: f32 },

    #[error("Arrange called before a valid measure")]
    NotMeasured,

    #[error("Native peer error: {0}")]
    Peer(#[from] PeerError),

    #[error("Theme parse error: {0}")]
    Theme(#[from] serde_json::Error),
}

/// Clamp `value` into `[min, max]` as `min(max, max(min, value))`.
///
/// When `min > max` the result is `max`: the upper bound wins.
pub fn clamp_extent(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}

/// Accept finite, non-negative lengths.
pub(crate) fn validate_length(property: &'static str, value: f32) -> Result<f32, LayoutError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(LayoutError::InvalidValue { property, value })
    }
}

/// Accept non-negative upper bounds, including `+inf`.
pub(crate) fn validate_max(property: &'static str, value: f32) -> Result<f32, LayoutError> {
    if !value.is_nan() && value >= 0.0 {
        Ok(value)
    } else {
        Err(LayoutError::InvalidValue { property, value })
    }
}
