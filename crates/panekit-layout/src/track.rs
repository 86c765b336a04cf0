//! Row and column definitions.

use crate::{clamp_extent, validate_length, validate_max, GridLength, LayoutError};

/// One row or column of a [`crate::Grid`].
///
/// `min` and `max` are validated independently, so `min > max` is allowed;
/// resolution then treats `max` as the hard ceiling (see
/// [`crate::clamp_extent`]). `actual` and `offset` are written only by the
/// owning grid during layout.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackDefinition {
    length: GridLength,
    min: f32,
    max: f32,
    actual: f32,
    offset: f32,
}

/// A grid column; `length` is its width.
pub type ColumnDefinition = TrackDefinition;

/// A grid row; `length` is its height.
pub type RowDefinition = TrackDefinition;

impl Default for TrackDefinition {
    fn default() -> Self {
        Self {
            length: GridLength::default(),
            min: 0.0,
            max: f32::INFINITY,
            actual: 0.0,
            offset: 0.0,
        }
    }
}

impl TrackDefinition {
    /// Create a track with the given sizing mode.
    pub fn new(length: GridLength) -> Result<Self, LayoutError> {
        length.validate()?;
        Ok(Self {
            length,
            ..Self::default()
        })
    }

    /// Shorthand for a fixed track.
    pub fn absolute(value: f32) -> Result<Self, LayoutError> {
        Self::new(GridLength::absolute(value)?)
    }

    /// Shorthand for an auto track.
    pub fn auto() -> Self {
        Self {
            length: GridLength::Auto,
            ..Self::default()
        }
    }

    /// Shorthand for a star track.
    pub fn star(weight: f32) -> Result<Self, LayoutError> {
        Self::new(GridLength::star(weight)?)
    }

    pub fn with_min(mut self, min: f32) -> Result<Self, LayoutError> {
        self.set_min(min)?;
        Ok(self)
    }

    pub fn with_max(mut self, max: f32) -> Result<Self, LayoutError> {
        self.set_max(max)?;
        Ok(self)
    }

    pub fn length(&self) -> GridLength {
        self.length
    }

    pub fn set_length(&mut self, length: GridLength) -> Result<(), LayoutError> {
        length.validate()?;
        self.length = length;
        Ok(())
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    /// Lower bound; must be finite and non-negative.
    pub fn set_min(&mut self, min: f32) -> Result<(), LayoutError> {
        self.min = validate_length("TrackDefinition.min", min)?;
        Ok(())
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    /// Upper bound; must be non-negative, `+inf` allowed.
    pub fn set_max(&mut self, max: f32) -> Result<(), LayoutError> {
        self.max = validate_max("TrackDefinition.max", max)?;
        Ok(())
    }

    /// Size resolved by the last layout pass.
    pub fn actual(&self) -> f32 {
        self.actual
    }

    /// Start of the track relative to the grid's content origin.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// `value` clamped into this track's bounds.
    pub fn clamp(&self, value: f32) -> f32 {
        clamp_extent(value, self.min, self.max)
    }

    pub(crate) fn set_actual(&mut self, actual: f32) {
        self.actual = actual;
    }

    pub(crate) fn set_offset(&mut self, offset: f32) {
        self.offset = offset;
    }
}
