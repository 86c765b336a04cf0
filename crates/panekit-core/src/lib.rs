//! # panekit core
//!
//! Geometry and color value types shared by the layout engine and the
//! native peer boundary. All lengths are device-independent `f32` units.
//! A component of `f32::INFINITY` in a [`Size`] used as a constraint means
//! "unconstrained" along that axis.

use serde::{Deserialize, Serialize};

/// A 2D size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// The empty size `{0, 0}`.
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    /// Unconstrained along both axes.
    pub const INFINITE: Size = Size {
        width: f32::INFINITY,
        height: f32::INFINITY,
    };

    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True if either component is NaN.
    pub fn has_nan(&self) -> bool {
        self.width.is_nan() || self.height.is_nan()
    }

    /// True if either component is below zero (including `-inf`).
    pub fn has_negative(&self) -> bool {
        self.width < 0.0 || self.height < 0.0
    }

    pub fn is_finite(&self) -> bool {
        self.width.is_finite() && self.height.is_finite()
    }

    /// Shrink by the given edges, flooring each axis at zero.
    ///
    /// Infinite components stay infinite.
    pub fn deflate(&self, edges: Thickness) -> Size {
        Size {
            width: (self.width - edges.horizontal()).max(0.0),
            height: (self.height - edges.vertical()).max(0.0),
        }
    }

    /// Grow by the given edges.
    pub fn inflate(&self, edges: Thickness) -> Size {
        Size {
            width: self.width + edges.horizontal(),
            height: self.height + edges.vertical(),
        }
    }

    /// Component-wise minimum.
    pub fn min(&self, other: Size) -> Size {
        Size {
            width: self.width.min(other.width),
            height: self.height.min(other.height),
        }
    }
}

/// A 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A rectangle described by its top-left location and size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_parts(location: Point, size: Size) -> Self {
        Self::new(location.x, location.y, size.width, size.height)
    }

    pub fn zero() -> Self {
        Self::default()
    }

    pub fn location(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Shrink inwards by the given edges, flooring the size at zero.
    pub fn deflate(&self, edges: Thickness) -> Rect {
        let size = self.size().deflate(edges);
        Rect::new(
            self.x + edges.left,
            self.y + edges.top,
            size.width,
            size.height,
        )
    }
}

/// Four-sided inset used for margins and padding.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Thickness {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Thickness {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn zero() -> Self {
        Self::default()
    }

    /// Left + right.
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// Top + bottom.
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }

    /// True if every edge is finite and non-negative.
    pub fn is_valid(&self) -> bool {
        [self.left, self.top, self.right, self.bottom]
            .iter()
            .all(|v| v.is_finite() && *v >= 0.0)
    }
}

/// An RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "Color::opaque")]
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    fn opaque() -> u8 {
        255
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deflate_floors_at_zero() {
        let size = Size::new(10.0, 4.0).deflate(Thickness::uniform(3.0));
        assert_eq!(size, Size::new(4.0, 0.0));
    }

    #[test]
    fn test_deflate_keeps_infinity() {
        let size = Size::INFINITE.deflate(Thickness::new(1.0, 2.0, 3.0, 4.0));
        assert!(size.width.is_infinite());
        assert!(size.height.is_infinite());
    }

    #[test]
    fn test_rect_deflate_offsets_location() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0).deflate(Thickness::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(rect, Rect::new(11.0, 22.0, 96.0, 44.0));
    }

    #[test]
    fn test_size_validity_checks() {
        assert!(Size::new(f32::NAN, 1.0).has_nan());
        assert!(Size::new(1.0, f32::NEG_INFINITY).has_negative());
        assert!(!Size::INFINITE.is_finite());
    }

    #[test]
    fn test_thickness_validity() {
        assert!(Thickness::uniform(2.0).is_valid());
        assert!(!Thickness::new(-1.0, 0.0, 0.0, 0.0).is_valid());
        assert!(!Thickness::new(0.0, f32::INFINITY, 0.0, 0.0).is_valid());
    }

    #[test]
    fn test_color_alpha_defaults_to_opaque() {
        let color: Color = serde_json::from_str(r#"{"r":1,"g":2,"b":3}"#).unwrap();
        assert_eq!(color, Color::rgb(1, 2, 3));
    }
}
