//! Logical window geometry.
//!
//! Coordinates are logical (scale-independent) pixels. The platform layer
//! converts to and from physical pixels.

use serde::{Deserialize, Serialize};

/// A point in logical screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The origin.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self {
            x: f64::from(x),
            y: f64::from(y),
        }
    }
}

/// A size in logical pixels (width and height).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Zero size.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Check if the size has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Clamp both dimensions into `[min, max]`.
    ///
    /// A `max` dimension smaller than the matching `min` dimension is ignored.
    pub fn clamp(self, min: Size, max: Option<Size>) -> Self {
        let mut width = self.width.max(min.width);
        let mut height = self.height.max(min.height);
        if let Some(max) = max {
            if max.width >= min.width {
                width = width.min(max.width);
            }
            if max.height >= min.height {
                height = height.min(max.height);
            }
        }
        Self { width, height }
    }
}

impl From<(f64, f64)> for Size {
    fn from((width, height): (f64, f64)) -> Self {
        Self { width, height }
    }
}

impl From<(u32, u32)> for Size {
    fn from((width, height): (u32, u32)) -> Self {
        Self {
            width: f64::from(width),
            height: f64::from(height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_is_empty() {
        assert!(Size::ZERO.is_empty());
        assert!(Size::new(10.0, 0.0).is_empty());
        assert!(!Size::new(1.0, 1.0).is_empty());
    }

    #[test]
    fn test_size_clamp() {
        let min = Size::new(100.0, 50.0);
        let max = Some(Size::new(400.0, 300.0));

        assert_eq!(Size::new(10.0, 10.0).clamp(min, max), min);
        assert_eq!(Size::new(900.0, 900.0).clamp(min, max), Size::new(400.0, 300.0));
        assert_eq!(Size::new(200.0, 120.0).clamp(min, max), Size::new(200.0, 120.0));
        // Inverted maximum is ignored
        assert_eq!(
            Size::new(900.0, 900.0).clamp(min, Some(Size::new(10.0, 10.0))),
            Size::new(900.0, 900.0)
        );
    }

    #[test]
    fn test_conversions() {
        assert_eq!(Size::from((640u32, 480u32)), Size::new(640.0, 480.0));
        assert_eq!(Point::from((-5, 12)), Point::new(-5.0, 12.0));
    }

    #[test]
    fn test_serde_shape() {
        let text = toml::to_string(&Size::new(800.0, 600.0)).unwrap();
        assert!(text.contains("width = 800.0"));
        let point: Point = toml::from_str("x = 3.5\ny = -2.0").unwrap();
        assert_eq!(point, Point::new(3.5, -2.0));
    }
}
