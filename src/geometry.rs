//! Axis-aligned rectangle geometry
//!
//! Every entity on the board is an axis-aligned rectangle anchored at its
//! top-left corner. Corners are derived on demand; positions are plain
//! `Vec2` values copied around, never shared.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// A validated axis-aligned rectangle.
///
/// Construction rejects negative coordinates and extents. The position can
/// move freely afterwards (the resolver snaps entities flush against each
/// other, which may land on zero).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    top_left: Vec2,
    width: f32,
    height: f32,
}

impl Rect {
    pub fn new(top_left: Vec2, width: f32, height: f32) -> Result<Self, EngineError> {
        if top_left.x < 0.0 {
            return Err(EngineError::InvalidGeometry {
                what: "top-left x",
                value: top_left.x,
            });
        }
        if top_left.y < 0.0 {
            return Err(EngineError::InvalidGeometry {
                what: "top-left y",
                value: top_left.y,
            });
        }
        if width < 0.0 {
            return Err(EngineError::InvalidGeometry {
                what: "width",
                value: width,
            });
        }
        if height < 0.0 {
            return Err(EngineError::InvalidGeometry {
                what: "height",
                value: height,
            });
        }
        Ok(Self {
            top_left,
            width,
            height,
        })
    }

    #[inline]
    pub fn top_left(&self) -> Vec2 {
        self.top_left
    }

    #[inline]
    pub fn top_right(&self) -> Vec2 {
        Vec2::new(self.top_left.x + self.width, self.top_left.y)
    }

    #[inline]
    pub fn bottom_left(&self) -> Vec2 {
        Vec2::new(self.top_left.x, self.top_left.y + self.height)
    }

    #[inline]
    pub fn bottom_right(&self) -> Vec2 {
        Vec2::new(self.top_left.x + self.width, self.top_left.y + self.height)
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn set_top_left(&mut self, top_left: Vec2) {
        self.top_left = top_left;
    }

    /// Move only the x coordinate, leaving y untouched.
    pub fn set_x(&mut self, x: f32) {
        self.top_left.x = x;
    }

    /// Move only the y coordinate, leaving x untouched.
    pub fn set_y(&mut self, y: f32) {
        self.top_left.y = y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corners_derive_from_top_left() {
        let rect = Rect::new(Vec2::new(2.0, 3.0), 4.0, 5.0).unwrap();
        assert_eq!(rect.top_left(), Vec2::new(2.0, 3.0));
        assert_eq!(rect.top_right(), Vec2::new(6.0, 3.0));
        assert_eq!(rect.bottom_left(), Vec2::new(2.0, 8.0));
        assert_eq!(rect.bottom_right(), Vec2::new(6.0, 8.0));
    }

    #[test]
    fn test_negative_position_rejected() {
        assert!(matches!(
            Rect::new(Vec2::new(-1.0, 0.0), 1.0, 1.0),
            Err(EngineError::InvalidGeometry { what: "top-left x", .. })
        ));
        assert!(matches!(
            Rect::new(Vec2::new(0.0, -0.5), 1.0, 1.0),
            Err(EngineError::InvalidGeometry { what: "top-left y", .. })
        ));
    }

    #[test]
    fn test_negative_extent_rejected() {
        assert!(matches!(
            Rect::new(Vec2::ZERO, -1.0, 1.0),
            Err(EngineError::InvalidGeometry { what: "width", .. })
        ));
        assert!(matches!(
            Rect::new(Vec2::ZERO, 1.0, -1.0),
            Err(EngineError::InvalidGeometry { what: "height", .. })
        ));
    }

    #[test]
    fn test_zero_sized_rect_is_valid() {
        assert!(Rect::new(Vec2::ZERO, 0.0, 0.0).is_ok());
    }
}
