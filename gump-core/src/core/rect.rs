//! Axis-Aligned Rectangles
//!
//! Canvas-space rectangles (y-down) for platforms and the player body.

use serde::{Serialize, Deserialize};

use super::vec2::Vec2;

/// Axis-aligned rectangle anchored at its top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Width
    pub w: f32,
    /// Height
    pub h: f32,
}

impl Rect {
    /// Create from top-left corner and size.
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Create a rectangle whose bottom edge is centered on `point`.
    #[inline]
    pub fn from_midbottom(point: Vec2, w: f32, h: f32) -> Self {
        Self {
            x: point.x - w / 2.0,
            y: point.y - h,
            w,
            h,
        }
    }

    /// Create a rectangle centered on `center`.
    #[inline]
    pub fn from_center(center: Vec2, w: f32, h: f32) -> Self {
        Self {
            x: center.x - w / 2.0,
            y: center.y - h / 2.0,
            w,
            h,
        }
    }

    /// Left edge.
    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    /// Right edge.
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    /// Top edge (smallest y).
    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    /// Bottom edge (largest y).
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Center point.
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Midpoint of the bottom edge.
    #[inline]
    pub fn midbottom(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.bottom())
    }

    /// Move so that the bottom edge is centered on `point`.
    #[inline]
    pub fn set_midbottom(&mut self, point: Vec2) {
        self.x = point.x - self.w / 2.0;
        self.y = point.y - self.h;
    }

    /// Check if two rectangles overlap. Touching edges count as overlap.
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() <= other.right()
            && self.right() >= other.left()
            && self.top() <= other.bottom()
            && self.bottom() >= other.top()
    }
}
