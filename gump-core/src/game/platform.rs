//! Platform
//!
//! The static ground the player stands on: canvas-wide, bottom-aligned.

use serde::{Serialize, Deserialize};

use crate::config::GameConfig;
use crate::core::rect::Rect;
use crate::core::vec2::Vec2;

/// Static axis-aligned platform. Immutable after construction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    rect: Rect,
    color: [u8; 3],
}

impl Platform {
    /// Create the base platform for the given canvas.
    ///
    /// Width is the canvas width; the platform is horizontally centered and
    /// its bottom edge sits on the canvas bottom edge.
    pub fn new(config: &GameConfig) -> Self {
        let width = config.canvas.width;
        let height = config.platform.height;
        let center = Vec2::new(width / 2.0, config.canvas.height - height / 2.0);

        Self {
            rect: Rect::from_center(center, width, height),
            color: config.platform.color,
        }
    }

    /// Bounds in canvas space.
    #[inline]
    pub fn rect(&self) -> &Rect {
        &self.rect
    }

    /// Top edge y-coordinate.
    #[inline]
    pub fn top(&self) -> f32 {
        self.rect.top()
    }

    /// Fill color (RGB).
    #[inline]
    pub fn color(&self) -> [u8; 3] {
        self.color
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}
