//! Collision Detection
//!
//! Player-vs-platform overlap tests.

use crate::core::rect::Rect;
use crate::game::platform::Platform;

/// Topmost (smallest y) top edge among platforms overlapping `body`.
///
/// Returns None if no platform overlaps.
pub fn platform_top(body: &Rect, platforms: &[Platform]) -> Option<f32> {
    platforms
        .iter()
        .filter(|platform| body.overlaps(platform.rect()))
        .map(Platform::top)
        .min_by(|a, b| a.total_cmp(b))
}
