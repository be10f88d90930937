//! Collision tests
//!
//! Two shapes only: axis-aligned boxes for craft-vs-craft, and a distance
//! check for coin pickup.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle (top-left origin, y down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Strict overlap: rectangles that only share an edge do not collide
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

/// True when a coin is close enough to collect.
///
/// The reach is `coin_radius + margin`, measured center to center, and the
/// comparison is strict.
pub fn coin_in_reach(player_center: Vec2, coin_center: Vec2, coin_radius: f32, margin: f32) -> bool {
    player_center.distance(coin_center) < coin_radius + margin
}
