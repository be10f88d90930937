//! Draw command types for 2D rendering

use glam::Vec2;

/// 8-bit RGB color with float alpha
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// CSS color string
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// How a shape is filled
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    Solid(Color),
    /// Radial gradient from a small highlight circle at `focus` (relative to
    /// the shape center, radius `focus_radius`) out to the shape's edge
    Radial {
        inner: Color,
        outer: Color,
        focus: Vec2,
        focus_radius: f32,
    },
}

/// Soft shadow halo
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub color: Color,
    pub blur: f32,
}

/// One drawing operation, executed in order by a backend
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Wipe the whole canvas
    Clear { width: f32, height: f32 },
    /// Filled closed polygon
    Polygon {
        points: Vec<Vec2>,
        paint: Paint,
        glow: Option<Glow>,
    },
    /// Filled circle, optionally squashed horizontally by `scale_x`
    Disc {
        center: Vec2,
        radius: f32,
        scale_x: f32,
        paint: Paint,
        alpha: f32,
        glow: Option<Glow>,
    },
}

/// Colors for game elements
pub mod colors {
    use super::Color;

    pub const PLAYER_HULL: Color = Color::rgb(255, 255, 255);
    pub const PLAYER_GLOW: Color = Color::rgb(0, 255, 255);
    pub const PLAYER_FLAME: Color = Color::rgba(0, 255, 255, 0.6);
    pub const ENEMY: Color = Color::rgb(255, 51, 102);
    pub const COIN_HIGHLIGHT: Color = Color::rgb(255, 245, 173);
    pub const COIN: Color = Color::rgb(255, 204, 0);
    pub const STAR: Color = Color::rgb(255, 255, 255);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_output() {
        assert_eq!(colors::ENEMY.to_css(), "rgba(255, 51, 102, 1)");
        assert_eq!(colors::STAR.with_alpha(0.5).to_css(), "rgba(255, 255, 255, 0.5)");
    }

    #[test]
    fn test_alpha_is_clamped() {
        assert_eq!(colors::STAR.with_alpha(-1.0).a, 0.0);
        assert_eq!(colors::STAR.with_alpha(2.0).a, 1.0);
    }
}
