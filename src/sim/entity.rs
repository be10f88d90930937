//! Entity kinds and their per-frame motion rules
//!
//! Each kind is plain data with its own update. Nothing here knows about
//! other entities; interactions live in `collision` and `tick`.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;

/// The player's craft
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Exhaust flame length jitter, re-rolled every frame (visual only)
    #[serde(skip)]
    pub flame: f32,
}

impl Player {
    /// Fresh craft at the fixed x, vertically centered
    pub fn new(canvas_height: f32) -> Self {
        Self {
            pos: Vec2::new(PLAYER_X, canvas_height / 2.0),
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            flame: 0.0,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::new(self.width, self.height) / 2.0
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width, self.height)
    }

    /// Ease the craft's vertical center toward `target_y`, then clamp it
    /// inside the playfield margins.
    pub fn follow(&mut self, target_y: f32, factor: f32, canvas_height: f32) {
        let dy = target_y - (self.pos.y + self.height / 2.0);
        self.pos.y += dy * factor;
        self.pos.y = self.clamp_y(self.pos.y, canvas_height);
    }

    /// Keep `y` in `[margin, canvas_height - height - margin]`. On a canvas
    /// too short for both margins the bottom bound wins.
    pub fn clamp_y(&self, y: f32, canvas_height: f32) -> f32 {
        let bottom = canvas_height - self.height - PLAYER_EDGE_MARGIN;
        y.max(PLAYER_EDGE_MARGIN).min(bottom)
    }

    /// Vertical position as a fraction of the canvas height (0 = top)
    pub fn height_fraction(&self, canvas_height: f32) -> f32 {
        if canvas_height <= 0.0 {
            return 0.5;
        }
        (self.pos.y / canvas_height).clamp(0.0, 1.0)
    }
}

/// An oncoming craft. Touching one ends the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Leftward pixels per frame, fixed at spawn
    pub speed: f32,
}

impl Enemy {
    pub fn update(&mut self) {
        self.pos.x -= self.speed;
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width, self.height)
    }

    /// Fully past the left edge (plus cull margin)
    pub fn is_offscreen(&self) -> bool {
        self.pos.x + self.width < -OFFSCREEN_MARGIN
    }
}

/// A collectible coin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    /// Center
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    /// Spin phase for the squash animation
    pub angle: f32,
}

impl Coin {
    pub fn update(&mut self, spin: f32) {
        self.pos.x -= self.speed;
        self.angle += spin;
    }

    pub fn is_offscreen(&self) -> bool {
        self.pos.x + self.radius < -OFFSCREEN_MARGIN
    }
}

/// A parallax background star
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub opacity: f32,
}

impl Star {
    /// Random star. `anywhere` scatters x over the whole canvas (initial
    /// population); otherwise the star enters at the right edge.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, width: f32, height: f32, anywhere: bool) -> Self {
        let x = if anywhere {
            rng.random::<f32>() * width
        } else {
            width
        };
        Self {
            pos: Vec2::new(x, rng.random::<f32>() * height),
            radius: rng.random::<f32>() * 1.2,
            speed: rng.random::<f32>() * 0.8 + 0.2,
            opacity: rng.random::<f32>() * 0.7 + 0.3,
        }
    }

    pub fn update<R: Rng + ?Sized>(&mut self, rng: &mut R, width: f32, height: f32) {
        self.pos.x -= self.speed;
        if self.pos.x < 0.0 {
            *self = Star::random(rng, width, height, false);
        }
    }
}

/// Fixed, immortal star population
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Starfield {
    pub stars: Vec<Star>,
}

impl Starfield {
    pub fn new<R: Rng + ?Sized>(rng: &mut R, count: usize, width: f32, height: f32) -> Self {
        Self {
            stars: (0..count)
                .map(|_| Star::random(rng, width, height, true))
                .collect(),
        }
    }

    pub fn update<R: Rng + ?Sized>(&mut self, rng: &mut R, width: f32, height: f32) {
        for star in &mut self.stars {
            star.update(rng, width, height);
        }
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }
}

/// Which event a particle came from (drives its color)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BurstKind {
    Crash,
    Pickup,
}

/// A short-lived decorative spark
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub kind: BurstKind,
    /// Frames left to live
    pub remaining: u32,
    /// Frames lived at full life
    pub lifespan: u32,
}

impl Particle {
    pub fn new<R: Rng + ?Sized>(rng: &mut R, pos: Vec2, kind: BurstKind, lifespan: u32) -> Self {
        let vel = Vec2::new(rng.random::<f32>() - 0.5, rng.random::<f32>() - 0.5) * PARTICLE_SPREAD;
        Self {
            pos,
            vel,
            radius: rng.random::<f32>() * 3.0 + 1.0,
            kind,
            remaining: lifespan,
            lifespan,
        }
    }

    /// Ballistic step; life drops by one frame
    pub fn update(&mut self) {
        self.pos += self.vel;
        self.remaining = self.remaining.saturating_sub(1);
    }

    /// Remaining life in [0, 1]
    pub fn life(&self) -> f32 {
        if self.lifespan == 0 {
            return 0.0;
        }
        self.remaining as f32 / self.lifespan as f32
    }

    pub fn is_alive(&self) -> bool {
        self.remaining > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_player_starts_centered() {
        let player = Player::new(600.0);
        assert_eq!(player.pos, Vec2::new(PLAYER_X, 300.0));
        assert_eq!(player.center(), Vec2::new(PLAYER_X + 30.0, 310.0));
    }

    #[test]
    fn test_player_eases_toward_target() {
        let mut player = Player::new(600.0);
        // Center at 310, target 410: moves 12% of 100
        player.follow(410.0, 0.12, 600.0);
        assert!((player.pos.y - 312.0).abs() < 1e-4);
    }

    proptest! {
        #[test]
        fn prop_player_stays_in_bounds(
            target in -5000.0f32..5000.0,
            height in 100.0f32..2000.0,
            frames in 1usize..200,
        ) {
            let mut player = Player::new(height);
            for _ in 0..frames {
                player.follow(target, 0.12, height);
                prop_assert!(player.pos.y >= PLAYER_EDGE_MARGIN);
                prop_assert!(player.pos.y <= height - player.height - PLAYER_EDGE_MARGIN);
            }
        }
    }

    #[test]
    fn test_enemy_offscreen_edge() {
        let mut enemy = Enemy {
            pos: Vec2::new(-104.0, 100.0),
            width: ENEMY_WIDTH,
            height: ENEMY_HEIGHT,
            speed: 1.0,
        };
        // -104 + 55 = -49: still visible margin
        assert!(!enemy.is_offscreen());
        enemy.update();
        enemy.update();
        assert!(enemy.is_offscreen());
    }

    #[test]
    fn test_coin_spins_and_moves() {
        let mut coin = Coin {
            pos: Vec2::new(500.0, 200.0),
            radius: COIN_RADIUS,
            speed: 4.0,
            angle: 0.0,
        };
        coin.update(0.1);
        coin.update(0.1);
        assert_eq!(coin.pos.x, 492.0);
        assert!((coin.angle - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_star_wraps_to_right_edge() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut star = Star {
            pos: Vec2::new(0.5, 10.0),
            radius: 1.0,
            speed: 1.0,
            opacity: 1.0,
        };
        star.update(&mut rng, 800.0, 600.0);
        assert_eq!(star.pos.x, 800.0);
        assert!(star.pos.y >= 0.0 && star.pos.y < 600.0);
        assert!(star.speed >= 0.2 && star.speed < 1.0);
        assert!(star.opacity >= 0.3 && star.opacity < 1.0);
    }

    #[test]
    fn test_starfield_population_is_constant() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut field = Starfield::new(&mut rng, 150, 800.0, 600.0);
        for _ in 0..5000 {
            field.update(&mut rng, 800.0, 600.0);
        }
        assert_eq!(field.len(), 150);
    }

    #[test]
    fn test_particle_dies_after_lifespan() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut particle = Particle::new(&mut rng, Vec2::ZERO, BurstKind::Crash, 50);
        assert_eq!(particle.life(), 1.0);
        for _ in 0..49 {
            particle.update();
            assert!(particle.is_alive());
        }
        particle.update();
        assert!(!particle.is_alive());
        assert!(particle.life() <= 0.0);
    }

    #[test]
    fn test_particle_velocity_spread() {
        let mut rng = Pcg32::seed_from_u64(11);
        for _ in 0..500 {
            let p = Particle::new(&mut rng, Vec2::ZERO, BurstKind::Pickup, 50);
            assert!(p.vel.x >= -5.0 && p.vel.x < 5.0);
            assert!(p.vel.y >= -5.0 && p.vel.y < 5.0);
            assert!(p.radius >= 1.0 && p.radius < 4.0);
        }
    }
}
