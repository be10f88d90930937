//! Spawn scheduler
//!
//! Every playing frame runs two independent Bernoulli trials, one for an
//! enemy and one for a coin. There is no population cap; entities leave by
//! scrolling off the left edge.

use glam::Vec2;
use rand::Rng;

use super::entity::{BurstKind, Coin, Enemy, Particle};
use crate::consts::*;
use crate::tuning::Tuning;

/// Random y in `[margin, height - margin)`
fn spawn_y<R: Rng + ?Sized>(rng: &mut R, canvas_height: f32) -> f32 {
    rng.random::<f32>() * (canvas_height - 2.0 * SPAWN_EDGE_MARGIN) + SPAWN_EDGE_MARGIN
}

/// Draw one spawn trial. Out-of-range probabilities are clamped.
pub fn trial<R: Rng + ?Sized>(rng: &mut R, chance: f64) -> bool {
    rng.random_bool(chance.clamp(0.0, 1.0))
}

/// A new enemy just past the right edge. Its speed grows with the score at
/// spawn time; this is the game's only difficulty scaling.
pub fn spawn_enemy<R: Rng + ?Sized>(
    rng: &mut R,
    tuning: &Tuning,
    canvas_width: f32,
    canvas_height: f32,
    score: u32,
) -> Enemy {
    let y = spawn_y(rng, canvas_height);
    let base = tuning.enemy_speed_min
        + rng.random::<f32>() * (tuning.enemy_speed_max - tuning.enemy_speed_min);
    Enemy {
        pos: Vec2::new(canvas_width + ENEMY_SPAWN_OFFSET, y),
        width: ENEMY_WIDTH,
        height: ENEMY_HEIGHT,
        speed: base + score as f32 * tuning.enemy_speed_per_point,
    }
}

/// A new coin just past the right edge
pub fn spawn_coin<R: Rng + ?Sized>(
    rng: &mut R,
    tuning: &Tuning,
    canvas_width: f32,
    canvas_height: f32,
) -> Coin {
    Coin {
        pos: Vec2::new(canvas_width + COIN_SPAWN_OFFSET, spawn_y(rng, canvas_height)),
        radius: COIN_RADIUS,
        speed: tuning.coin_speed,
        angle: 0.0,
    }
}

/// Append a burst of `count` particles at `pos`
pub fn burst<R: Rng + ?Sized>(
    rng: &mut R,
    particles: &mut Vec<Particle>,
    pos: Vec2,
    kind: BurstKind,
    count: usize,
    lifespan: u32,
) {
    particles.reserve(count);
    for _ in 0..count {
        particles.push(Particle::new(rng, pos, kind, lifespan));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn mean_speed(score: u32) -> f32 {
        let mut rng = Pcg32::seed_from_u64(42);
        let tuning = Tuning::default();
        let n = 2000;
        let total: f32 = (0..n)
            .map(|_| spawn_enemy(&mut rng, &tuning, 800.0, 600.0, score).speed)
            .sum();
        total / n as f32
    }

    #[test]
    fn test_enemy_speed_scales_with_score() {
        let slow = mean_speed(0);
        let fast = mean_speed(50);
        assert!((slow - 5.0).abs() < 0.2, "mean at score 0 was {slow}");
        assert!(fast > slow + 4.0, "mean at score 50 was {fast}");
    }

    #[test]
    fn test_enemy_spawn_bounds() {
        let mut rng = Pcg32::seed_from_u64(9);
        let tuning = Tuning::default();
        for _ in 0..1000 {
            let enemy = spawn_enemy(&mut rng, &tuning, 800.0, 600.0, 0);
            assert_eq!(enemy.pos.x, 900.0);
            assert!(enemy.pos.y >= 50.0 && enemy.pos.y < 550.0);
            assert!(enemy.speed >= 3.0 && enemy.speed < 7.0);
        }
    }

    #[test]
    fn test_coin_spawn_bounds() {
        let mut rng = Pcg32::seed_from_u64(10);
        let tuning = Tuning::default();
        for _ in 0..1000 {
            let coin = spawn_coin(&mut rng, &tuning, 800.0, 600.0);
            assert_eq!(coin.pos.x, 850.0);
            assert!(coin.pos.y >= 50.0 && coin.pos.y < 550.0);
            assert_eq!(coin.radius, COIN_RADIUS);
        }
    }

    #[test]
    fn test_trial_rate() {
        let mut rng = Pcg32::seed_from_u64(5);
        let hits = (0..100_000).filter(|_| trial(&mut rng, 0.02)).count();
        assert!((1700..2300).contains(&hits), "hits = {hits}");
        assert!(!trial(&mut rng, -1.0));
        assert!(trial(&mut rng, 2.0));
    }

    #[test]
    fn test_burst_size() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut particles = Vec::new();
        burst(&mut rng, &mut particles, Vec2::new(5.0, 5.0), BurstKind::Crash, 40, 50);
        assert_eq!(particles.len(), 40);
        assert!(particles.iter().all(|p| p.pos == Vec2::new(5.0, 5.0)));
    }
}
