//! Data-driven game balance
//!
//! Defaults reproduce the stock game. A host may override any subset of the
//! values from JSON; missing keys keep their defaults.

use serde::{Deserialize, Serialize};

/// Balance knobs read by the simulation every frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Per-frame probability that an enemy spawns
    pub enemy_spawn_chance: f64,
    /// Per-frame probability that a coin spawns
    pub coin_spawn_chance: f64,
    /// Enemy base speed is uniform in [min, max)
    pub enemy_speed_min: f32,
    pub enemy_speed_max: f32,
    /// Extra enemy speed per point of score at spawn time
    pub enemy_speed_per_point: f32,
    pub coin_speed: f32,
    /// Coin spin advance per frame (radians, visual only)
    pub coin_spin: f32,
    /// Fraction of the remaining distance the player covers each frame
    pub follow_factor: f32,
    /// Added to the coin radius to get the pickup distance
    pub pickup_margin: f32,
    /// Frames a particle lives (life drops by 1/lifespan per frame)
    pub particle_lifespan: u32,
    pub crash_burst: usize,
    pub pickup_burst: usize,
    pub star_count: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            enemy_spawn_chance: 0.02,
            coin_spawn_chance: 0.015,
            enemy_speed_min: 3.0,
            enemy_speed_max: 7.0,
            enemy_speed_per_point: 0.1,
            coin_speed: 4.0,
            coin_spin: 0.1,
            follow_factor: 0.12,
            pickup_margin: 25.0,
            particle_lifespan: 50,
            crash_burst: 40,
            pickup_burst: 10,
            star_count: 150,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Self = serde_json::from_str(json)?;
        log::info!("Loaded tuning override: {:?}", tuning);
        Ok(tuning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "coin_speed": 6.5, "star_count": 20 }"#).unwrap();
        assert_eq!(tuning.coin_speed, 6.5);
        assert_eq!(tuning.star_count, 20);
        assert_eq!(tuning.enemy_spawn_chance, 0.02);
        assert_eq!(tuning.pickup_margin, 25.0);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(Tuning::from_json("{ coin_speed: }").is_err());
    }
}
