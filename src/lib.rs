//! Z Plane - a side-scrolling arcade dodger
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (entities, spawning, collisions, game state)
//! - `audio`: Engine drone and one-shot effects behind a capability trait
//! - `renderer`: Per-frame draw commands and the Canvas2D backend
//! - `tuning`: Data-driven game balance
//! - `settings`: Presentation and audio preferences

pub mod audio;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use audio::{AudioEngine, NullAudio};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Player craft dimensions and fixed horizontal position
    pub const PLAYER_WIDTH: f32 = 60.0;
    pub const PLAYER_HEIGHT: f32 = 20.0;
    pub const PLAYER_X: f32 = 80.0;
    /// Distance the player keeps from the top and bottom edges
    pub const PLAYER_EDGE_MARGIN: f32 = 20.0;

    /// Enemy dimensions
    pub const ENEMY_WIDTH: f32 = 55.0;
    pub const ENEMY_HEIGHT: f32 = 18.0;
    /// Enemies appear this far past the right edge
    pub const ENEMY_SPAWN_OFFSET: f32 = 100.0;

    /// Coin defaults
    pub const COIN_RADIUS: f32 = 12.0;
    pub const COIN_SPAWN_OFFSET: f32 = 50.0;

    /// Spawned entities keep this distance from the top and bottom edges
    pub const SPAWN_EDGE_MARGIN: f32 = 50.0;
    /// Entities are culled once they are this far past the left edge
    pub const OFFSCREEN_MARGIN: f32 = 50.0;

    /// Particle velocity spread per axis (velocity in [-SPREAD/2, SPREAD/2))
    pub const PARTICLE_SPREAD: f32 = 10.0;

    /// Engine drone
    pub const DRONE_GAIN: f32 = 0.08;
    pub const DRONE_FADE_IN_SECS: f64 = 0.5;
    pub const DRONE_FADE_OUT_SECS: f64 = 0.2;
    pub const DRONE_SMOOTHING_SECS: f64 = 0.1;
    /// Detune of the square layer relative to the sawtooth layer
    pub const DRONE_DETUNE_HZ: f32 = 0.5;

    /// Crash noise burst length
    pub const CRASH_SECS: f32 = 0.5;
}
