//! Simulation module
//!
//! All gameplay logic lives here. This module must stay host-agnostic:
//! - One call per frame, no wall-clock time
//! - Seeded RNG only
//! - No rendering or platform dependencies; sound goes through `AudioEngine`

pub mod collision;
pub mod entity;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Rect, coin_in_reach};
pub use entity::{BurstKind, Coin, Enemy, Particle, Player, Star, Starfield};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
