//! Game state and phase transitions
//!
//! `GameState` owns every live entity collection. Nothing in the crate keeps
//! ambient globals; the host holds one `GameState` and passes it to `tick`.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Coin, Enemy, Particle, Player, Starfield};
use crate::audio::AudioEngine;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for the first start
    #[default]
    Idle,
    /// Active gameplay
    Playing,
    /// Run ended; restart is always available
    Over,
}

/// Outputs for the host, queued during a frame and drained after it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Score display should show this value
    ScoreChanged { score: u32 },
    /// The run ended (emitted once per `end`)
    GameOver { final_score: u32 },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: GamePhase,
    /// Coins collected this run
    pub score: u32,
    pub canvas_width: f32,
    pub canvas_height: f32,
    /// The craft (replaced on every start)
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub coins: Vec<Coin>,
    /// Visual particles (keep animating after game over)
    pub particles: Vec<Particle>,
    /// Background stars live for the whole process, across runs
    pub starfield: Starfield,
    pub tuning: Tuning,
    /// Pending host events
    pub events: Vec<GameEvent>,
    /// The run ended during the current frame; the final positions are
    /// still drawn once before the world disappears
    pub ended_this_frame: bool,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create the idle state shown before the first start
    pub fn new(seed: u64, canvas_width: f32, canvas_height: f32, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let starfield = Starfield::new(&mut rng, tuning.star_count, canvas_width, canvas_height);
        Self {
            phase: GamePhase::Idle,
            score: 0,
            canvas_width,
            canvas_height,
            player: Player::new(canvas_height),
            enemies: Vec::new(),
            coins: Vec::new(),
            particles: Vec::new(),
            starfield,
            tuning,
            events: Vec::new(),
            ended_this_frame: false,
            rng,
        }
    }

    /// Begin a fresh run. Valid from any phase; restarting from `Over` is
    /// the same call.
    pub fn start(&mut self, audio: &mut dyn AudioEngine) {
        audio.unlock();
        audio.fade_in();

        self.score = 0;
        self.enemies.clear();
        self.coins.clear();
        self.particles.clear();
        self.player = Player::new(self.canvas_height);
        self.phase = GamePhase::Playing;
        self.ended_this_frame = false;
        self.events.push(GameEvent::ScoreChanged { score: 0 });

        log::info!("Run started ({}x{})", self.canvas_width, self.canvas_height);
    }

    /// End the current run. Only a playing run can end; other calls are
    /// ignored so the crash sound plays exactly once.
    pub fn end(&mut self, audio: &mut dyn AudioEngine) {
        if self.phase != GamePhase::Playing {
            log::debug!("end() ignored in phase {:?}", self.phase);
            return;
        }
        self.phase = GamePhase::Over;
        self.ended_this_frame = true;
        audio.play_crash();
        audio.fade_out();
        self.events.push(GameEvent::GameOver {
            final_score: self.score,
        });

        log::info!("Run over: {} coins collected", self.score);
    }

    /// Track a viewport change. The player clamp and spawn ranges read the
    /// stored size, so nothing else needs recomputing.
    pub fn resize(&mut self, canvas_width: f32, canvas_height: f32) {
        self.canvas_width = canvas_width;
        self.canvas_height = canvas_height;
        log::debug!("Canvas resized to {}x{}", canvas_width, canvas_height);
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Take all events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::RecordingAudio;
    use crate::sim::entity::{BurstKind, Particle};
    use glam::Vec2;

    fn new_state() -> GameState {
        GameState::new(12345, 800.0, 600.0, Tuning::default())
    }

    #[test]
    fn test_new_state_is_idle() {
        let state = new_state();
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.score, 0);
        assert_eq!(state.starfield.len(), 150);
    }

    #[test]
    fn test_start_resets_run() {
        let mut state = new_state();
        let mut audio = RecordingAudio::default();
        state.start(&mut audio);

        state.score = 9;
        state.player.pos.y = 40.0;
        let p = Particle::new(&mut state.rng, Vec2::ZERO, BurstKind::Pickup, 50);
        state.particles.push(p);
        state.end(&mut audio);
        state.drain_events();

        state.start(&mut audio);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert!(state.particles.is_empty());
        assert_eq!(state.player.pos.y, 300.0);
        assert_eq!(audio.unlocks, 2);
        assert_eq!(audio.fade_ins, 2);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::ScoreChanged { score: 0 }]
        );
    }

    #[test]
    fn test_end_fires_once() {
        let mut state = new_state();
        let mut audio = RecordingAudio::default();
        state.start(&mut audio);
        state.score = 4;
        state.end(&mut audio);
        state.end(&mut audio);

        assert_eq!(state.phase, GamePhase::Over);
        assert_eq!(audio.crashes, 1);
        assert_eq!(audio.fade_outs, 1);
        let overs: Vec<_> = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .collect();
        assert_eq!(overs, vec![GameEvent::GameOver { final_score: 4 }]);
    }

    #[test]
    fn test_end_from_idle_is_ignored() {
        let mut state = new_state();
        let mut audio = RecordingAudio::default();
        state.end(&mut audio);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(audio.crashes, 0);
    }

    #[test]
    fn test_stars_survive_restart() {
        let mut state = new_state();
        let mut audio = RecordingAudio::default();
        let first = state.starfield.stars[0].pos;
        state.start(&mut audio);
        assert_eq!(state.starfield.stars[0].pos, first);
    }
}
