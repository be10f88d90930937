//! Audio system
//!
//! The simulation talks to sound through the narrow [`AudioEngine`]
//! capability. The browser backend lives in `web`; everything else (native
//! runs, tests) uses [`NullAudio`] or [`RecordingAudio`].

use rand::Rng;

use crate::consts::{CRASH_SECS, DRONE_DETUNE_HZ};

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

/// Sound capability the simulation drives.
///
/// All calls are fire-and-forget. A backend that is not ready (no output
/// device, not yet unlocked) must treat every call as a silent no-op.
pub trait AudioEngine {
    /// Called from the start trigger, which is always a user gesture.
    /// Backends that need an explicit unlock initialize here; repeated
    /// calls must be harmless.
    fn unlock(&mut self) {}

    /// Retarget the engine drone (smoothed, never stepped)
    fn set_engine_target(&mut self, target: DroneTarget);

    /// Short rising chime for a coin pickup
    fn play_coin(&mut self);

    /// Burst of filtered noise for a crash
    fn play_crash(&mut self);

    /// Bring the drone up to its running level
    fn fade_in(&mut self);

    /// Take the drone down to silence
    fn fade_out(&mut self);
}

/// Drone parameters derived from the craft's height
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DroneTarget {
    /// Sawtooth layer frequency; the square layer sits `DRONE_DETUNE_HZ` above
    pub frequency_hz: f32,
    /// Low-pass cutoff
    pub cutoff_hz: f32,
}

impl DroneTarget {
    /// Map a normalized height (0 = top of screen, 1 = bottom) to drone
    /// pitch and brightness. Higher on screen is higher and brighter.
    pub fn for_height(fraction: f32) -> Self {
        let lift = 1.0 - fraction.clamp(0.0, 1.0);
        Self {
            frequency_hz: 50.0 + lift * 30.0,
            cutoff_hz: 300.0 + lift * 400.0,
        }
    }

    pub fn detuned_hz(&self) -> f32 {
        self.frequency_hz + DRONE_DETUNE_HZ
    }
}

/// Fresh white noise for one crash, uniform in [-1, 1)
pub fn crash_noise<R: Rng + ?Sized>(rng: &mut R, sample_rate: f32) -> Vec<f32> {
    let len = (sample_rate * CRASH_SECS) as usize;
    (0..len).map(|_| rng.random::<f32>() * 2.0 - 1.0).collect()
}

/// Silent backend for headless runs and hosts without audio
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio;

impl AudioEngine for NullAudio {
    fn set_engine_target(&mut self, _target: DroneTarget) {}
    fn play_coin(&mut self) {}
    fn play_crash(&mut self) {}
    fn fade_in(&mut self) {}
    fn fade_out(&mut self) {}
}

/// Backend that only counts calls. Handy for asserting on what the
/// simulation asked for.
#[derive(Debug, Default, Clone)]
pub struct RecordingAudio {
    pub unlocks: u32,
    pub coins: u32,
    pub crashes: u32,
    pub fade_ins: u32,
    pub fade_outs: u32,
    pub last_target: Option<DroneTarget>,
}

impl AudioEngine for RecordingAudio {
    fn unlock(&mut self) {
        self.unlocks += 1;
    }

    fn set_engine_target(&mut self, target: DroneTarget) {
        self.last_target = Some(target);
    }

    fn play_coin(&mut self) {
        self.coins += 1;
    }

    fn play_crash(&mut self) {
        self.crashes += 1;
    }

    fn fade_in(&mut self) {
        self.fade_ins += 1;
    }

    fn fade_out(&mut self) {
        self.fade_outs += 1;
    }
}
