//! Web Audio backend
//!
//! Procedurally generated drone and effects - no external files needed!
//! The graph is built lazily on the first unlock, since browsers refuse to
//! start an `AudioContext` outside a user gesture.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use web_sys::{
    AudioContext, AudioContextState, BiquadFilterNode, BiquadFilterType, GainNode, OscillatorNode,
    OscillatorType,
};

use super::{AudioEngine, DroneTarget, crash_noise};
use crate::consts::*;
use crate::settings::Settings;

/// The continuous engine drone: two detuned oscillators into a low-pass
/// filter into a gain stage.
struct Drone {
    ctx: AudioContext,
    saw: OscillatorNode,
    square: OscillatorNode,
    filter: BiquadFilterNode,
    gain: GainNode,
}

impl Drone {
    fn build() -> Option<Self> {
        let ctx = AudioContext::new().ok()?;
        let t = ctx.current_time();

        let filter = ctx.create_biquad_filter().ok()?;
        filter.set_type(BiquadFilterType::Lowpass);
        filter.frequency().set_value_at_time(400.0, t).ok()?;

        let gain = ctx.create_gain().ok()?;
        gain.gain().set_value_at_time(0.0, t).ok()?;

        let saw = ctx.create_oscillator().ok()?;
        saw.set_type(OscillatorType::Sawtooth);
        saw.frequency().set_value_at_time(55.0, t).ok()?;

        let square = ctx.create_oscillator().ok()?;
        square.set_type(OscillatorType::Square);
        square
            .frequency()
            .set_value_at_time(55.0 + DRONE_DETUNE_HZ, t)
            .ok()?;

        saw.connect_with_audio_node(&filter).ok()?;
        square.connect_with_audio_node(&filter).ok()?;
        filter.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        saw.start().ok()?;
        square.start().ok()?;

        Some(Self {
            ctx,
            saw,
            square,
            filter,
            gain,
        })
    }

    /// Resume the context if the browser suspended it
    fn resume(&self) {
        if self.ctx.state() == AudioContextState::Suspended {
            let _ = self.ctx.resume();
        }
    }
}

/// Browser audio engine
pub struct WebAudio {
    drone: Option<Drone>,
    volume: f32,
    rng: Pcg32,
}

impl WebAudio {
    /// Nothing touches the audio system until [`AudioEngine::unlock`]
    pub fn new(settings: &Settings, seed: u64) -> Self {
        Self {
            drone: None,
            volume: settings.volume(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Create a one-shot oscillator routed through its own gain envelope
    fn create_osc(
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    fn fade_to(&self, level: f32, time_constant: f64) {
        let Some(drone) = &self.drone else { return };
        let t = drone.ctx.current_time();
        drone
            .gain
            .gain()
            .set_target_at_time(level, t, time_constant)
            .ok();
    }
}

impl AudioEngine for WebAudio {
    fn unlock(&mut self) {
        if self.drone.is_none() {
            self.drone = Drone::build();
            match &self.drone {
                Some(_) => log::info!("Audio initialized"),
                None => log::warn!("Failed to create AudioContext - audio disabled"),
            }
        }
        if let Some(drone) = &self.drone {
            drone.resume();
        }
    }

    fn set_engine_target(&mut self, target: DroneTarget) {
        let Some(drone) = &self.drone else { return };
        let t = drone.ctx.current_time();

        drone
            .saw
            .frequency()
            .set_target_at_time(target.frequency_hz, t, DRONE_SMOOTHING_SECS)
            .ok();
        drone
            .square
            .frequency()
            .set_target_at_time(target.detuned_hz(), t, DRONE_SMOOTHING_SECS)
            .ok();
        // Brighter filter when higher
        drone
            .filter
            .frequency()
            .set_target_at_time(target.cutoff_hz, t, DRONE_SMOOTHING_SECS)
            .ok();
    }

    /// Coin - quick rising ding
    fn play_coin(&mut self) {
        if self.volume <= 0.0 {
            return;
        }
        let Some(drone) = &self.drone else { return };
        let ctx = &drone.ctx;
        let Some((osc, gain)) = Self::create_osc(ctx, 900.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        osc.frequency().set_value_at_time(900.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(1400.0, t + 0.05)
            .ok();
        gain.gain().set_value_at_time(self.volume * 0.1, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.2)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.2).ok();
    }

    /// Crash - half a second of low-passed noise, fading out linearly
    fn play_crash(&mut self) {
        if self.volume <= 0.0 {
            return;
        }
        let Some(drone) = &self.drone else { return };
        let ctx = &drone.ctx;
        let sample_rate = ctx.sample_rate();
        let mut samples = crash_noise(&mut self.rng, sample_rate);

        let Ok(buffer) = ctx.create_buffer(1, samples.len() as u32, sample_rate) else {
            return;
        };
        if buffer.copy_to_channel(&mut samples, 0).is_err() {
            return;
        }
        let Ok(noise) = ctx.create_buffer_source() else { return };
        noise.set_buffer(Some(&buffer));
        let Ok(filter) = ctx.create_biquad_filter() else { return };
        filter.set_type(BiquadFilterType::Lowpass);
        let Ok(gain) = ctx.create_gain() else { return };

        let t = ctx.current_time();
        filter.frequency().set_value_at_time(600.0, t).ok();
        gain.gain().set_value_at_time(self.volume * 0.4, t).ok();
        gain.gain()
            .linear_ramp_to_value_at_time(0.0, t + CRASH_SECS as f64)
            .ok();

        if noise.connect_with_audio_node(&filter).is_err()
            || filter.connect_with_audio_node(&gain).is_err()
            || gain.connect_with_audio_node(&ctx.destination()).is_err()
        {
            return;
        }
        noise.start().ok();
    }

    fn fade_in(&mut self) {
        self.fade_to(DRONE_GAIN * self.volume, DRONE_FADE_IN_SECS);
    }

    fn fade_out(&mut self) {
        self.fade_to(0.0, DRONE_FADE_OUT_SECS);
    }
}
