//! Frame driver
//!
//! One call to [`tick`] advances the game by exactly one display frame. The
//! host owns the real-time loop and decides when to call it.
//!
//! Order within a frame is fixed:
//! stars → (playing only: spawn → player → enemies → coins) → particles.

use rand::Rng;

use super::collision::coin_in_reach;
use super::entity::BurstKind;
use super::spawn;
use super::state::{GameEvent, GameState};
use crate::audio::{AudioEngine, DroneTarget};

/// Host input sampled at the start of a frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickInput {
    /// Latest pointer y in canvas pixels (mouse or touch, last writer wins)
    pub pointer_y: f32,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput, audio: &mut dyn AudioEngine) {
    state.ended_this_frame = false;

    // Stars scroll in every phase
    let (width, height) = (state.canvas_width, state.canvas_height);
    state.starfield.update(&mut state.rng, width, height);

    if state.is_playing() {
        run_spawn_trials(state);
        update_player(state, input, audio);
        update_enemies(state, audio);
        update_coins(state, audio);
    }

    // Particles finish their animation even after game over
    state.particles.retain_mut(|p| {
        p.update();
        p.is_alive()
    });
}

fn run_spawn_trials(state: &mut GameState) {
    let (width, height) = (state.canvas_width, state.canvas_height);

    if spawn::trial(&mut state.rng, state.tuning.enemy_spawn_chance) {
        let enemy = spawn::spawn_enemy(&mut state.rng, &state.tuning, width, height, state.score);
        log::trace!("Enemy spawned at y={:.0} speed={:.2}", enemy.pos.y, enemy.speed);
        state.enemies.push(enemy);
    }
    if spawn::trial(&mut state.rng, state.tuning.coin_spawn_chance) {
        let coin = spawn::spawn_coin(&mut state.rng, &state.tuning, width, height);
        log::trace!("Coin spawned at y={:.0}", coin.pos.y);
        state.coins.push(coin);
    }
}

fn update_player(state: &mut GameState, input: &TickInput, audio: &mut dyn AudioEngine) {
    state.player.flame = state.rng.random::<f32>() * 10.0;
    state
        .player
        .follow(input.pointer_y, state.tuning.follow_factor, state.canvas_height);

    let fraction = state.player.height_fraction(state.canvas_height);
    audio.set_engine_target(DroneTarget::for_height(fraction));
}

/// Move, collide and cull enemies in one pass. The first overlap ends the
/// run; enemies after it still move and cull but are not tested.
fn update_enemies(state: &mut GameState, audio: &mut dyn AudioEngine) {
    let player_rect = state.player.rect();
    let mut enemies = std::mem::take(&mut state.enemies);

    enemies.retain_mut(|enemy| {
        enemy.update();
        if state.is_playing() && player_rect.overlaps(&enemy.rect()) {
            spawn::burst(
                &mut state.rng,
                &mut state.particles,
                enemy.pos,
                BurstKind::Crash,
                state.tuning.crash_burst,
                state.tuning.particle_lifespan,
            );
            state.end(&mut *audio);
            return false;
        }
        !enemy.is_offscreen()
    });

    state.enemies = enemies;
}

/// Move, collect and cull coins in one pass. Nothing is collected once the
/// run has ended, even later in the same frame.
fn update_coins(state: &mut GameState, audio: &mut dyn AudioEngine) {
    let player_center = state.player.center();
    let mut coins = std::mem::take(&mut state.coins);

    coins.retain_mut(|coin| {
        coin.update(state.tuning.coin_spin);
        if state.is_playing()
            && coin_in_reach(player_center, coin.pos, coin.radius, state.tuning.pickup_margin)
        {
            state.score += 1;
            state.events.push(GameEvent::ScoreChanged { score: state.score });
            audio.play_coin();
            spawn::burst(
                &mut state.rng,
                &mut state.particles,
                coin.pos,
                BurstKind::Pickup,
                state.tuning.pickup_burst,
                state.tuning.particle_lifespan,
            );
            return false;
        }
        !coin.is_offscreen()
    });

    state.coins = coins;
}
