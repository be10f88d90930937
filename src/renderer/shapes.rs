//! Shape generation for game entities
//!
//! Turns simulation state into an ordered list of draw commands. Pure: the
//! same state always yields the same commands.

use glam::Vec2;

use super::command::{Color, DrawCommand, Glow, Paint, colors};
use crate::sim::{BurstKind, Coin, Enemy, GameState, Particle, Player, Star};

/// Particle color by the event that spawned it
fn burst_color(kind: BurstKind) -> Color {
    match kind {
        BurstKind::Crash => colors::ENEMY,
        BurstKind::Pickup => colors::COIN,
    }
}

/// Dart-shaped hull plus a flickering exhaust flame
pub fn player(player: &Player) -> Vec<DrawCommand> {
    let Vec2 { x, y } = player.pos;
    let (w, h) = (player.width, player.height);
    let glow = Some(Glow {
        color: colors::PLAYER_GLOW,
        blur: 15.0,
    });

    vec![
        DrawCommand::Polygon {
            points: vec![
                Vec2::new(x, y),
                Vec2::new(x + w, y + h / 2.0),
                Vec2::new(x, y + h),
                Vec2::new(x + 12.0, y + h / 2.0),
            ],
            paint: Paint::Solid(colors::PLAYER_HULL),
            glow,
        },
        DrawCommand::Polygon {
            points: vec![
                Vec2::new(x, y + 5.0),
                Vec2::new(x - 15.0 - player.flame, y + h / 2.0),
                Vec2::new(x, y + h - 5.0),
            ],
            paint: Paint::Solid(colors::PLAYER_FLAME),
            glow,
        },
    ]
}

/// Arrowhead pointing at the player
pub fn enemy(enemy: &Enemy) -> DrawCommand {
    let Vec2 { x, y } = enemy.pos;
    let (w, h) = (enemy.width, enemy.height);
    DrawCommand::Polygon {
        points: vec![
            Vec2::new(x, y + h / 2.0),
            Vec2::new(x + w, y),
            Vec2::new(x + w - 15.0, y + h / 2.0),
            Vec2::new(x + w, y + h),
        ],
        paint: Paint::Solid(colors::ENEMY),
        glow: Some(Glow {
            color: colors::ENEMY,
            blur: 12.0,
        }),
    }
}

/// Gold disc squashed by its spin phase
pub fn coin(coin: &Coin) -> DrawCommand {
    DrawCommand::Disc {
        center: coin.pos,
        radius: coin.radius,
        scale_x: coin.angle.cos(),
        paint: Paint::Radial {
            inner: colors::COIN_HIGHLIGHT,
            outer: colors::COIN,
            focus: Vec2::new(-4.0, -4.0),
            focus_radius: 2.0,
        },
        alpha: 1.0,
        glow: Some(Glow {
            color: colors::COIN,
            blur: 10.0,
        }),
    }
}

pub fn star(star: &Star) -> DrawCommand {
    DrawCommand::Disc {
        center: star.pos,
        radius: star.radius,
        scale_x: 1.0,
        paint: Paint::Solid(colors::STAR.with_alpha(star.opacity)),
        alpha: 1.0,
        glow: None,
    }
}

/// Fades with remaining life
pub fn particle(particle: &Particle) -> DrawCommand {
    DrawCommand::Disc {
        center: particle.pos,
        radius: particle.radius,
        scale_x: 1.0,
        paint: Paint::Solid(burst_color(particle.kind)),
        alpha: particle.life(),
        glow: None,
    }
}

/// Everything visible this frame, back to front
pub fn frame_commands(state: &GameState) -> Vec<DrawCommand> {
    let mut commands = Vec::with_capacity(
        1 + state.starfield.len()
            + 2
            + state.enemies.len()
            + state.coins.len()
            + state.particles.len(),
    );

    commands.push(DrawCommand::Clear {
        width: state.canvas_width,
        height: state.canvas_height,
    });
    commands.extend(state.starfield.stars.iter().map(star));

    // The crash frame still shows the wreck
    if state.is_playing() || state.ended_this_frame {
        commands.extend(player(&state.player));
        commands.extend(state.enemies.iter().map(enemy));
        commands.extend(state.coins.iter().map(coin));
    }

    commands.extend(state.particles.iter().map(particle));
    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::NullAudio;
    use crate::consts::*;
    use crate::sim::{GamePhase, TickInput, tick};
    use crate::tuning::Tuning;

    fn state() -> GameState {
        GameState::new(4, 800.0, 600.0, Tuning::default())
    }

    #[test]
    fn test_idle_frame_is_background_only() {
        let state = state();
        let commands = frame_commands(&state);
        assert_eq!(commands.len(), 1 + 150);
        assert!(matches!(commands[0], DrawCommand::Clear { .. }));
    }

    #[test]
    fn test_playing_frame_draws_entities() {
        let mut state = state();
        state.start(&mut NullAudio);
        state.enemies.push(Enemy {
            pos: Vec2::new(400.0, 100.0),
            width: ENEMY_WIDTH,
            height: ENEMY_HEIGHT,
            speed: 4.0,
        });
        state.coins.push(Coin {
            pos: Vec2::new(500.0, 200.0),
            radius: COIN_RADIUS,
            speed: 4.0,
            angle: 0.0,
        });
        let commands = frame_commands(&state);
        assert_eq!(commands.len(), 1 + 150 + 2 + 1 + 1);
    }

    fn polygon_count(commands: &[DrawCommand]) -> usize {
        commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Polygon { .. }))
            .count()
    }

    #[test]
    fn test_crash_frame_still_draws_entities() {
        let mut state = GameState::new(
            4,
            800.0,
            600.0,
            Tuning {
                enemy_spawn_chance: 0.0,
                coin_spawn_chance: 0.0,
                ..Default::default()
            },
        );
        state.start(&mut NullAudio);
        let input = TickInput {
            pointer_y: state.player.center().y,
        };
        state.enemies.push(Enemy {
            pos: state.player.pos + Vec2::new(10.0, 0.0),
            width: ENEMY_WIDTH,
            height: ENEMY_HEIGHT,
            speed: 4.0,
        });
        state.enemies.push(Enemy {
            pos: Vec2::new(500.0, 100.0),
            width: ENEMY_WIDTH,
            height: ENEMY_HEIGHT,
            speed: 4.0,
        });

        tick(&mut state, &input, &mut NullAudio);
        assert_eq!(state.phase, GamePhase::Over);
        // Player hull + flame, and the enemy that did not hit
        assert_eq!(polygon_count(&frame_commands(&state)), 3);

        tick(&mut state, &input, &mut NullAudio);
        assert_eq!(polygon_count(&frame_commands(&state)), 0);
    }

    #[test]
    fn test_flame_tracks_jitter() {
        let mut p = Player::new(600.0);
        p.flame = 7.0;
        let commands = player(&p);
        let DrawCommand::Polygon { points, .. } = &commands[1] else {
            panic!("flame should be a polygon");
        };
        assert_eq!(points[1].x, PLAYER_X - 22.0);
    }

    #[test]
    fn test_coin_squash_follows_spin() {
        let c = Coin {
            pos: Vec2::ZERO,
            radius: COIN_RADIUS,
            speed: 4.0,
            angle: std::f32::consts::PI,
        };
        let DrawCommand::Disc { scale_x, .. } = coin(&c) else {
            panic!("coin should be a disc");
        };
        assert!((scale_x + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_particle_alpha_is_life() {
        let p = Particle {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius: 2.0,
            kind: BurstKind::Pickup,
            remaining: 25,
            lifespan: 50,
        };
        let DrawCommand::Disc { alpha, paint, .. } = particle(&p) else {
            panic!("particle should be a disc");
        };
        assert_eq!(alpha, 0.5);
        assert_eq!(paint, Paint::Solid(colors::COIN));
    }
}
