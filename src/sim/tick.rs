//! Frame step
//!
//! Core game loop that advances the session by one frame. Order while
//! playing: input actions, entity updates, collisions, wave check, saucer
//! spawning. Deferred actions are checked first, in every phase.

use serde::{Deserialize, Serialize};

use super::collision::resolve_collisions;
use super::entity::{Entity, retain_alive};
use super::saucer::Saucer;
use super::schedule::DeferredAction;
use super::ship::Ship;
use super::state::{GameEvent, GamePhase, GameState, SoundEvent};
use crate::consts::*;

/// Logical key state sampled once per frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub thrust: bool,
    /// Held fire; rate-limited by the shoot cooldown
    pub shoot: bool,
    /// Held hyperspace; rate-limited by its cooldown
    pub hyperspace: bool,
    /// Start or restart from the menu / game-over screen
    pub start: bool,
}

/// Advance the session by one frame of `dt` seconds.
///
/// A non-finite `dt` is treated as a zero-length frame.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let dt = if dt.is_finite() {
        dt.clamp(0.0, MAX_FRAME_DT)
    } else {
        0.0
    };
    state.time_ticks += 1;
    state.elapsed_ms += f64::from(dt) * 1000.0;

    run_deferred_actions(state);

    if input.start && state.phase != GamePhase::Playing {
        state.start_game();
    }

    if state.phase != GamePhase::Playing {
        return;
    }

    handle_actions(state, input);
    update_world(state, input, dt);
    resolve_collisions(state);
    check_wave_complete(state);
    update_saucer_spawning(state, dt);
}

/// Fire due deferred actions; entries from an older run or outside play are dropped
fn run_deferred_actions(state: &mut GameState) {
    for entry in state.schedule.take_due(state.elapsed_ms) {
        if entry.generation != state.generation || state.phase != GamePhase::Playing {
            log::debug!(
                "Dropping stale {:?} (generation {} vs {}, phase {:?})",
                entry.action,
                entry.generation,
                state.generation,
                state.phase
            );
            continue;
        }

        match entry.action {
            DeferredAction::ResolveShipLoss => {
                if state.lives > 0 {
                    state.ship = Some(Ship::new(state.arena.center()));
                    state.push_event(GameEvent::ShipRespawned);
                } else {
                    state.game_over();
                }
            }
            DeferredAction::SpawnWave => {
                state.wave_pending = false;
                state.spawn_wave();
            }
        }
    }
}

/// Rate-limited discrete actions: shoot and hyperspace
fn handle_actions(state: &mut GameState, input: &TickInput) {
    let now = state.elapsed_ms;
    let ship_alive = state.ship.as_ref().is_some_and(|s| s.is_alive());

    if input.shoot && ship_alive && cooled_down(state.last_shot_ms, now, SHOOT_COOLDOWN_MS) {
        if let Some(ship) = &state.ship {
            state.bullets.push(ship.shoot());
        }
        state.push_event(GameEvent::Sound(SoundEvent::Shoot));
        state.last_shot_ms = Some(now);
    }

    if input.hyperspace
        && ship_alive
        && cooled_down(state.last_hyperspace_ms, now, HYPERSPACE_COOLDOWN_MS)
    {
        state.last_hyperspace_ms = Some(now);
        let arena = state.arena;
        let destroyed = match state.ship.as_mut() {
            Some(ship) => ship.hyperspace(arena, &mut state.rng),
            None => false,
        };
        if destroyed {
            log::debug!("Hyperspace malfunction");
            state.destroy_ship();
        }
    }
}

#[inline]
fn cooled_down(last: Option<f64>, now: f64, cooldown: f64) -> bool {
    last.is_none_or(|t| now - t > cooldown)
}

fn update_world(state: &mut GameState, input: &TickInput, dt: f32) {
    let arena = state.arena;

    if let Some(ship) = state.ship.as_mut().filter(|s| s.is_alive()) {
        ship.update(dt, arena, input, &mut state.rng, &mut state.events);
    }

    for bullet in &mut state.bullets {
        bullet.update(dt, arena);
    }
    retain_alive(&mut state.bullets);

    for asteroid in &mut state.asteroids {
        asteroid.update(dt, arena);
    }
    retain_alive(&mut state.asteroids);

    let target = state.target();
    let mut fired = 0;
    for saucer in &mut state.saucers {
        if let Some(bullet) = saucer.update(dt, arena, target, &mut state.rng) {
            state.saucer_bullets.push(bullet);
            fired += 1;
        }
    }
    for _ in 0..fired {
        state.push_event(GameEvent::Sound(SoundEvent::SaucerShoot));
    }
    // Saucers wrap like every body, so this cull rarely fires
    state
        .saucers
        .retain(|s| s.is_alive() && !s.body.is_off_screen(arena));

    for bullet in &mut state.saucer_bullets {
        bullet.update(dt, arena);
    }
    retain_alive(&mut state.saucer_bullets);

    state.particles.update(dt, arena);
}

/// An empty field advances the wave once and queues the next field
fn check_wave_complete(state: &mut GameState) {
    if !state.asteroids.is_empty() || state.wave_pending || state.phase != GamePhase::Playing {
        return;
    }
    state.wave += 1;
    state.wave_pending = true;
    log::info!("Wave cleared, wave {} incoming", state.wave);
    state.push_event(GameEvent::WaveCleared { wave: state.wave });
    state.schedule.schedule(
        state.elapsed_ms,
        WAVE_DELAY_MS,
        state.generation,
        DeferredAction::SpawnWave,
    );
}

/// One saucer at a time, at most every 30 seconds
fn update_saucer_spawning(state: &mut GameState, dt: f32) {
    state.saucer_spawn_timer += dt * 1000.0;

    if state.saucer_spawn_timer >= SAUCER_SPAWN_INTERVAL_MS && state.saucers.is_empty() {
        let saucer = Saucer::spawn(state.arena, state.score, &mut state.rng);
        log::debug!("{:?} saucer spawned at {:?}", saucer.kind, saucer.body.pos);
        state.push_event(GameEvent::SaucerSpawned { kind: saucer.kind });
        state.saucers.push(saucer);
        state.saucer_spawn_timer = 0.0;
    }
}
