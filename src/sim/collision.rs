//! Per-frame collision sweeps and their scoring side effects
//!
//! Sweeps run in a fixed order: bullet vs asteroid, bullet vs saucer,
//! ship vs asteroid, ship vs saucer, ship vs saucer bullet. Each bullet and
//! the ship can register at most one hit per frame. Hits mark entities dead
//! in place; dead entities are dropped once all sweeps have run.

use glam::Vec2;

use super::asteroid::AsteroidSize;
use super::entity::{Entity, retain_alive};
use super::saucer::SaucerKind;
use super::state::{GameEvent, GameState, SoundEvent};
use crate::consts::{COLOR_RED, COLOR_VECTOR_GREEN};

/// Run every sweep once
pub fn resolve_collisions(state: &mut GameState) {
    bullets_vs_asteroids(state);
    bullets_vs_saucers(state);
    ship_vs_asteroids(state);
    ship_vs_saucers(state);
    ship_vs_saucer_bullets(state);

    retain_alive(&mut state.bullets);
    retain_alive(&mut state.asteroids);
    retain_alive(&mut state.saucers);
    retain_alive(&mut state.saucer_bullets);
}

/// Index of the first live entity `probe` overlaps
fn first_hit<P: Entity, T: Entity>(probe: &P, targets: &[T]) -> Option<usize> {
    targets.iter().position(|t| probe.check_collision(t))
}

fn bullets_vs_asteroids(state: &mut GameState) {
    let mut hits: Vec<usize> = Vec::new();
    for bullet in state.bullets.iter_mut().filter(|b| b.is_alive()) {
        if let Some(j) = first_hit(&*bullet, &state.asteroids) {
            bullet.destroy();
            state.asteroids[j].destroy();
            hits.push(j);
        }
    }

    let mut fragments = Vec::new();
    for j in hits {
        let (pos, size, points) = {
            let asteroid = &state.asteroids[j];
            fragments.extend(asteroid.split(&mut state.rng));
            (asteroid.body.pos, asteroid.size, asteroid.points())
        };
        on_asteroid_destroyed(state, pos, size, points);
    }
    state.asteroids.extend(fragments);
}

fn on_asteroid_destroyed(state: &mut GameState, pos: Vec2, size: AsteroidSize, points: u64) {
    state
        .particles
        .create_explosion(pos, COLOR_VECTOR_GREEN, 8, &mut state.rng);
    state.particles.create_debris(pos, 3, &mut state.rng);
    state.push_event(GameEvent::Sound(SoundEvent::Explosion));
    state.push_event(GameEvent::AsteroidDestroyed { size, points });
    state.add_score(points);
}

fn bullets_vs_saucers(state: &mut GameState) {
    let mut hits: Vec<(Vec2, SaucerKind)> = Vec::new();
    for bullet in state.bullets.iter_mut().filter(|b| b.is_alive()) {
        if let Some(j) = first_hit(&*bullet, &state.saucers) {
            bullet.destroy();
            let saucer = &mut state.saucers[j];
            saucer.destroy();
            hits.push((saucer.body.pos, saucer.kind));
        }
    }

    for (pos, kind) in hits {
        state
            .particles
            .create_explosion(pos, COLOR_RED, 12, &mut state.rng);
        state.push_event(GameEvent::Sound(SoundEvent::Explosion));
        state.push_event(GameEvent::SaucerDestroyed {
            kind,
            points: kind.points(),
        });
        state.add_score(kind.points());
    }
}

/// True when the ship is present, alive and not shielded
fn ship_is_vulnerable(state: &GameState) -> bool {
    state
        .ship
        .as_ref()
        .is_some_and(|ship| ship.is_alive() && !ship.invulnerable)
}

fn ship_vs_asteroids(state: &mut GameState) {
    if !ship_is_vulnerable(state) {
        return;
    }
    let hit = state
        .ship
        .as_ref()
        .and_then(|ship| first_hit(ship, &state.asteroids));
    if hit.is_some() {
        state.destroy_ship();
    }
}

fn ship_vs_saucers(state: &mut GameState) {
    if !ship_is_vulnerable(state) {
        return;
    }
    let hit = state
        .ship
        .as_ref()
        .and_then(|ship| first_hit(ship, &state.saucers));
    if hit.is_some() {
        state.destroy_ship();
    }
}

fn ship_vs_saucer_bullets(state: &mut GameState) {
    if !ship_is_vulnerable(state) {
        return;
    }
    let hit = state
        .ship
        .as_ref()
        .and_then(|ship| first_hit(ship, &state.saucer_bullets));
    if let Some(j) = hit {
        state.saucer_bullets[j].destroy();
        state.destroy_ship();
    }
}
