//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order
//! - Deferred effects run from the frame loop, never from real timers
//! - No rendering, audio or platform dependencies

pub mod asteroid;
pub mod bullet;
pub mod collision;
pub mod draw;
pub mod entity;
pub mod particle;
pub mod physics;
pub mod saucer;
pub mod schedule;
pub mod ship;
pub mod state;
pub mod tick;

pub use asteroid::{Asteroid, AsteroidSize};
pub use bullet::{Bullet, BulletOwner};
pub use collision::resolve_collisions;
pub use draw::{DrawCommand, Shape, draw_list};
pub use entity::{Body, Entity, EntityKind};
pub use particle::{Particle, ParticleSystem};
pub use physics::{
    Arena, apply_friction, check_circle_collision, is_off_screen, limit_velocity, random_angle,
    random_in_range, wrap_position,
};
pub use saucer::{Saucer, SaucerKind, Target};
pub use schedule::{DeferredAction, Schedule, ScheduledAction};
pub use ship::{SHIP_OUTLINE, Ship, TrailPoint};
pub use state::{GameEvent, GamePhase, GameState, Hud, SoundEvent};
pub use tick::{TickInput, tick};
