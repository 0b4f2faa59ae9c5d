//! Shared body state and the entity capability trait
//!
//! Every movable thing in the world owns a [`Body`]. Per-kind structs add
//! their own fields and extend [`Body::integrate`] in their `update`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::draw::Shape;
use super::physics::{self, Arena};
use crate::consts::OFFSCREEN_MARGIN;

/// Explicit kind tag for every entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Ship,
    Asteroid,
    Bullet,
    SaucerBullet,
    Saucer,
    Particle,
    /// Ship exhaust puff (visual only)
    Exhaust,
}

/// Kinematic state common to all entities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Heading in radians (0 = +x)
    pub rotation: f32,
    pub radius: f32,
    pub alive: bool,
}

impl Body {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel,
            rotation: 0.0,
            radius,
            alive: true,
        }
    }

    /// Integrate position by velocity, then wrap onto the arena
    pub fn integrate(&mut self, dt: f32, arena: Arena) {
        self.pos += self.vel * dt;
        self.pos = physics::wrap_position(self.pos, arena);
    }

    #[inline]
    pub fn collides_with(&self, other: &Body) -> bool {
        physics::check_circle_collision(self.pos, self.radius, other.pos, other.radius)
    }

    /// Fully outside the arena plus the fixed off-screen margin
    #[inline]
    pub fn is_off_screen(&self, arena: Arena) -> bool {
        physics::is_off_screen(self.pos, arena, OFFSCREEN_MARGIN)
    }
}

/// Capabilities the collision resolver and draw pass rely on
pub trait Entity {
    fn kind(&self) -> EntityKind;
    fn body(&self) -> &Body;
    fn body_mut(&mut self) -> &mut Body;
    fn shape(&self) -> Shape;
    fn color(&self) -> u32;

    /// Opacity for the draw pass (1.0 = opaque)
    fn alpha(&self) -> f32 {
        1.0
    }

    #[inline]
    fn is_alive(&self) -> bool {
        self.body().alive
    }

    /// Mark dead; irreversible and idempotent
    #[inline]
    fn destroy(&mut self) {
        self.body_mut().alive = false;
    }

    /// Dead entities never collide
    #[inline]
    fn check_collision(&self, other: &dyn Entity) -> bool {
        self.is_alive() && other.is_alive() && self.body().collides_with(other.body())
    }
}

/// Drop dead entities from a collection
pub fn retain_alive<E: Entity>(items: &mut Vec<E>) {
    items.retain(|e| e.is_alive());
}
