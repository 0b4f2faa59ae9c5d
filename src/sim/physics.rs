//! Stateless physics helpers
//!
//! Toroidal wrap-around, circle overlap, velocity damping and the random
//! draws every spawner shares.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// Playfield dimensions; the world wraps at these edges
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(crate::consts::ARENA_WIDTH, crate::consts::ARENA_HEIGHT)
    }
}

/// Map a position that left the arena onto the opposite edge.
///
/// One wrap per axis is enough: per-frame displacement is far smaller than
/// the arena.
pub fn wrap_position(pos: Vec2, arena: Arena) -> Vec2 {
    let mut x = pos.x;
    let mut y = pos.y;

    if x < 0.0 {
        x = arena.width;
    } else if x > arena.width {
        x = 0.0;
    }
    if y < 0.0 {
        y = arena.height;
    } else if y > arena.height {
        y = 0.0;
    }

    Vec2::new(x, y)
}

/// Strict circle overlap: touching circles do not collide
#[inline]
pub fn check_circle_collision(pos_a: Vec2, radius_a: f32, pos_b: Vec2, radius_b: f32) -> bool {
    pos_a.distance(pos_b) < radius_a + radius_b
}

/// Per-frame multiplicative damping (frame-rate dependent)
#[inline]
pub fn apply_friction(vel: Vec2, friction: f32) -> Vec2 {
    vel * friction
}

/// Clamp speed to `max_speed`, keeping direction
#[inline]
pub fn limit_velocity(vel: Vec2, max_speed: f32) -> Vec2 {
    if vel.length() > max_speed {
        vel.normalize_or_zero() * max_speed
    } else {
        vel
    }
}

/// True when `pos` lies beyond the arena plus `margin` on any side
#[inline]
pub fn is_off_screen(pos: Vec2, arena: Arena, margin: f32) -> bool {
    pos.x < -margin || pos.x > arena.width + margin || pos.y < -margin || pos.y > arena.height + margin
}

/// Uniform draw in [min, max)
#[inline]
pub fn random_in_range<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    rng.random::<f32>() * (max - min) + min
}

/// Uniform heading in [0, 2π)
#[inline]
pub fn random_angle<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.random::<f32>() * TAU
}
