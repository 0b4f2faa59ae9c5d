//! Asteroids Sim - simulation core of a vector-style arcade space shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, waves, game state)
//! - `settings`: Arena size, RNG seed and particle quality
//! - `error`: Crate error type
//!
//! Rendering, audio and input capture are external collaborators. The core
//! consumes a key-state table each frame and hands back draw commands,
//! HUD counters and named sound triggers.

pub mod error;
pub mod settings;
pub mod sim;

pub use error::{Result, SimError};
pub use settings::{QualityPreset, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Default arena dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;
    /// Largest frame step fed to the simulation (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Margin used by the off-screen test
    pub const OFFSCREEN_MARGIN: f32 = 50.0;

    /// Ship defaults
    pub const SHIP_RADIUS: f32 = 8.0;
    pub const SHIP_THRUST_POWER: f32 = 300.0;
    /// radians per second
    pub const SHIP_ROTATION_SPEED: f32 = 5.0;
    pub const SHIP_MAX_SPEED: f32 = 400.0;
    /// Multiplicative damping applied once per frame
    pub const SHIP_FRICTION: f32 = 0.99;
    /// Invulnerability after spawn, respawn and hyperspace (ms)
    pub const SHIP_INVULNERABILITY_MS: f32 = 3000.0;
    /// Blink period while invulnerable (ms)
    pub const SHIP_BLINK_MS: f64 = 100.0;
    /// Chance a hyperspace jump destroys the ship
    pub const HYPERSPACE_FAILURE_CHANCE: f64 = 0.1;
    /// Hyperspace landing keeps this far from every edge
    pub const HYPERSPACE_MARGIN: f32 = 50.0;
    /// Chance per thrusting frame to emit a thrust sound
    pub const THRUST_SOUND_CHANCE: f64 = 0.1;
    /// Exhaust trail capacity
    pub const THRUST_TRAIL_LENGTH: usize = 20;
    pub const THRUST_TRAIL_LIFE: f32 = 0.3;

    /// Bullet defaults
    pub const BULLET_SPEED: f32 = 500.0;
    pub const BULLET_RADIUS: f32 = 2.0;
    pub const BULLET_LIFETIME: f32 = 1.5;
    pub const SAUCER_BULLET_SPEED: f32 = 300.0;
    pub const SAUCER_BULLET_RADIUS: f32 = 3.0;
    pub const SAUCER_BULLET_LIFETIME: f32 = 3.0;
    /// Gap between a shooter's hull and its muzzle
    pub const MUZZLE_OFFSET: f32 = 5.0;

    /// Asteroid spin range (radians per second, symmetric)
    pub const ASTEROID_MAX_SPIN: f32 = 2.0;
    /// Per-vertex radius jitter (fraction of nominal radius)
    pub const ASTEROID_JAGGEDNESS: f32 = 0.3;
    /// Half-width of the square kept clear around the arena centre at wave start
    pub const ASTEROID_SAFE_ZONE: f32 = 150.0;
    /// Distance outside the edge for edge spawns
    pub const ASTEROID_EDGE_OFFSET: f32 = 50.0;
    pub const FRAGMENTS_PER_SPLIT: usize = 2;
    pub const FRAGMENT_SPEED_MIN: f32 = 1.2;
    pub const FRAGMENT_SPEED_MAX: f32 = 1.8;

    /// Saucer timing (ms)
    pub const SAUCER_SPAWN_INTERVAL_MS: f32 = 30_000.0;
    pub const SAUCER_TURN_INTERVAL_MS: f32 = 3000.0;
    /// Score above which only small saucers appear
    pub const SMALL_SAUCER_SCORE: u64 = 40_000;
    /// Horizontal distance outside the arena for saucer spawns
    pub const SAUCER_EDGE_OFFSET: f32 = 30.0;
    /// Vertical margin for saucer spawns
    pub const SAUCER_SPAWN_MARGIN: f32 = 50.0;

    /// Session rules
    pub const STARTING_LIVES: u32 = 3;
    pub const EXTRA_LIFE_SCORE: u64 = 10_000;
    pub const RESPAWN_DELAY_MS: f64 = 2000.0;
    pub const WAVE_DELAY_MS: f64 = 2000.0;
    pub const BASE_WAVE_ASTEROIDS: u32 = 4;
    pub const MAX_WAVE_ASTEROIDS: u32 = 12;

    /// Input rate limits (ms)
    pub const SHOOT_COOLDOWN_MS: f64 = 200.0;
    pub const HYPERSPACE_COOLDOWN_MS: f64 = 1000.0;

    /// Colors (0xRRGGBB)
    pub const COLOR_VECTOR_GREEN: u32 = 0x00ff00;
    pub const COLOR_WHITE: u32 = 0xffffff;
    pub const COLOR_RED: u32 = 0xff0000;
    pub const COLOR_EXHAUST: u32 = 0xff4400;
    pub const DEBRIS_COLORS: [u32; 3] = [0x888888, 0xaaaaaa, 0x666666];
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Vector of the given length pointing along `angle` (0 = +x axis)
#[inline]
pub fn from_angle(angle: f32, magnitude: f32) -> Vec2 {
    Vec2::new(angle.cos() * magnitude, angle.sin() * magnitude)
}

/// Rotate a vector counter-clockwise by `angle` radians
#[inline]
pub fn rotate(v: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}
