//! Flying saucers: type profiles, wandering and aimed fire

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::bullet::Bullet;
use super::draw::Shape;
use super::entity::{Body, Entity, EntityKind};
use super::physics::{Arena, random_angle, random_in_range};
use crate::consts::*;
use crate::error::SimError;
use crate::from_angle;

/// Saucer type profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SaucerKind {
    /// Slow, big, inaccurate
    Large,
    /// Fast, small, deadly
    Small,
}

impl SaucerKind {
    pub fn radius(self) -> f32 {
        match self {
            SaucerKind::Large => 20.0,
            SaucerKind::Small => 15.0,
        }
    }

    pub fn points(self) -> u64 {
        match self {
            SaucerKind::Large => 200,
            SaucerKind::Small => 1000,
        }
    }

    pub fn speed(self) -> f32 {
        match self {
            SaucerKind::Large => 60.0,
            SaucerKind::Small => 100.0,
        }
    }

    /// Probability that a shot leads the target instead of going astray
    pub fn accuracy(self) -> f64 {
        match self {
            SaucerKind::Large => 0.3,
            SaucerKind::Small => 0.8,
        }
    }

    /// Milliseconds between shots
    pub fn shoot_interval_ms(self) -> f32 {
        match self {
            SaucerKind::Large => 2000.0,
            SaucerKind::Small => 1500.0,
        }
    }

    /// Small saucers only once the score passes the threshold
    pub fn for_score(score: u64) -> Self {
        if score > SMALL_SAUCER_SCORE {
            SaucerKind::Small
        } else {
            SaucerKind::Large
        }
    }
}

impl FromStr for SaucerKind {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "large" => Ok(SaucerKind::Large),
            "small" => Ok(SaucerKind::Small),
            other => Err(SimError::UnknownSaucerKind(other.to_string())),
        }
    }
}

/// Where the ship is this frame. Built fresh by the session, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    pub pos: Vec2,
    pub vel: Vec2,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Saucer {
    pub body: Body,
    pub kind: SaucerKind,
    /// ms since the last shot attempt
    pub shoot_timer: f32,
    /// ms since the last heading change
    pub turn_timer: f32,
}

impl Saucer {
    pub fn new<R: Rng + ?Sized>(pos: Vec2, kind: SaucerKind, rng: &mut R) -> Self {
        let vel = from_angle(random_angle(rng), kind.speed());
        Self {
            body: Body::new(pos, vel, kind.radius()),
            kind,
            shoot_timer: 0.0,
            turn_timer: 0.0,
        }
    }

    /// Spawn just off the left or right edge at a random height
    pub fn spawn<R: Rng + ?Sized>(arena: Arena, score: u64, rng: &mut R) -> Self {
        let kind = SaucerKind::for_score(score);
        let x = if rng.random_bool(0.5) {
            -SAUCER_EDGE_OFFSET
        } else {
            arena.width + SAUCER_EDGE_OFFSET
        };
        let y = random_in_range(
            rng,
            SAUCER_SPAWN_MARGIN,
            arena.height - SAUCER_SPAWN_MARGIN,
        );
        Saucer::new(Vec2::new(x, y), kind, rng)
    }

    /// Advance one frame. Returns a bullet when the saucer fires.
    ///
    /// The shot clock restarts every interval; a missing or dead target only
    /// means that interval's shot is withheld.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        arena: Arena,
        target: Option<Target>,
        rng: &mut R,
    ) -> Option<Bullet> {
        self.body.integrate(dt, arena);

        self.shoot_timer += dt * 1000.0;
        self.turn_timer += dt * 1000.0;

        if self.turn_timer >= SAUCER_TURN_INTERVAL_MS {
            self.change_direction(rng);
            self.turn_timer = 0.0;
        }

        if self.shoot_timer >= self.kind.shoot_interval_ms() {
            self.shoot_timer = 0.0;
            return target.map(|t| self.shoot(t, rng));
        }
        None
    }

    pub fn change_direction<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.body.vel = from_angle(random_angle(rng), self.kind.speed());
    }

    /// Fire at the target, leading it with straight-line extrapolation when
    /// the accuracy roll succeeds
    pub fn shoot<R: Rng + ?Sized>(&self, target: Target, rng: &mut R) -> Bullet {
        let dir = if rng.random_bool(self.kind.accuracy()) {
            self.lead_direction(target)
        } else {
            from_angle(random_angle(rng), 1.0)
        };
        let pos = self.body.pos + dir * (self.body.radius + MUZZLE_OFFSET);
        Bullet::saucer(pos, dir * SAUCER_BULLET_SPEED)
    }

    /// Unit direction towards where the target will be when a shot arrives
    pub fn lead_direction(&self, target: Target) -> Vec2 {
        let travel_time = target.pos.distance(self.body.pos) / SAUCER_BULLET_SPEED;
        let predicted = target.pos + target.vel * travel_time;
        (predicted - self.body.pos).normalize_or_zero()
    }
}

impl Entity for Saucer {
    fn kind(&self) -> EntityKind {
        EntityKind::Saucer
    }

    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn shape(&self) -> Shape {
        Shape::EllipsePair
    }

    fn color(&self) -> u32 {
        COLOR_VECTOR_GREEN
    }
}
