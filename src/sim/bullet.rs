//! Linear projectiles with a finite lifetime

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::draw::Shape;
use super::entity::{Body, Entity, EntityKind};
use super::physics::Arena;
use crate::consts::*;

/// Who fired the bullet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulletOwner {
    Player,
    /// Hostile fire; can only hit the ship
    Saucer,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub body: Body,
    pub owner: BulletOwner,
    /// Seconds before self-destruction
    pub lifetime: f32,
    pub age: f32,
}

impl Bullet {
    pub fn player(pos: Vec2, vel: Vec2) -> Self {
        Self {
            body: Body::new(pos, vel, BULLET_RADIUS),
            owner: BulletOwner::Player,
            lifetime: BULLET_LIFETIME,
            age: 0.0,
        }
    }

    pub fn saucer(pos: Vec2, vel: Vec2) -> Self {
        Self {
            body: Body::new(pos, vel, SAUCER_BULLET_RADIUS),
            owner: BulletOwner::Saucer,
            lifetime: SAUCER_BULLET_LIFETIME,
            age: 0.0,
        }
    }

    pub fn update(&mut self, dt: f32, arena: Arena) {
        self.body.integrate(dt, arena);
        self.age += dt;
        if self.age >= self.lifetime {
            self.destroy();
        }
    }
}

impl Entity for Bullet {
    fn kind(&self) -> EntityKind {
        match self.owner {
            BulletOwner::Player => EntityKind::Bullet,
            BulletOwner::Saucer => EntityKind::SaucerBullet,
        }
    }

    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn shape(&self) -> Shape {
        Shape::Circle { filled: true }
    }

    fn color(&self) -> u32 {
        match self.owner {
            BulletOwner::Player => COLOR_WHITE,
            BulletOwner::Saucer => COLOR_RED,
        }
    }
}
