//! The player's ship
//!
//! Reads the per-frame key table, applies thrust and damping, counts down
//! invulnerability and keeps a short exhaust trail for the draw pass.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

use super::bullet::Bullet;
use super::draw::Shape;
use super::entity::{Body, Entity, EntityKind};
use super::physics::{self, Arena, random_in_range};
use super::saucer::Target;
use super::state::{GameEvent, SoundEvent};
use super::tick::TickInput;
use crate::consts::*;
use crate::from_angle;

/// Dart outline in local space, nose along +x
pub const SHIP_OUTLINE: [Vec2; 4] = [
    Vec2::new(15.0, 0.0),
    Vec2::new(-10.0, -8.0),
    Vec2::new(-5.0, 0.0),
    Vec2::new(-10.0, 8.0),
];

/// Exhaust puff behind the ship (visual only)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TrailPoint {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Seconds remaining
    pub life: f32,
}

impl TrailPoint {
    /// Remaining life fraction, used for fade
    pub fn fade(&self) -> f32 {
        (self.life / THRUST_TRAIL_LIFE).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub body: Body,
    pub thrust_power: f32,
    /// radians per second
    pub rotation_speed: f32,
    pub max_speed: f32,
    pub thrusting: bool,
    pub invulnerable: bool,
    /// Remaining invulnerability (ms)
    pub invulnerability_ms: f32,
    /// Exhaust trail (newest first)
    pub trail: Vec<TrailPoint>,
}

impl Ship {
    /// New ship at `pos`, facing +x and invulnerable
    pub fn new(pos: Vec2) -> Self {
        let mut ship = Self {
            body: Body::new(pos, Vec2::ZERO, SHIP_RADIUS),
            thrust_power: SHIP_THRUST_POWER,
            rotation_speed: SHIP_ROTATION_SPEED,
            max_speed: SHIP_MAX_SPEED,
            thrusting: false,
            invulnerable: false,
            invulnerability_ms: 0.0,
            trail: Vec::with_capacity(THRUST_TRAIL_LENGTH + 1),
        };
        ship.make_invulnerable();
        ship
    }

    pub fn make_invulnerable(&mut self) {
        self.invulnerable = true;
        self.invulnerability_ms = SHIP_INVULNERABILITY_MS;
    }

    pub fn update<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        arena: Arena,
        input: &TickInput,
        rng: &mut R,
        events: &mut Vec<GameEvent>,
    ) {
        self.handle_input(dt, input, rng, events);

        self.body.vel = physics::apply_friction(self.body.vel, SHIP_FRICTION);
        self.body.vel = physics::limit_velocity(self.body.vel, self.max_speed);

        self.body.integrate(dt, arena);

        if self.invulnerable {
            self.invulnerability_ms -= dt * 1000.0;
            if self.invulnerability_ms <= 0.0 {
                self.invulnerable = false;
                self.invulnerability_ms = 0.0;
            }
        }

        self.update_trail(dt);
    }

    fn handle_input<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        input: &TickInput,
        rng: &mut R,
        events: &mut Vec<GameEvent>,
    ) {
        if input.left {
            self.body.rotation -= self.rotation_speed * dt;
        }
        if input.right {
            self.body.rotation += self.rotation_speed * dt;
        }

        self.thrusting = input.thrust;
        if self.thrusting {
            self.body.vel += from_angle(self.body.rotation, self.thrust_power * dt);
            self.record_trail(rng);

            if rng.random_bool(THRUST_SOUND_CHANCE) {
                events.push(GameEvent::Sound(SoundEvent::Thrust));
            }
        }
    }

    /// Emit one exhaust puff behind the hull
    fn record_trail<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let back = from_angle(self.body.rotation + PI, 1.0);
        let jitter = Vec2::new(
            (rng.random::<f32>() - 0.5) * 5.0,
            (rng.random::<f32>() - 0.5) * 5.0,
        );
        let point = TrailPoint {
            pos: self.body.pos + back * self.body.radius + jitter,
            vel: back * random_in_range(rng, 50.0, 100.0),
            life: THRUST_TRAIL_LIFE,
        };
        self.trail.insert(0, point);
        if self.trail.len() > THRUST_TRAIL_LENGTH {
            self.trail.pop();
        }
    }

    fn update_trail(&mut self, dt: f32) {
        for point in &mut self.trail {
            point.pos += point.vel * dt;
            point.life -= dt;
        }
        self.trail.retain(|p| p.life > 0.0);
    }

    /// Muzzle position: hull radius plus a small gap ahead along the heading
    pub fn nose(&self) -> Vec2 {
        self.body.pos + from_angle(self.body.rotation, self.body.radius + MUZZLE_OFFSET)
    }

    /// Fire a bullet that inherits the ship's momentum
    pub fn shoot(&self) -> Bullet {
        let vel = self.body.vel + from_angle(self.body.rotation, BULLET_SPEED);
        Bullet::player(self.nose(), vel)
    }

    /// Jump to a random point away from the edges.
    ///
    /// Returns true when the jump failed and destroyed the ship; the caller
    /// handles the loss. Otherwise the ship lands invulnerable.
    pub fn hyperspace<R: Rng + ?Sized>(&mut self, arena: Arena, rng: &mut R) -> bool {
        self.body.pos = Vec2::new(
            random_in_range(rng, HYPERSPACE_MARGIN, arena.width - HYPERSPACE_MARGIN),
            random_in_range(rng, HYPERSPACE_MARGIN, arena.height - HYPERSPACE_MARGIN),
        );
        self.body.vel = Vec2::ZERO;

        if rng.random_bool(HYPERSPACE_FAILURE_CHANCE) {
            self.destroy();
            return true;
        }

        self.make_invulnerable();
        false
    }

    /// Blink while invulnerable: hidden on odd 100 ms slots
    pub fn is_visible(&self, elapsed_ms: f64) -> bool {
        !self.invulnerable || (elapsed_ms / SHIP_BLINK_MS).floor() as u64 % 2 == 0
    }

    /// Non-owning snapshot handed to saucers each frame
    pub fn as_target(&self) -> Option<Target> {
        self.is_alive().then(|| Target {
            pos: self.body.pos,
            vel: self.body.vel,
        })
    }
}

impl Entity for Ship {
    fn kind(&self) -> EntityKind {
        EntityKind::Ship
    }

    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn shape(&self) -> Shape {
        Shape::Triangle
    }

    fn color(&self) -> u32 {
        COLOR_VECTOR_GREEN
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn ship_at_center() -> Ship {
        Ship::new(Arena::default().center())
    }

    #[test]
    fn test_new_ship_is_invulnerable() {
        let ship = ship_at_center();
        assert!(ship.invulnerable);
        assert_eq!(ship.invulnerability_ms, SHIP_INVULNERABILITY_MS);
        assert_eq!(ship.body.radius, SHIP_RADIUS);
    }

    #[test]
    fn test_invulnerability_counts_down() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut events = Vec::new();
        let mut ship = ship_at_center();
        let input = TickInput::default();
        for _ in 0..31 {
            ship.update(0.1, Arena::default(), &input, &mut rng, &mut events);
        }
        assert!(!ship.invulnerable);
    }

    #[test]
    fn test_thrust_accelerates_along_heading() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut events = Vec::new();
        let mut ship = ship_at_center();
        let input = TickInput {
            thrust: true,
            ..Default::default()
        };
        ship.update(0.1, Arena::default(), &input, &mut rng, &mut events);
        // 300 * 0.1 then one frame of friction
        assert!((ship.body.vel.x - 30.0 * SHIP_FRICTION).abs() < 1e-3);
        assert!(ship.body.vel.y.abs() < 1e-4);
        assert_eq!(ship.trail.len(), 1);
        assert!(ship.thrusting);
    }

    #[test]
    fn test_thrust_sound_rate() {
        let mut rng = Pcg32::seed_from_u64(6);
        let mut events = Vec::new();
        let mut ship = ship_at_center();
        let input = TickInput {
            thrust: true,
            ..Default::default()
        };
        for _ in 0..1000 {
            ship.update(1.0 / 60.0, Arena::default(), &input, &mut rng, &mut events);
        }
        let thrusts = events
            .iter()
            .filter(|e| **e == GameEvent::Sound(SoundEvent::Thrust))
            .count();
        assert_eq!(thrusts, events.len());
        assert!((60..=140).contains(&thrusts), "thrusts = {thrusts}");

        // no thrust, no sound
        events.clear();
        for _ in 0..100 {
            ship.update(1.0 / 60.0, Arena::default(), &TickInput::default(), &mut rng, &mut events);
        }
        assert!(events.is_empty());
    }

    #[test]
    fn test_rotation_keys() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut events = Vec::new();
        let mut ship = ship_at_center();
        let left = TickInput {
            left: true,
            ..Default::default()
        };
        ship.update(0.2, Arena::default(), &left, &mut rng, &mut events);
        assert!((ship.body.rotation + 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_speed_capped_even_without_thrust() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut events = Vec::new();
        let mut ship = ship_at_center();
        ship.body.vel = Vec2::new(1000.0, 0.0);
        ship.update(0.001, Arena::default(), &TickInput::default(), &mut rng, &mut events);
        assert!(ship.body.vel.length() <= SHIP_MAX_SPEED + 1e-3);
    }

    #[test]
    fn test_trail_is_bounded_ring() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut events = Vec::new();
        let mut ship = ship_at_center();
        let input = TickInput {
            thrust: true,
            ..Default::default()
        };
        for _ in 0..50 {
            ship.update(0.001, Arena::default(), &input, &mut rng, &mut events);
        }
        assert_eq!(ship.trail.len(), THRUST_TRAIL_LENGTH);
        // Trail points age out once thrust stops
        for _ in 0..5 {
            ship.update(0.1, Arena::default(), &TickInput::default(), &mut rng, &mut events);
        }
        assert!(ship.trail.is_empty());
    }

    #[test]
    fn test_shoot_inherits_momentum() {
        let mut ship = ship_at_center();
        ship.body.vel = Vec2::new(0.0, 40.0);
        let bullet = ship.shoot();
        assert!((bullet.body.vel - Vec2::new(BULLET_SPEED, 40.0)).length() < 1e-3);
        let expected_nose = ship.body.pos + Vec2::new(SHIP_RADIUS + MUZZLE_OFFSET, 0.0);
        assert!((bullet.body.pos - expected_nose).length() < 1e-3);
    }

    #[test]
    fn test_hyperspace_lands_inside_margin() {
        let mut rng = Pcg32::seed_from_u64(5);
        let arena = Arena::default();
        for _ in 0..100 {
            let mut ship = ship_at_center();
            ship.body.vel = Vec2::new(10.0, 10.0);
            let destroyed = ship.hyperspace(arena, &mut rng);
            let p = ship.body.pos;
            assert!(p.x >= HYPERSPACE_MARGIN && p.x <= arena.width - HYPERSPACE_MARGIN);
            assert!(p.y >= HYPERSPACE_MARGIN && p.y <= arena.height - HYPERSPACE_MARGIN);
            assert_eq!(ship.body.vel, Vec2::ZERO);
            assert_eq!(destroyed, !ship.is_alive());
            if !destroyed {
                assert!(ship.invulnerable);
            }
        }
    }

    #[test]
    fn test_hyperspace_failure_rate() {
        let mut rng = Pcg32::seed_from_u64(0x5EED);
        let arena = Arena::default();
        let failures = (0..1000)
            .filter(|_| ship_at_center().hyperspace(arena, &mut rng))
            .count();
        assert!((60..=140).contains(&failures), "failures = {failures}");
    }

    #[test]
    fn test_blink_only_while_invulnerable() {
        let mut ship = ship_at_center();
        assert!(ship.is_visible(50.0));
        assert!(!ship.is_visible(150.0));
        ship.invulnerable = false;
        assert!(ship.is_visible(150.0));
    }

    #[test]
    fn test_dead_ship_is_not_a_target() {
        let mut ship = ship_at_center();
        assert!(ship.as_target().is_some());
        ship.destroy();
        assert!(ship.as_target().is_none());
    }
}
