//! Visual-only particles: explosion sparks and falling debris
//!
//! Particles never take part in gameplay collisions.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::draw::Shape;
use super::entity::{Body, Entity, EntityKind, retain_alive};
use super::physics::{Arena, random_angle, random_in_range};
use crate::consts::DEBRIS_COLORS;
use crate::from_angle;

/// Downward pull applied to debris
pub const DEBRIS_GRAVITY: Vec2 = Vec2::new(0.0, 50.0);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub body: Body,
    pub color: u32,
    /// Total lifetime in seconds
    pub lifetime: f32,
    pub age: f32,
    pub initial_radius: f32,
    pub gravity: Vec2,
}

impl Particle {
    pub fn new<R: Rng + ?Sized>(pos: Vec2, vel: Vec2, color: u32, lifetime: f32, rng: &mut R) -> Self {
        let radius = random_in_range(rng, 1.0, 3.0);
        Self {
            body: Body::new(pos, vel, radius),
            color,
            lifetime,
            age: 0.0,
            initial_radius: radius,
            gravity: Vec2::ZERO,
        }
    }

    /// Accelerate, integrate, then shrink linearly towards zero
    pub fn update(&mut self, dt: f32, arena: Arena) {
        self.body.vel += self.gravity * dt;
        self.body.integrate(dt, arena);

        self.age += dt;
        let life_fraction = self.age / self.lifetime;
        self.body.radius = self.initial_radius * (1.0 - life_fraction);

        if self.age >= self.lifetime || self.body.radius <= 0.0 {
            self.destroy();
        }
    }
}

impl Entity for Particle {
    fn kind(&self) -> EntityKind {
        EntityKind::Particle
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
        self.color
    }

    fn alpha(&self) -> f32 {
        (1.0 - self.age / self.lifetime).max(0.0)
    }
}

/// Flat pool of particles with a live-count cap
#[derive(Debug, Clone, Default)]
pub struct ParticleSystem {
    pub particles: Vec<Particle>,
    /// Bursts are truncated once this many particles are alive
    pub max_particles: usize,
}

impl ParticleSystem {
    pub fn new(max_particles: usize) -> Self {
        Self {
            particles: Vec::with_capacity(max_particles.min(256)),
            max_particles,
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn update(&mut self, dt: f32, arena: Arena) {
        for particle in &mut self.particles {
            particle.update(dt, arena);
        }
        retain_alive(&mut self.particles);
    }

    fn push(&mut self, particle: Particle) {
        if self.particles.len() < self.max_particles {
            self.particles.push(particle);
        }
    }

    /// Radial burst of sparks
    pub fn create_explosion<R: Rng + ?Sized>(&mut self, pos: Vec2, color: u32, count: usize, rng: &mut R) {
        for _ in 0..count {
            let vel = from_angle(random_angle(rng), random_in_range(rng, 50.0, 200.0));
            let lifetime = random_in_range(rng, 0.5, 1.5);
            let particle = Particle::new(pos, vel, color, lifetime, rng);
            self.push(particle);
        }
    }

    /// Slower grey fragments that fall under gravity
    pub fn create_debris<R: Rng + ?Sized>(&mut self, pos: Vec2, count: usize, rng: &mut R) {
        for _ in 0..count {
            let vel = from_angle(random_angle(rng), random_in_range(rng, 30.0, 100.0));
            let lifetime = random_in_range(rng, 1.0, 2.0);
            let color = DEBRIS_COLORS[rng.random_range(0..DEBRIS_COLORS.len())];
            let mut particle = Particle::new(pos, vel, color, lifetime, rng);
            particle.gravity = DEBRIS_GRAVITY;
            self.push(particle);
        }
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_particle_shrinks_then_dies() {
        let mut rng = Pcg32::seed_from_u64(21);
        let arena = Arena::default();
        let mut p = Particle::new(Vec2::new(100.0, 100.0), Vec2::ZERO, 0xffffff, 1.0, &mut rng);
        let start = p.body.radius;
        p.update(0.5, arena);
        assert!((p.body.radius - start * 0.5).abs() < 1e-4);
        assert!((p.alpha() - 0.5).abs() < 1e-4);
        assert!(p.is_alive());
        p.update(0.5, arena);
        assert!(!p.is_alive());
    }

    #[test]
    fn test_debris_falls() {
        let mut rng = Pcg32::seed_from_u64(22);
        let mut system = ParticleSystem::new(100);
        system.create_debris(Vec2::new(400.0, 300.0), 5, &mut rng);
        assert_eq!(system.len(), 5);
        for p in &system.particles {
            assert_eq!(p.gravity, DEBRIS_GRAVITY);
            assert!(DEBRIS_COLORS.contains(&p.color));
        }
        let before: Vec<f32> = system.particles.iter().map(|p| p.body.vel.y).collect();
        system.update(0.1, Arena::default());
        for (p, vy) in system.particles.iter().zip(before) {
            assert!((p.body.vel.y - (vy + 5.0)).abs() < 1e-3);
        }
    }

    #[test]
    fn test_explosion_expires_within_max_lifetime() {
        let mut rng = Pcg32::seed_from_u64(23);
        let mut system = ParticleSystem::new(100);
        system.create_explosion(Vec2::new(400.0, 300.0), 0x00ff00, 10, &mut rng);
        assert_eq!(system.len(), 10);
        for _ in 0..16 {
            system.update(0.1, Arena::default());
        }
        assert!(system.is_empty());
    }

    #[test]
    fn test_cap_truncates_bursts() {
        let mut rng = Pcg32::seed_from_u64(24);
        let mut system = ParticleSystem::new(6);
        system.create_explosion(Vec2::ZERO, 0xffffff, 4, &mut rng);
        system.create_debris(Vec2::ZERO, 4, &mut rng);
        assert_eq!(system.len(), 6);

        let mut disabled = ParticleSystem::new(0);
        disabled.create_explosion(Vec2::ZERO, 0xffffff, 4, &mut rng);
        assert!(disabled.is_empty());
    }
}
