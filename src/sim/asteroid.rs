//! Asteroids: size tiers, jagged silhouettes, splitting and field spawns

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;
use std::str::FromStr;

use super::draw::Shape;
use super::entity::{Body, Entity, EntityKind};
use super::physics::{Arena, random_angle, random_in_range};
use crate::consts::*;
use crate::error::SimError;
use crate::from_angle;

/// Asteroid size tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AsteroidSize {
    Large,
    Medium,
    Small,
}

impl AsteroidSize {
    pub fn radius(self) -> f32 {
        match self {
            AsteroidSize::Large => 40.0,
            AsteroidSize::Medium => 25.0,
            AsteroidSize::Small => 15.0,
        }
    }

    pub fn points(self) -> u64 {
        match self {
            AsteroidSize::Large => 20,
            AsteroidSize::Medium => 50,
            AsteroidSize::Small => 100,
        }
    }

    /// Speed range (min, max) in units per second
    pub fn speed_range(self) -> (f32, f32) {
        match self {
            AsteroidSize::Large => (20.0, 50.0),
            AsteroidSize::Medium => (50.0, 80.0),
            AsteroidSize::Small => (80.0, 120.0),
        }
    }

    pub fn vertex_count(self) -> usize {
        match self {
            AsteroidSize::Large => 12,
            AsteroidSize::Medium => 10,
            AsteroidSize::Small => 8,
        }
    }

    /// Tier produced by splitting; small is terminal
    pub fn smaller(self) -> Option<AsteroidSize> {
        match self {
            AsteroidSize::Large => Some(AsteroidSize::Medium),
            AsteroidSize::Medium => Some(AsteroidSize::Small),
            AsteroidSize::Small => None,
        }
    }
}

impl FromStr for AsteroidSize {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "large" => Ok(AsteroidSize::Large),
            "medium" => Ok(AsteroidSize::Medium),
            "small" => Ok(AsteroidSize::Small),
            other => Err(SimError::UnknownAsteroidSize(other.to_string())),
        }
    }
}

/// A drifting, spinning rock
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub body: Body,
    pub size: AsteroidSize,
    /// Spin in radians per second, fixed at creation
    pub rotation_speed: f32,
    /// Silhouette offsets from the centre, generated once
    pub vertices: Vec<Vec2>,
}

impl Asteroid {
    /// Create an asteroid with a random heading, tier speed and outline
    pub fn new<R: Rng + ?Sized>(pos: Vec2, size: AsteroidSize, rng: &mut R) -> Self {
        let radius = size.radius();
        let (min_speed, max_speed) = size.speed_range();
        let speed = random_in_range(rng, min_speed, max_speed);
        let vel = from_angle(random_angle(rng), speed);

        let count = size.vertex_count();
        let vertices = (0..count)
            .map(|i| {
                let angle = (i as f32 / count as f32) * TAU;
                let jitter =
                    random_in_range(rng, 1.0 - ASTEROID_JAGGEDNESS, 1.0 + ASTEROID_JAGGEDNESS);
                from_angle(angle, radius * jitter)
            })
            .collect();

        let rotation_speed = random_in_range(rng, -ASTEROID_MAX_SPIN, ASTEROID_MAX_SPIN);

        Self {
            body: Body::new(pos, vel, radius),
            size,
            rotation_speed,
            vertices,
        }
    }

    pub fn points(&self) -> u64 {
        self.size.points()
    }

    pub fn update(&mut self, dt: f32, arena: Arena) {
        self.body.integrate(dt, arena);
        self.body.rotation += self.rotation_speed * dt;
    }

    /// Break into two fragments of the next tier; small asteroids yield none.
    ///
    /// Each fragment sits half the parent radius out along a fresh random
    /// heading and moves along that heading at 1.2-1.8x its own rolled speed.
    pub fn split<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Asteroid> {
        let Some(next) = self.size.smaller() else {
            return Vec::new();
        };

        (0..FRAGMENTS_PER_SPLIT)
            .map(|_| {
                let mut fragment = Asteroid::new(self.body.pos, next, rng);
                let angle = random_angle(rng);
                let speed = fragment.body.vel.length()
                    * random_in_range(rng, FRAGMENT_SPEED_MIN, FRAGMENT_SPEED_MAX);
                fragment.body.vel = from_angle(angle, speed);
                fragment.body.pos = self.body.pos + from_angle(angle, self.body.radius * 0.5);
                fragment
            })
            .collect()
    }

    /// Large asteroid at a uniform position outside the centre safe zone
    pub fn spawn_random<R: Rng + ?Sized>(arena: Arena, rng: &mut R) -> Self {
        let center = arena.center();
        let pos = loop {
            let candidate = Vec2::new(
                random_in_range(rng, 0.0, arena.width),
                random_in_range(rng, 0.0, arena.height),
            );
            let in_safe_zone = (candidate.x - center.x).abs() < ASTEROID_SAFE_ZONE
                && (candidate.y - center.y).abs() < ASTEROID_SAFE_ZONE;
            if !in_safe_zone {
                break candidate;
            }
        };
        Asteroid::new(pos, AsteroidSize::Large, rng)
    }

    /// Large asteroid just outside a uniformly chosen edge
    pub fn spawn_from_edge<R: Rng + ?Sized>(arena: Arena, rng: &mut R) -> Self {
        let pos = match rng.random_range(0..4u8) {
            0 => Vec2::new(random_in_range(rng, 0.0, arena.width), -ASTEROID_EDGE_OFFSET),
            1 => Vec2::new(
                arena.width + ASTEROID_EDGE_OFFSET,
                random_in_range(rng, 0.0, arena.height),
            ),
            2 => Vec2::new(
                random_in_range(rng, 0.0, arena.width),
                arena.height + ASTEROID_EDGE_OFFSET,
            ),
            _ => Vec2::new(-ASTEROID_EDGE_OFFSET, random_in_range(rng, 0.0, arena.height)),
        };
        Asteroid::new(pos, AsteroidSize::Large, rng)
    }
}

impl Entity for Asteroid {
    fn kind(&self) -> EntityKind {
        EntityKind::Asteroid
    }

    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn shape(&self) -> Shape {
        Shape::Polygon(self.vertices.clone())
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

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(0xA57E)
    }

    #[test]
    fn test_tier_table() {
        assert_eq!(AsteroidSize::Large.radius(), 40.0);
        assert_eq!(AsteroidSize::Medium.points(), 50);
        assert_eq!(AsteroidSize::Small.vertex_count(), 8);
        assert_eq!(AsteroidSize::Small.smaller(), None);
    }

    #[test]
    fn test_parse_rejects_unknown_size() {
        assert_eq!("medium".parse::<AsteroidSize>().unwrap(), AsteroidSize::Medium);
        let err = "gigantic".parse::<AsteroidSize>().unwrap_err();
        assert!(matches!(err, SimError::UnknownAsteroidSize(ref s) if s == "gigantic"));
    }

    #[test]
    fn test_outline_is_jagged_within_bounds() {
        let mut rng = rng();
        for size in [AsteroidSize::Large, AsteroidSize::Medium, AsteroidSize::Small] {
            let asteroid = Asteroid::new(Vec2::ZERO, size, &mut rng);
            assert_eq!(asteroid.vertices.len(), size.vertex_count());
            for v in &asteroid.vertices {
                let d = v.length();
                assert!(d >= size.radius() * 0.7 - 1e-3 && d <= size.radius() * 1.3 + 1e-3);
            }
            let speed = asteroid.body.vel.length();
            let (lo, hi) = size.speed_range();
            assert!(speed >= lo - 1e-3 && speed <= hi + 1e-3);
            assert!(asteroid.rotation_speed.abs() <= ASTEROID_MAX_SPIN);
        }
    }

    #[test]
    fn test_split_cascade() {
        let mut rng = rng();
        let large = Asteroid::new(Vec2::new(300.0, 300.0), AsteroidSize::Large, &mut rng);

        let mediums = large.split(&mut rng);
        assert_eq!(mediums.len(), 2);
        assert!(mediums.iter().all(|a| a.size == AsteroidSize::Medium));

        let smalls: Vec<_> = mediums.iter().flat_map(|m| m.split(&mut rng)).collect();
        assert_eq!(smalls.len(), 4);
        assert!(smalls.iter().all(|a| a.size == AsteroidSize::Small));

        let dust: Vec<_> = smalls.iter().flat_map(|s| s.split(&mut rng)).collect();
        assert!(dust.is_empty());
    }

    #[test]
    fn test_fragments_offset_and_faster() {
        let mut rng = rng();
        let parent = Asteroid::new(Vec2::new(300.0, 300.0), AsteroidSize::Large, &mut rng);
        for fragment in parent.split(&mut rng) {
            let offset = fragment.body.pos.distance(parent.body.pos);
            assert!((offset - 20.0).abs() < 1e-3);
            let speed = fragment.body.vel.length();
            assert!(speed >= 50.0 * 1.2 - 1e-3 && speed <= 80.0 * 1.8 + 1e-3);
            // fragment travels along its offset direction
            let dir = (fragment.body.pos - parent.body.pos).normalize();
            assert!(dir.dot(fragment.body.vel.normalize()) > 0.999);
        }
    }

    #[test]
    fn test_random_spawn_avoids_safe_zone() {
        let mut rng = rng();
        let arena = Arena::default();
        let center = arena.center();
        for _ in 0..200 {
            let a = Asteroid::spawn_random(arena, &mut rng);
            assert_eq!(a.size, AsteroidSize::Large);
            let inside = (a.body.pos.x - center.x).abs() < ASTEROID_SAFE_ZONE
                && (a.body.pos.y - center.y).abs() < ASTEROID_SAFE_ZONE;
            assert!(!inside);
        }
    }

    #[test]
    fn test_edge_spawn_is_outside_arena() {
        let mut rng = rng();
        let arena = Arena::default();
        for _ in 0..100 {
            let p = Asteroid::spawn_from_edge(arena, &mut rng).body.pos;
            let outside = p.x < 0.0 || p.x > arena.width || p.y < 0.0 || p.y > arena.height;
            assert!(outside);
        }
    }

    #[test]
    fn test_update_spins() {
        let mut rng = rng();
        let mut a = Asteroid::new(Vec2::new(100.0, 100.0), AsteroidSize::Small, &mut rng);
        a.rotation_speed = 1.0;
        a.update(0.5, Arena::default());
        assert!((a.body.rotation - 0.5).abs() < 1e-6);
    }
}
