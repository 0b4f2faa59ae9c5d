//! Draw descriptors for the render collaborator
//!
//! The simulation never draws. It describes each visible entity as a
//! position, rotation, radius, colour, opacity and shape; a renderer turns
//! these into pixels.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityKind};
use super::state::GameState;
use crate::consts::COLOR_EXHAUST;

/// Exhaust puffs are drawn at a fixed size
pub const EXHAUST_RADIUS: f32 = 2.0;

/// Silhouette to draw, in the entity's local frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Closed outline through these local-space points
    Polygon(Vec<Vec2>),
    Circle { filled: bool },
    /// Ship dart (see `ship::SHIP_OUTLINE`)
    Triangle,
    /// Saucer hull and dome
    EllipsePair,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawCommand {
    pub kind: EntityKind,
    pub pos: Vec2,
    pub rotation: f32,
    pub radius: f32,
    /// 0xRRGGBB
    pub color: u32,
    pub alpha: f32,
    pub shape: Shape,
}

impl DrawCommand {
    pub fn for_entity<E: Entity>(entity: &E) -> Self {
        let body = entity.body();
        Self {
            kind: entity.kind(),
            pos: body.pos,
            rotation: body.rotation,
            radius: body.radius,
            color: entity.color(),
            alpha: entity.alpha(),
            shape: entity.shape(),
        }
    }
}

fn push_live<E: Entity>(out: &mut Vec<DrawCommand>, items: &[E]) {
    out.extend(items.iter().filter(|e| e.is_alive()).map(DrawCommand::for_entity));
}

/// Everything visible this frame, in draw order
pub fn draw_list(state: &GameState) -> Vec<DrawCommand> {
    let mut out = Vec::with_capacity(
        state.asteroids.len()
            + state.bullets.len()
            + state.saucers.len()
            + state.saucer_bullets.len()
            + state.particles.len()
            + 24,
    );

    if let Some(ship) = state.ship.as_ref().filter(|s| s.is_alive()) {
        if ship.is_visible(state.elapsed_ms) {
            out.push(DrawCommand::for_entity(ship));
        }
        out.extend(ship.trail.iter().map(|p| DrawCommand {
            kind: EntityKind::Exhaust,
            pos: p.pos,
            rotation: 0.0,
            radius: EXHAUST_RADIUS,
            color: COLOR_EXHAUST,
            alpha: p.fade(),
            shape: Shape::Circle { filled: true },
        }));
    }

    push_live(&mut out, &state.asteroids);
    push_live(&mut out, &state.bullets);
    push_live(&mut out, &state.saucers);
    push_live(&mut out, &state.saucer_bullets);
    push_live(&mut out, &state.particles.particles);

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_draws_nothing() {
        let state = GameState::new(41);
        assert!(draw_list(&state).is_empty());
    }

    #[test]
    fn test_playing_draws_ship_and_field() {
        let mut state = GameState::new(42);
        state.start_game();
        let list = draw_list(&state);
        assert_eq!(list.iter().filter(|c| c.kind == EntityKind::Ship).count(), 1);
        let rocks: Vec<_> = list.iter().filter(|c| c.kind == EntityKind::Asteroid).collect();
        assert_eq!(rocks.len(), state.asteroids.len());
        assert!(rocks.iter().all(|c| matches!(c.shape, Shape::Polygon(ref v) if v.len() == 12)));
    }

    #[test]
    fn test_blinking_ship_is_hidden_on_odd_slots() {
        let mut state = GameState::new(43);
        state.start_game();
        state.elapsed_ms = 150.0;
        let list = draw_list(&state);
        assert!(list.iter().all(|c| c.kind != EntityKind::Ship));
    }

    #[test]
    fn test_absent_ship_is_not_drawn() {
        let mut state = GameState::new(44);
        state.start_game();
        state.destroy_ship();
        let list = draw_list(&state);
        assert!(list.iter().all(|c| c.kind != EntityKind::Ship));
        assert!(list.iter().any(|c| c.kind == EntityKind::Particle));
    }
}
