//! Deferred actions fired from the frame loop
//!
//! Delayed effects (ship-loss resolution, next wave) are queued with the
//! session clock time they become due and the session generation they
//! belong to. The tick pops due entries each frame; entries from an older
//! generation are dropped by the caller.

use serde::{Deserialize, Serialize};

/// What to do when an entry comes due
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeferredAction {
    /// Respawn the ship, or end the game when no lives remain
    ResolveShipLoss,
    /// Populate the next wave's asteroid field
    SpawnWave,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduledAction {
    /// Session clock time (ms) at which the action fires
    pub fire_at_ms: f64,
    /// Session generation stamp at scheduling time
    pub generation: u64,
    pub action: DeferredAction,
}

/// Pending actions, kept in scheduling order
#[derive(Debug, Clone, Default)]
pub struct Schedule {
    entries: Vec<ScheduledAction>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, now_ms: f64, delay_ms: f64, generation: u64, action: DeferredAction) {
        self.entries.push(ScheduledAction {
            fire_at_ms: now_ms + delay_ms,
            generation,
            action,
        });
    }

    /// Remove and return every entry due at `now_ms`, earliest first.
    /// Ties keep scheduling order.
    pub fn take_due(&mut self, now_ms: f64) -> Vec<ScheduledAction> {
        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.entries.drain(..).partition(|e| e.fire_at_ms <= now_ms);
        self.entries = pending;
        due.sort_by(|a, b| a.fire_at_ms.total_cmp(&b.fire_at_ms));
        due
    }

    pub fn is_pending(&self, action: DeferredAction) -> bool {
        self.entries.iter().any(|e| e.action == action)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
