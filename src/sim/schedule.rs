//! Time-ordered scheduled tasks
//!
//! The scene framework's "run action, then remove from parent" pattern is
//! modeled here as explicit tasks in queues ordered by completion tick:
//! timed linear translations with removal on completion, and delayed
//! one-shot removals. Every task is tied to an entity id; removing the
//! entity cancels its outstanding tasks.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::EntityId;

/// A linear translation from `from` to `to`, completing at `end_tick`
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Translation {
    pub entity: EntityId,
    pub from: Vec2,
    pub to: Vec2,
    pub start_tick: u64,
    pub end_tick: u64,
    /// Remove the entity from the world once the translation completes
    pub remove_on_complete: bool,
}

impl Translation {
    /// Interpolated position at `tick`, clamped to the endpoints
    pub fn position_at(&self, tick: u64) -> Vec2 {
        if tick <= self.start_tick {
            return self.from;
        }
        if tick >= self.end_tick {
            return self.to;
        }
        let t = (tick - self.start_tick) as f32 / (self.end_tick - self.start_tick) as f32;
        self.from.lerp(self.to, t)
    }
}

/// A delayed one-shot entity removal
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Removal {
    pub entity: EntityId,
    pub due_tick: u64,
}

/// Scheduled-task queues, processed once per simulation step
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scheduler {
    /// Ordered by `end_tick`
    translations: Vec<Translation>,
    /// Ordered by `due_tick`
    removals: Vec<Removal>,
}

impl Scheduler {
    pub fn schedule_translation(&mut self, translation: Translation) {
        let idx = self
            .translations
            .partition_point(|t| t.end_tick <= translation.end_tick);
        self.translations.insert(idx, translation);
    }

    pub fn schedule_removal(&mut self, entity: EntityId, due_tick: u64) {
        let idx = self.removals.partition_point(|r| r.due_tick <= due_tick);
        self.removals.insert(idx, Removal { entity, due_tick });
    }

    /// Drop every outstanding task tied to `entity`
    pub fn cancel(&mut self, entity: EntityId) {
        self.translations.retain(|t| t.entity != entity);
        self.removals.retain(|r| r.entity != entity);
    }

    /// Current interpolated positions of all translating entities
    pub fn positions_at(&self, tick: u64) -> impl Iterator<Item = (EntityId, Vec2)> + '_ {
        self.translations
            .iter()
            .map(move |t| (t.entity, t.position_at(tick)))
    }

    /// Pop translations that completed by `tick`; returns the entities
    /// flagged for removal on completion
    pub fn drain_completed(&mut self, tick: u64) -> Vec<EntityId> {
        let mut removed = Vec::new();
        self.translations.retain(|t| {
            if t.end_tick <= tick {
                if t.remove_on_complete {
                    removed.push(t.entity);
                }
                false
            } else {
                true
            }
        });
        removed
    }

    /// Pop delayed removals that are due by `tick`
    pub fn drain_due_removals(&mut self, tick: u64) -> Vec<EntityId> {
        let split = self.removals.partition_point(|r| r.due_tick <= tick);
        self.removals.drain(..split).map(|r| r.entity).collect()
    }

    pub fn is_idle(&self) -> bool {
        self.translations.is_empty() && self.removals.is_empty()
    }
}
