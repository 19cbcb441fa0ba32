//! Game state and core simulation types
//!
//! All state that must be persisted for snapshots/determinism lives here.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::contact::{CATEGORY_ALIEN, CATEGORY_TORPEDO};
use super::schedule::{Scheduler, Translation};
use crate::consts::*;

/// Entity identifier, unique within one `GameState`
pub type EntityId = u32;

/// The player ship always has this id; spawned entities count up from 1
pub const PLAYER_ID: EntityId = 0;

/// What an entity id refers to, resolved by lookup (never by downcast)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Player,
    Alien,
    Torpedo,
    Explosion,
}

/// Alien sprite variants. Appearance only - behavior is identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlienKind {
    Alien,
    Alien2,
    Alien3,
}

impl AlienKind {
    pub const ALL: [AlienKind; 3] = [AlienKind::Alien, AlienKind::Alien2, AlienKind::Alien3];

    /// Sprite asset name for the rendering layer
    pub fn sprite_name(self) -> &'static str {
        match self {
            AlienKind::Alien => "alien",
            AlienKind::Alien2 => "alien2",
            AlienKind::Alien3 => "alien3",
        }
    }
}

/// The player ship
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Player {
    pub id: EntityId,
    pub pos: Vec2,
    pub size: Vec2,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            id: PLAYER_ID,
            pos: Vec2::new(
                SCREEN_WIDTH / 2.0,
                PLAYER_HEIGHT / 2.0 + PLAYER_BOTTOM_MARGIN,
            ),
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
        }
    }
}

/// A descending alien
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Alien {
    pub id: EntityId,
    pub kind: AlienKind,
    pub pos: Vec2,
    pub size: Vec2,
    /// Collision category bitmask
    pub category: u32,
    /// Categories this body reports contacts against
    pub contact_mask: u32,
    /// Categories this body physically collides with (0 = detection only)
    pub collision_mask: u32,
}

/// An upward-bound torpedo
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Torpedo {
    pub id: EntityId,
    pub pos: Vec2,
    /// Position at the previous step, for swept contact tests
    pub prev_pos: Vec2,
    pub radius: f32,
    pub category: u32,
    pub contact_mask: u32,
    pub collision_mask: u32,
    /// Continuous (swept) detection, so a fast torpedo cannot tunnel
    /// through a thin target in one step
    pub precise: bool,
}

/// A lingering one-shot explosion effect
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Explosion {
    pub id: EntityId,
    pub pos: Vec2,
}

/// Exponentially smoothed horizontal tilt signal
///
/// Updated on the sensor cadence; a missing sample leaves the previous
/// value in place (it is never reset to zero).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TiltFilter {
    pub smoothed: f32,
}

impl TiltFilter {
    /// Blend a raw sample into the smoothed value:
    /// `new = raw * 0.75 + old * 0.25`
    pub fn sample(&mut self, raw: f32) {
        self.smoothed = raw * TILT_SMOOTHING + self.smoothed * (1.0 - TILT_SMOOTHING);
    }
}

/// Running score with its display label
///
/// Every mutation rewrites the label, so the HUD layer can show it as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Score {
    value: u32,
    label: String,
}

impl Default for Score {
    fn default() -> Self {
        Self {
            value: 0,
            label: "Score: 0".to_string(),
        }
    }
}

impl Score {
    pub fn add(&mut self, points: u32) {
        self.value += points;
        self.label = format!("Score: {}", self.value);
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Things that happened during the last tick, drained by the embedding
/// layer to drive audio cues, particle effects and the HUD
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    AlienSpawned { id: EntityId, kind: AlienKind, x: f32 },
    TorpedoFired { id: EntityId },
    AlienDestroyed { kind: AlienKind, pos: Vec2 },
    AlienEscaped { id: EntityId },
    TorpedoExpired { id: EntityId },
    ScoreChanged { value: u32 },
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Seeded RNG (spawn positions and variants)
    pub rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    pub tilt: TiltFilter,
    pub score: Score,
    /// Active aliens (sorted by id for determinism)
    pub aliens: Vec<Alien>,
    /// Active torpedoes (sorted by id for determinism)
    pub torpedoes: Vec<Torpedo>,
    /// Lingering explosion effects
    pub explosions: Vec<Explosion>,
    /// Scheduled translations and delayed removals
    pub scheduler: Scheduler,
    /// Torpedo/alien pairs that were already overlapping last step, so an
    /// overlap episode is reported once at onset
    pub overlaps: Vec<(EntityId, EntityId)>,
    /// Per-tick event buffer (not part of the persistent state)
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    next_id: EntityId,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            player: Player::default(),
            tilt: TiltFilter::default(),
            score: Score::default(),
            aliens: Vec::new(),
            torpedoes: Vec::new(),
            explosions: Vec::new(),
            scheduler: Scheduler::default(),
            overlaps: Vec::new(),
            events: Vec::new(),
            next_id: PLAYER_ID + 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Resolve what an id refers to
    pub fn kind_of(&self, id: EntityId) -> Option<EntityKind> {
        if id == self.player.id {
            Some(EntityKind::Player)
        } else if self.aliens.iter().any(|a| a.id == id) {
            Some(EntityKind::Alien)
        } else if self.torpedoes.iter().any(|t| t.id == id) {
            Some(EntityKind::Torpedo)
        } else if self.explosions.iter().any(|e| e.id == id) {
            Some(EntityKind::Explosion)
        } else {
            None
        }
    }

    pub fn alien(&self, id: EntityId) -> Option<&Alien> {
        self.aliens.iter().find(|a| a.id == id)
    }

    pub fn torpedo(&self, id: EntityId) -> Option<&Torpedo> {
        self.torpedoes.iter().find(|t| t.id == id)
    }

    /// Move an entity to the position its scheduled translation dictates
    pub fn set_position(&mut self, id: EntityId, pos: Vec2) {
        if let Some(alien) = self.aliens.iter_mut().find(|a| a.id == id) {
            alien.pos = pos;
        } else if let Some(torpedo) = self.torpedoes.iter_mut().find(|t| t.id == id) {
            torpedo.prev_pos = torpedo.pos;
            torpedo.pos = pos;
        }
    }

    /// Spawn an alien of `kind` at horizontal position `x`, just above the
    /// top of the screen, and schedule its descent past the bottom edge
    pub fn spawn_alien(&mut self, kind: AlienKind, x: f32) -> EntityId {
        let id = self.next_entity_id();
        let from = Vec2::new(x, SCREEN_HEIGHT + ALIEN_HEIGHT);
        let to = Vec2::new(x, -ALIEN_HEIGHT);

        self.aliens.push(Alien {
            id,
            kind,
            pos: from,
            size: Vec2::new(ALIEN_WIDTH, ALIEN_HEIGHT),
            category: CATEGORY_ALIEN,
            contact_mask: CATEGORY_TORPEDO,
            collision_mask: 0,
        });
        self.scheduler.schedule_translation(Translation {
            entity: id,
            from,
            to,
            start_tick: self.time_ticks,
            end_tick: self.time_ticks + ALIEN_FALL_TICKS,
            remove_on_complete: true,
        });
        self.events.push(GameEvent::AlienSpawned { id, kind, x });
        id
    }

    /// Fire a torpedo from just above the player and schedule its flight
    /// past the top of the screen
    pub fn fire_torpedo(&mut self) -> EntityId {
        let id = self.next_entity_id();
        let from = self.player.pos + Vec2::new(0.0, MUZZLE_OFFSET_Y);
        let to = Vec2::new(self.player.pos.x, SCREEN_HEIGHT + TORPEDO_EXIT_MARGIN);

        self.torpedoes.push(Torpedo {
            id,
            pos: from,
            prev_pos: from,
            radius: TORPEDO_RADIUS,
            category: CATEGORY_TORPEDO,
            contact_mask: CATEGORY_ALIEN,
            collision_mask: 0,
            precise: true,
        });
        self.scheduler.schedule_translation(Translation {
            entity: id,
            from,
            to,
            start_tick: self.time_ticks,
            end_tick: self.time_ticks + TORPEDO_FLIGHT_TICKS,
            remove_on_complete: true,
        });
        self.events.push(GameEvent::TorpedoFired { id });
        id
    }

    /// Spawn a one-shot explosion effect
    pub fn spawn_explosion(&mut self, pos: Vec2) -> EntityId {
        let id = self.next_entity_id();
        self.explosions.push(Explosion { id, pos });
        id
    }

    /// Remove an alien and cancel its scheduled tasks. Idempotent.
    pub fn remove_alien(&mut self, id: EntityId) {
        self.aliens.retain(|a| a.id != id);
        self.scheduler.cancel(id);
    }

    /// Remove a torpedo and cancel its scheduled tasks. Idempotent.
    pub fn remove_torpedo(&mut self, id: EntityId) {
        self.torpedoes.retain(|t| t.id != id);
        self.scheduler.cancel(id);
    }

    /// Remove an explosion effect. Idempotent.
    pub fn remove_explosion(&mut self, id: EntityId) {
        self.explosions.retain(|e| e.id != id);
        self.scheduler.cancel(id);
    }
}
