//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod contact;
pub mod schedule;
pub mod state;
pub mod tick;

pub use contact::{CATEGORY_ALIEN, CATEGORY_TORPEDO, Contact, ContactBody, TorpedoHit, resolve_contact};
pub use schedule::{Scheduler, Translation};
pub use state::{
    Alien, AlienKind, EntityId, EntityKind, Explosion, GameEvent, GameState, Player, Score,
    TiltFilter, Torpedo,
};
pub use tick::{TickInput, tick};
