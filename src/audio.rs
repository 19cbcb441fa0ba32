//! Audio cue mapping
//!
//! The simulation never plays sound; it emits `GameEvent`s. This module
//! names the cue each event maps to, using the original asset names, so
//! the playback layer can trigger them verbatim.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Torpedo leaves the muzzle
    TorpedoFire,
    /// Alien destroyed
    Explosion,
}

impl SoundEffect {
    /// Asset file name for the playback layer
    pub fn file_name(self) -> &'static str {
        match self {
            SoundEffect::TorpedoFire => "torpedo.mp3",
            SoundEffect::Explosion => "explosion.mp3",
        }
    }
}

/// The cue a game event triggers, if any
pub fn cue_for(event: &GameEvent) -> Option<SoundEffect> {
    match event {
        GameEvent::TorpedoFired { .. } => Some(SoundEffect::TorpedoFire),
        GameEvent::AlienDestroyed { .. } => Some(SoundEffect::Explosion),
        _ => None,
    }
}
