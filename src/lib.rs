//! Alien Storm - a tilt-and-shoot arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (input filtering, spawning, contacts, scoring)
//! - `audio`: Sound cue names for the playback layer
//!
//! Rendering, particle assets, audio playback and windowing belong to the
//! embedding scene framework. The simulation never calls out to them; it
//! surfaces everything they need as data (entity positions, `GameEvent`s,
//! the score label).

pub mod audio;
pub mod sim;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Screen dimensions in points, origin at bottom-left
    pub const SCREEN_WIDTH: f32 = 320.0;
    pub const SCREEN_HEIGHT: f32 = 568.0;

    /// Player ship sprite size
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 32.0;
    /// Vertical margin between the bottom edge and the player ship
    pub const PLAYER_BOTTOM_MARGIN: f32 = 20.0;

    /// Alien sprite size (same for all variants)
    pub const ALIEN_WIDTH: f32 = 36.0;
    pub const ALIEN_HEIGHT: f32 = 30.0;

    /// Torpedo body radius (half the sprite width)
    pub const TORPEDO_RADIUS: f32 = 4.0;
    /// Torpedoes leave the muzzle slightly above the player
    pub const MUZZLE_OFFSET_Y: f32 = 5.0;
    /// Torpedoes overshoot the top of the screen by this much before expiry
    pub const TORPEDO_EXIT_MARGIN: f32 = 10.0;

    /// Tilt sensor sample cadence (0.1 s)
    pub const SENSOR_PERIOD_TICKS: u64 = 6;
    /// Alien spawn interval (0.75 s)
    pub const SPAWN_PERIOD_TICKS: u64 = 45;
    /// Alien descent from top to bottom (6 s)
    pub const ALIEN_FALL_TICKS: u64 = 360;
    /// Torpedo flight from muzzle to top (0.3 s)
    pub const TORPEDO_FLIGHT_TICKS: u64 = 18;
    /// Explosion effect linger before removal (2 s)
    pub const EXPLOSION_LINGER_TICKS: u64 = 120;

    /// Weight of the newest sample in the tilt smoothing filter
    pub const TILT_SMOOTHING: f32 = 0.75;
    /// Horizontal distance per step per unit of smoothed acceleration
    pub const TILT_GAIN: f32 = 50.0;

    /// Points per destroyed alien
    pub const HIT_SCORE: u32 = 5;
}
