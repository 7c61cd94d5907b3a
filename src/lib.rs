//! Space Rocks - physics and collision core of a top-down arcade shooter
//!
//! Core modules:
//! - `sim`: Per-tick simulation (integration, boundaries, collisions, lifecycle)
//! - `settings`: Data-driven tuning loaded from JSON
//!
//! Rendering and raw input capture live outside this crate. They consume
//! [`sim::Snapshot`] and feed [`sim::TickInput`] respectively.

pub mod settings;
pub mod sim;

pub use settings::{Difficulty, Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants (defaults for [`Settings`])
pub mod consts {
    /// Arena dimensions (px)
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 700.0;

    /// Asteroids spawned at session start
    pub const STARTING_ASTEROIDS: u32 = 10;
    /// Asteroid cruise speed (px/s)
    pub const ASTEROID_SPEED: f32 = 100.0;

    /// Bounding boxes (px)
    pub const PLAYER_SIZE: f32 = 10.0;
    pub const ASTEROID_SIZE: f32 = 10.0;
    pub const BULLET_SIZE: f32 = 5.0;

    /// Default mass of every mover (kg)
    pub const DEFAULT_MASS: f32 = 1000.0;
    /// Player thruster force (N); 150 px/s² at the default mass
    pub const THRUSTER_FORCE: f32 = 150_000.0;
    /// Player turn rate (deg/s)
    pub const TURN_RATE: f32 = 300.0;

    /// Bullet speed relative to the shooter's speed
    pub const BULLET_SPEED_FACTOR: f32 = 1.5;
    /// Bullets never leave slower than this (px/s)
    pub const MIN_BULLET_SPEED: f32 = 300.0;
    /// Bullet lifetime (ms)
    pub const BULLET_LIFETIME_MS: f32 = 1000.0;

    /// Points per destroyed asteroid
    pub const ASTEROID_SCORE: u64 = 1000;

    /// Delta substituted when the host reports no elapsed time (first frame)
    pub const FALLBACK_DELTA_MS: f32 = 60.0;
    /// Moving-average fps window (samples)
    pub const FPS_WINDOW: usize = 100;

    /// Minimum distance between the player and a freshly spawned asteroid (px)
    pub const SPAWN_CLEARANCE: f32 = 80.0;
    /// Re-roll attempts before an asteroid is placed regardless of clearance
    pub const SPAWN_ATTEMPTS: u32 = 16;
}

/// Normalize an angle in degrees to [0, 360)
///
/// Equivalent to `((deg % 360) + 360) % 360`, but returns already-normalized
/// input unchanged so repeated application is exact.
#[inline]
pub fn normalize_angle(deg: f32) -> f32 {
    let rem = deg % 360.0;
    if rem == 0.0 {
        // Also folds -0.0 into 0.0
        return 0.0;
    }
    let wrapped = if rem < 0.0 { rem + 360.0 } else { rem };
    // A tiny negative remainder rounds up to exactly 360 in f32
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Convert (magnitude, heading in degrees) to a screen-space vector
///
/// Heading 0 points along +X. Screen Y grows downward, so positive headings
/// rotate toward the top of the screen (90° is straight up).
#[inline]
pub fn to_vector(magnitude: f32, heading_deg: f32) -> Vec2 {
    let theta = heading_deg.to_radians();
    Vec2::new(magnitude * theta.cos(), -magnitude * theta.sin())
}

/// Convert a screen-space vector to (magnitude, heading in degrees)
///
/// The zero vector maps to heading 0.
#[inline]
pub fn to_polar(v: Vec2) -> (f32, f32) {
    (v.length(), normalize_angle((-v.y).atan2(v.x).to_degrees()))
}
