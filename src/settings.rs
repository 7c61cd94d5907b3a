//! Simulation settings and tuning
//!
//! Loaded from a JSON file by the host; every field has a default so partial
//! files are accepted.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Errors raised while loading or validating settings
#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    /// Settings file could not be read or written
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings file is not valid JSON for [`Settings`]
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field holds a value the simulation cannot run with
    #[error("Invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

/// Difficulty preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "norm" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Asteroids spawned at session start for this preset
    pub fn starting_asteroids(&self) -> u32 {
        match self {
            Difficulty::Easy => 6,
            Difficulty::Normal => STARTING_ASTEROIDS,
            Difficulty::Hard => 16,
        }
    }

    /// Asteroid speed multiplier (1.0 = default speed)
    pub fn asteroid_speed_scale(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.7,
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 1.4,
        }
    }
}

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Preset the counts/speeds below were derived from
    pub difficulty: Difficulty,
    /// Seed for spawn placement
    pub seed: u64,

    // === World ===
    pub world_width: f32,
    pub world_height: f32,
    /// Minimum player-to-asteroid distance at spawn (px)
    pub spawn_clearance: f32,

    // === Asteroids ===
    pub starting_asteroids: u32,
    /// Cruise speed (px/s)
    pub asteroid_speed: f32,
    pub asteroid_size: f32,

    // === Player ===
    pub player_size: f32,
    /// Mass of every mover (kg)
    pub mass: f32,
    /// Thruster force (N)
    pub thruster_force: f32,
    /// Turn rate (deg/s)
    pub turn_rate: f32,
    /// Velocity damping per second (0 = none)
    pub linear_damping: f32,

    // === Bullets ===
    pub bullet_size: f32,
    /// Bullet speed relative to the shooter's speed (>= 1)
    pub bullet_speed_factor: f32,
    /// Floor on bullet launch speed (px/s)
    pub min_bullet_speed: f32,
    /// Bullet lifetime (ms)
    pub bullet_lifetime_ms: f32,

    // === Timing ===
    /// Delta used when the host reports no elapsed time (ms)
    pub fallback_delta_ms: f32,
    /// Moving-average fps window (samples)
    pub fps_window: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            seed: 0x5eed_0001,

            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            spawn_clearance: SPAWN_CLEARANCE,

            starting_asteroids: STARTING_ASTEROIDS,
            asteroid_speed: ASTEROID_SPEED,
            asteroid_size: ASTEROID_SIZE,

            player_size: PLAYER_SIZE,
            mass: DEFAULT_MASS,
            thruster_force: THRUSTER_FORCE,
            turn_rate: TURN_RATE,
            linear_damping: 0.0,

            bullet_size: BULLET_SIZE,
            bullet_speed_factor: BULLET_SPEED_FACTOR,
            min_bullet_speed: MIN_BULLET_SPEED,
            bullet_lifetime_ms: BULLET_LIFETIME_MS,

            fallback_delta_ms: FALLBACK_DELTA_MS,
            fps_window: FPS_WINDOW,
        }
    }
}

impl Settings {
    /// Create settings from a difficulty preset (applies preset defaults)
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        let mut settings = Self::default();
        settings.apply_difficulty(difficulty);
        settings
    }

    /// Apply a difficulty preset (updates asteroid count and speed)
    pub fn apply_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.starting_asteroids = difficulty.starting_asteroids();
        self.asteroid_speed = ASTEROID_SPEED * difficulty.asteroid_speed_scale();
    }

    /// Player acceleration under full thrust (px/s²)
    pub fn thrust_acceleration(&self) -> f32 {
        self.thruster_force / self.mass
    }

    /// Check that the settings describe a runnable simulation
    pub fn validate(&self) -> Result<(), SettingsError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> SettingsError {
            SettingsError::Invalid {
                field,
                reason: reason.into(),
            }
        }

        let positive = [
            ("world_width", self.world_width),
            ("world_height", self.world_height),
            ("asteroid_size", self.asteroid_size),
            ("player_size", self.player_size),
            ("bullet_size", self.bullet_size),
            ("mass", self.mass),
            ("min_bullet_speed", self.min_bullet_speed),
            ("bullet_lifetime_ms", self.bullet_lifetime_ms),
            ("fallback_delta_ms", self.fallback_delta_ms),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(field, format!("must be positive, got {value}")));
            }
        }

        let non_negative = [
            ("spawn_clearance", self.spawn_clearance),
            ("asteroid_speed", self.asteroid_speed),
            ("thruster_force", self.thruster_force),
            ("turn_rate", self.turn_rate),
            ("linear_damping", self.linear_damping),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(invalid(field, format!("must be non-negative, got {value}")));
            }
        }

        if !(self.bullet_speed_factor.is_finite() && self.bullet_speed_factor >= 1.0) {
            return Err(invalid(
                "bullet_speed_factor",
                "must be at least 1.0 so bullets outrun their shooter",
            ));
        }
        if self.bullet_size >= self.world_width || self.bullet_size >= self.world_height {
            return Err(invalid("bullet_size", "must be smaller than the world"));
        }
        if self.fps_window == 0 {
            return Err(invalid("fps_window", "must hold at least one sample"));
        }
        Ok(())
    }

    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings from a JSON file, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!("Using default settings ({}: {err})", path.display());
                Self::default()
            }
        }
    }

    /// Save settings to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Settings saved");
        Ok(())
    }
}
