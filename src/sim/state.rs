//! Game state and core simulation types
//!
//! Every entity is a [`Mover`]: shared kinematic data plus a tagged
//! [`MoverData`] variant for the kind-specific fields. Counts such as the
//! remaining asteroids are always derived from the [`Registry`].

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::input::KeyStates;
use super::registry::{EntityId, Registry};
use super::stats::FrameStats;
use crate::settings::{Settings, SettingsError};
use crate::{normalize_angle, to_polar, to_vector};

/// Entity kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoverKind {
    Player,
    Asteroid,
    Bullet,
}

/// World position and facing
///
/// The heading is kept in [0, 360) by routing every write through
/// [`Position::set_heading`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    heading: f32,
}

impl Position {
    pub fn new(x: f32, y: f32, heading: f32) -> Self {
        Self {
            x,
            y,
            heading: normalize_angle(heading),
        }
    }

    /// Facing in degrees, always in [0, 360)
    pub fn heading(&self) -> f32 {
        self.heading
    }

    pub fn set_heading(&mut self, heading: f32) {
        self.heading = normalize_angle(heading);
    }

    pub fn rotate(&mut self, delta_deg: f32) {
        self.set_heading(self.heading + delta_deg);
    }
}

/// Linear (px/s) and angular (deg/s) velocity
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Velocity {
    pub linear: Vec2,
    pub angular: f32,
}

impl Velocity {
    /// Velocity from speed and direction of travel
    pub fn from_polar(speed: f32, heading_deg: f32) -> Self {
        Self {
            linear: to_vector(speed, heading_deg),
            angular: 0.0,
        }
    }

    pub fn speed(&self) -> f32 {
        self.linear.length()
    }

    /// Direction of travel in degrees (0 when stationary)
    pub fn direction(&self) -> f32 {
        to_polar(self.linear).1
    }
}

/// Bounding box used for proximity tests and bounce clamping
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collider {
    pub width: f32,
    pub height: f32,
}

impl Collider {
    pub fn square(size: f32) -> Self {
        Self {
            width: size,
            height: size,
        }
    }
}

/// Player thruster
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thruster {
    /// Force in newtons
    pub force: f32,
    /// Firing this tick
    pub enabled: bool,
}

/// Player-only state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerData {
    pub thruster: Thruster,
    /// Key snapshot for the current tick
    pub keys: KeyStates,
    /// Fire was held last tick (one bullet per press)
    pub fire_latched: bool,
}

/// Bullet-only state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BulletData {
    pub remaining_lifetime_ms: f32,
}

/// Kind-specific data
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoverData {
    Player(PlayerData),
    Asteroid,
    Bullet(BulletData),
}

/// A moving entity
#[derive(Debug, Clone)]
pub struct Mover {
    id: EntityId,
    pub position: Position,
    pub velocity: Velocity,
    /// Mass in kilograms
    pub mass: f32,
    pub collider: Collider,
    pub data: MoverData,
}

impl Mover {
    pub fn player(id: EntityId, x: f32, y: f32, heading: f32, settings: &Settings) -> Self {
        Self {
            id,
            position: Position::new(x, y, heading),
            velocity: Velocity::default(),
            mass: settings.mass,
            collider: Collider::square(settings.player_size),
            data: MoverData::Player(PlayerData {
                thruster: Thruster {
                    force: settings.thruster_force,
                    enabled: false,
                },
                keys: KeyStates::default(),
                fire_latched: false,
            }),
        }
    }

    /// Asteroid drifting along `heading` at `speed`
    pub fn asteroid(
        id: EntityId,
        x: f32,
        y: f32,
        heading: f32,
        speed: f32,
        settings: &Settings,
    ) -> Self {
        Self {
            id,
            position: Position::new(x, y, heading),
            velocity: Velocity::from_polar(speed, heading),
            mass: settings.mass,
            collider: Collider::square(settings.asteroid_size),
            data: MoverData::Asteroid,
        }
    }

    pub fn bullet(
        id: EntityId,
        x: f32,
        y: f32,
        heading: f32,
        linear: Vec2,
        settings: &Settings,
    ) -> Self {
        Self {
            id,
            position: Position::new(x, y, heading),
            velocity: Velocity {
                linear,
                angular: 0.0,
            },
            mass: settings.mass,
            collider: Collider::square(settings.bullet_size),
            data: MoverData::Bullet(BulletData {
                remaining_lifetime_ms: settings.bullet_lifetime_ms,
            }),
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn kind(&self) -> MoverKind {
        match self.data {
            MoverData::Player(_) => MoverKind::Player,
            MoverData::Asteroid => MoverKind::Asteroid,
            MoverData::Bullet(_) => MoverKind::Bullet,
        }
    }

    pub fn player_data(&self) -> Option<&PlayerData> {
        match &self.data {
            MoverData::Player(p) => Some(p),
            _ => None,
        }
    }

    pub fn player_data_mut(&mut self) -> Option<&mut PlayerData> {
        match &mut self.data {
            MoverData::Player(p) => Some(p),
            _ => None,
        }
    }

    pub fn bullet_data_mut(&mut self) -> Option<&mut BulletData> {
        match &mut self.data {
            MoverData::Bullet(b) => Some(b),
            _ => None,
        }
    }
}

/// Things that happened during the last tick, for audio/HUD collaborators
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum GameEvent {
    BulletFired { bullet: EntityId },
    AsteroidDestroyed { bullet: EntityId, asteroid: EntityId },
    BulletExpired { bullet: EntityId },
    PlayerDestroyed { asteroid: EntityId },
    Won,
}

/// Complete state of one game session
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    pub(crate) registry: Registry,
    /// Score, only ever increased
    score: u64,
    /// Once false, stays false
    is_alive: bool,
    /// Once true, stays true
    has_won: bool,
    player_id: Option<EntityId>,
    /// Recent frame rates
    pub stats: FrameStats,
    /// Simulated time so far (ms)
    pub elapsed_ms: f64,
    /// Completed ticks
    pub tick_count: u64,
    /// Events raised by the last tick
    pub events: Vec<GameEvent>,
    rng: Pcg32,
}

impl GameState {
    /// Session with no entities yet (hosts and tests lay out the scene)
    ///
    /// `settings` are taken as already validated; see [`GameState::try_new`].
    pub fn empty(settings: Settings) -> Self {
        Self {
            stats: FrameStats::new(settings.fps_window),
            rng: Pcg32::seed_from_u64(settings.seed),
            settings,
            registry: Registry::new(),
            score: 0,
            is_alive: true,
            has_won: false,
            player_id: None,
            elapsed_ms: 0.0,
            tick_count: 0,
            events: Vec::new(),
        }
    }

    /// Validate `settings`, then start a session with them
    pub fn try_new(settings: Settings) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self::new(settings))
    }

    /// Start a session: one player and `starting_asteroids` asteroids at seeded positions
    ///
    /// `settings` are taken as already validated (a zero mass, say, would give
    /// the thruster infinite acceleration).
    pub fn new(settings: Settings) -> Self {
        let mut state = Self::empty(settings);

        let (x, y) = state.random_point();
        let heading = state.rng.random::<f32>() * 360.0;
        state.spawn_player(x, y, heading);
        let player_pos = Vec2::new(x, y);

        for _ in 0..state.settings.starting_asteroids {
            let (mut x, mut y) = state.random_point();
            for _ in 0..crate::consts::SPAWN_ATTEMPTS {
                if Vec2::new(x, y).distance(player_pos) >= state.settings.spawn_clearance {
                    break;
                }
                (x, y) = state.random_point();
            }
            let heading = state.rng.random::<f32>() * 360.0;
            let speed = state.settings.asteroid_speed;
            state.spawn_asteroid(x, y, heading, speed);
        }

        log::info!(
            "Session started: {}x{} world, {} asteroids ({})",
            state.settings.world_width,
            state.settings.world_height,
            state.remaining_asteroids(),
            state.settings.difficulty.as_str()
        );
        state
    }

    fn random_point(&mut self) -> (f32, f32) {
        (
            self.rng.random::<f32>() * self.settings.world_width,
            self.rng.random::<f32>() * self.settings.world_height,
        )
    }

    /// Spawn the player, replacing any existing one
    ///
    /// Returns `None` once the player has died: a dead session never gets a
    /// ship back.
    pub fn spawn_player(&mut self, x: f32, y: f32, heading: f32) -> Option<EntityId> {
        if !self.is_alive {
            log::warn!("Player spawn ignored, the session is over");
            return None;
        }
        if let Some(old) = self.player_id.take() {
            self.registry.remove(old);
        }
        let settings = &self.settings;
        let id = self
            .registry
            .spawn(|id| Mover::player(id, x, y, heading, settings));
        self.player_id = Some(id);
        log::debug!("Spawned player at ({x:.1}, {y:.1})");
        Some(id)
    }

    pub fn spawn_asteroid(&mut self, x: f32, y: f32, heading: f32, speed: f32) -> EntityId {
        let settings = &self.settings;
        self.registry
            .spawn(|id| Mover::asteroid(id, x, y, heading, speed, settings))
    }

    pub fn spawn_bullet(&mut self, x: f32, y: f32, heading: f32, linear: Vec2) -> EntityId {
        let settings = &self.settings;
        self.registry
            .spawn(|id| Mover::bullet(id, x, y, heading, linear, settings))
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn player_id(&self) -> Option<EntityId> {
        self.player_id
    }

    pub fn player(&self) -> Option<&Mover> {
        self.player_id.and_then(|id| self.registry.get(id))
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn is_alive(&self) -> bool {
        self.is_alive
    }

    pub fn has_won(&self) -> bool {
        self.has_won
    }

    /// Asteroids still in the registry
    pub fn remaining_asteroids(&self) -> usize {
        self.registry.count(MoverKind::Asteroid)
    }

    /// Bullets still in the registry
    pub fn active_bullet_count(&self) -> usize {
        self.registry.count(MoverKind::Bullet)
    }

    pub(crate) fn award(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
    }

    /// Kill the player for the rest of the session
    pub(crate) fn kill_player(&mut self) {
        if let Some(id) = self.player_id.take() {
            self.registry.remove(id);
        }
        self.is_alive = false;
    }

    pub(crate) fn mark_won(&mut self) {
        self.has_won = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_heading_normalized_on_write() {
        let mut pos = Position::new(0.0, 0.0, -90.0);
        assert_eq!(pos.heading(), 270.0);
        pos.rotate(100.0);
        assert_eq!(pos.heading(), 10.0);
        pos.set_heading(725.0);
        assert_eq!(pos.heading(), 5.0);
    }

    #[test]
    fn test_velocity_polar_form() {
        let v = Velocity::from_polar(50.0, 90.0);
        assert!((v.speed() - 50.0).abs() < 1e-4);
        assert!((v.direction() - 90.0).abs() < 1e-3);
        assert_eq!(Velocity::default().direction(), 0.0);
    }

    #[test]
    fn test_new_session_layout() {
        let state = GameState::new(Settings::default());
        assert!(state.is_alive());
        assert!(!state.has_won());
        assert_eq!(state.score(), 0);
        assert_eq!(state.remaining_asteroids(), 10);
        assert_eq!(state.active_bullet_count(), 0);
        assert_eq!(state.registry().count(MoverKind::Player), 1);

        let player = state.player().unwrap();
        assert_eq!(player.kind(), MoverKind::Player);
        for m in state.registry().iter() {
            assert!((0.0..=state.settings.world_width).contains(&m.position.x));
            assert!((0.0..=state.settings.world_height).contains(&m.position.y));
            assert!((0.0..360.0).contains(&m.position.heading()));
        }
    }

    #[test]
    fn test_new_session_is_seeded() {
        let a = GameState::new(Settings::default());
        let b = GameState::new(Settings::default());
        let pa: Vec<_> = a.registry().iter().map(|m| m.position).collect();
        let pb: Vec<_> = b.registry().iter().map(|m| m.position).collect();
        assert_eq!(pa, pb);
    }

    #[test]
    fn test_spawn_player_replaces_previous() {
        let mut state = GameState::empty(Settings::default());
        let first = state.spawn_player(1.0, 1.0, 0.0).unwrap();
        let second = state.spawn_player(2.0, 2.0, 0.0).unwrap();
        assert!(!state.registry().contains(first));
        assert_eq!(state.player_id(), Some(second));
        assert_eq!(state.registry().count(MoverKind::Player), 1);
    }

    #[test]
    fn test_kill_player_is_permanent() {
        let mut state = GameState::empty(Settings::default());
        state.spawn_player(1.0, 1.0, 0.0);
        state.kill_player();
        assert!(!state.is_alive());
        assert!(state.player().is_none());
        assert_eq!(state.registry().count(MoverKind::Player), 0);
        assert_eq!(state.spawn_player(5.0, 5.0, 0.0), None);
        assert_eq!(state.registry().count(MoverKind::Player), 0);
    }

    #[test]
    fn test_try_new_rejects_invalid_settings() {
        let settings = Settings {
            mass: 0.0,
            ..Settings::default()
        };
        assert!(matches!(
            GameState::try_new(settings),
            Err(SettingsError::Invalid { field: "mass", .. })
        ));
        assert!(GameState::try_new(Settings::default()).is_ok());
    }
}
