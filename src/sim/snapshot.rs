//! Read-only view of the simulation handed to renderers after each tick

use serde::Serialize;

use super::registry::EntityId;
use super::state::{GameState, MoverKind};

/// One entity as the renderer sees it
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EntityView {
    pub id: EntityId,
    pub kind: MoverKind,
    pub x: f32,
    pub y: f32,
    pub heading: f32,
    pub width: f32,
    pub height: f32,
}

/// Everything a renderer or HUD needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub tick: u64,
    pub entities: Vec<EntityView>,
    pub score: u64,
    pub remaining_asteroids: usize,
    pub is_alive: bool,
    pub has_won: bool,
    pub moving_average_fps: f32,
    pub active_bullet_count: usize,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let entities = state
            .registry()
            .iter()
            .map(|m| EntityView {
                id: m.id(),
                kind: m.kind(),
                x: m.position.x,
                y: m.position.y,
                heading: m.position.heading(),
                width: m.collider.width,
                height: m.collider.height,
            })
            .collect();

        Self {
            tick: state.tick_count,
            entities,
            score: state.score(),
            remaining_asteroids: state.remaining_asteroids(),
            is_alive: state.is_alive(),
            has_won: state.has_won(),
            moving_average_fps: state.stats.average_fps(),
            active_bullet_count: state.active_bullet_count(),
        }
    }

    /// Serialize for a JS/web renderer
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl GameState {
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self)
    }
}
