//! Per-frame simulation tick
//!
//! One call runs the whole sequence to completion:
//! input → integration → boundaries → collisions → lifecycle/stats.

use super::boundary::{self, World};
use super::collision::{resolve_bullet_hits, resolve_player_hit};
use super::input::KeyStates;
use super::integrator::{apply_player_input, integrate};
use super::registry::{EntityId, Registry};
use super::state::{GameEvent, GameState, MoverData};

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Keys held when the tick started
    pub keys: KeyStates,
}

/// Advance the game state by `delta_ms` milliseconds
///
/// A zero, negative or non-finite delta (the host's first frame) is replaced
/// by the configured fallback so frame-rate stats never divide by zero.
pub fn tick(state: &mut GameState, input: &TickInput, delta_ms: f32) {
    let delta_ms = if delta_ms.is_finite() && delta_ms > 0.0 {
        delta_ms
    } else {
        state.settings.fallback_delta_ms
    };
    let dt = delta_ms / 1000.0;
    let world = World {
        width: state.settings.world_width,
        height: state.settings.world_height,
    };

    state.events.clear();
    state.tick_count += 1;
    state.elapsed_ms += f64::from(delta_ms);
    state.stats.record(delta_ms);

    // Player control (bullets fired now move with everything else)
    if let Some(bullet) = apply_player_input(state, input.keys, dt) {
        state.events.push(GameEvent::BulletFired { bullet });
    }

    integrate(&mut state.registry, dt);
    boundary::resolve_all(&mut state.registry, world);

    for hit in resolve_bullet_hits(state) {
        state.events.push(GameEvent::AsteroidDestroyed {
            bullet: hit.bullet,
            asteroid: hit.asteroid,
        });
    }
    if let Some(asteroid) = resolve_player_hit(state) {
        state.events.push(GameEvent::PlayerDestroyed { asteroid });
    }

    for bullet in expire_bullets(&mut state.registry, delta_ms) {
        state.events.push(GameEvent::BulletExpired { bullet });
    }

    if !state.has_won() && state.remaining_asteroids() == 0 {
        state.mark_won();
        state.events.push(GameEvent::Won);
        log::info!(
            "All asteroids cleared after {} ticks, score {}",
            state.tick_count,
            state.score()
        );
    }
}

/// Count bullet lifetimes down and remove the ones that ran out
pub fn expire_bullets(registry: &mut Registry, delta_ms: f32) -> Vec<EntityId> {
    for mover in registry.iter_mut() {
        if let Some(bullet) = mover.bullet_data_mut() {
            bullet.remaining_lifetime_ms -= delta_ms;
        }
    }
    let expired = registry.remove_where(|m| {
        matches!(m.data, MoverData::Bullet(b) if b.remaining_lifetime_ms <= 0.0)
    });
    if !expired.is_empty() {
        log::debug!("{} bullet(s) expired", expired.len());
    }
    expired
}
