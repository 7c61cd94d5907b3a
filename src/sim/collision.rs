//! Collision detection and response
//!
//! Hits use box proximity against the *target's* bounding box: a mover at
//! `a` touches a target at `b` when `|a.x - b.x| < b.width` and
//! `|a.y - b.y| < b.height`. Asteroids are always the target, so the test
//! is the same whichever side of the asteroid the other mover is on.

use glam::Vec2;

use super::registry::{EntityId, Registry};
use super::state::{GameState, Mover, MoverKind};
use crate::consts::ASTEROID_SCORE;

/// A bullet matched with the asteroid it destroyed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulletHit {
    pub bullet: EntityId,
    pub asteroid: EntityId,
}

/// Whether `mover` lies within `target`'s bounding box
#[inline]
pub fn in_proximity(mover: &Mover, target: &Mover) -> bool {
    (mover.position.x - target.position.x).abs() < target.collider.width
        && (mover.position.y - target.position.y).abs() < target.collider.height
}

/// Mirror `velocity` across a wall with unit `normal`
///
/// Only the component along the normal changes sign.
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Pair each bullet with the first still-unclaimed asteroid it touches
///
/// Bullets are visited in registry order; an asteroid claimed by an earlier
/// bullet is skipped, so each entity takes part in at most one hit.
pub fn find_bullet_hits(registry: &Registry) -> Vec<BulletHit> {
    let asteroids = registry.ids_of(MoverKind::Asteroid);
    let mut claimed = vec![false; asteroids.len()];
    let mut hits = Vec::new();

    for bullet in registry.iter().filter(|m| m.kind() == MoverKind::Bullet) {
        let found = asteroids.iter().enumerate().find(|&(i, &id)| {
            !claimed[i]
                && registry
                    .get(id)
                    .is_some_and(|asteroid| in_proximity(bullet, asteroid))
        });
        if let Some((i, &asteroid)) = found {
            claimed[i] = true;
            hits.push(BulletHit {
                bullet: bullet.id(),
                asteroid,
            });
        }
    }
    hits
}

/// Remove every bullet/asteroid pair that touched and score them
pub fn resolve_bullet_hits(state: &mut GameState) -> Vec<BulletHit> {
    let hits = find_bullet_hits(&state.registry);
    for hit in &hits {
        state.registry.remove(hit.bullet);
        state.registry.remove(hit.asteroid);
        state.award(ASTEROID_SCORE);
        log::debug!("Asteroid destroyed, score {}", state.score());
    }
    hits
}

/// First asteroid touching the player, if any
pub fn find_player_hit(registry: &Registry, player: EntityId) -> Option<EntityId> {
    let player = registry.get(player)?;
    registry
        .iter()
        .filter(|m| m.kind() == MoverKind::Asteroid)
        .find(|asteroid| in_proximity(player, asteroid))
        .map(Mover::id)
}

/// Kill the player if any asteroid touches it; returns the asteroid that hit
///
/// Skipped entirely once the player is dead.
pub fn resolve_player_hit(state: &mut GameState) -> Option<EntityId> {
    if !state.is_alive() {
        return None;
    }
    let player = state.player_id()?;
    let asteroid = find_player_hit(&state.registry, player)?;
    state.kill_player();
    log::info!("Player destroyed with score {}", state.score());
    Some(asteroid)
}
