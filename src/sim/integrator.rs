//! Player control and kinematic integration
//!
//! Turn input sets the angular velocity outright each tick (it never
//! accumulates), thrust accelerates along the heading, and every mover then
//! advances by its velocity.

use glam::Vec2;

use super::input::{KeyStates, LogicalKey};
use super::registry::{EntityId, Registry};
use super::state::{GameState, Mover, Velocity};
use crate::to_vector;

/// Per-tick player tuning, copied out of [`crate::Settings`]
#[derive(Debug, Clone, Copy)]
struct Handling {
    turn_rate: f32,
    linear_damping: f32,
    bullet_speed_factor: f32,
    min_bullet_speed: f32,
}

/// Apply the key snapshot to the player and fire if a new press arrived
///
/// Returns the id of the bullet fired this tick, if any. Does nothing once
/// the player is dead.
pub fn apply_player_input(state: &mut GameState, keys: KeyStates, dt_s: f32) -> Option<EntityId> {
    if !state.is_alive() {
        return None;
    }
    let id = state.player_id()?;
    let handling = Handling {
        turn_rate: state.settings.turn_rate,
        linear_damping: state.settings.linear_damping,
        bullet_speed_factor: state.settings.bullet_speed_factor,
        min_bullet_speed: state.settings.min_bullet_speed,
    };

    let player = state.registry.get_mut(id)?;
    let fire_pressed = steer(player, keys, handling, dt_s);
    if !fire_pressed {
        return None;
    }

    let heading = player.position.heading();
    let (x, y) = (player.position.x, player.position.y);
    let linear = bullet_velocity(
        &player.velocity,
        heading,
        handling.bullet_speed_factor,
        handling.min_bullet_speed,
    );
    let bullet = state.spawn_bullet(x, y, heading, linear);
    log::debug!("Bullet fired from ({x:.1}, {y:.1}) at {:.1} px/s", linear.length());
    Some(bullet)
}

/// Update the player's velocity from `keys`; returns true on a fresh fire press
fn steer(player: &mut Mover, keys: KeyStates, handling: Handling, dt_s: f32) -> bool {
    let mass = player.mass;
    let heading = player.position.heading();
    let Some(data) = player.player_data_mut() else {
        return false;
    };

    data.keys = keys;
    data.thruster.enabled = keys.is_down(LogicalKey::Thrust);
    let fire_held = keys.is_down(LogicalKey::Fire);
    let fire_pressed = fire_held && !data.fire_latched;
    data.fire_latched = fire_held;
    let accel = data.thruster.force / mass;
    let thrusting = data.thruster.enabled;

    let velocity = &mut player.velocity;
    velocity.angular = keys.turn_axis() * handling.turn_rate;

    if thrusting {
        velocity.linear += to_vector(accel, heading) * dt_s;
    }

    if keys.is_down(LogicalKey::Brake) {
        let speed = velocity.linear.length();
        if speed > 0.0 {
            let slowed = (speed - accel * dt_s).max(0.0);
            velocity.linear *= slowed / speed;
        }
    }

    if handling.linear_damping > 0.0 {
        velocity.linear *= (1.0 - handling.linear_damping * dt_s).max(0.0);
    }

    fire_pressed
}

/// Launch velocity for a bullet fired by a mover moving at `shooter`
///
/// Travels along the shooter's direction of motion (its heading when
/// stationary) and never slower than `min_speed`.
pub fn bullet_velocity(shooter: &Velocity, heading: f32, speed_factor: f32, min_speed: f32) -> Vec2 {
    let speed = shooter.speed();
    let direction = if speed > f32::EPSILON {
        shooter.direction()
    } else {
        heading
    };
    to_vector((speed * speed_factor).max(min_speed), direction)
}

/// Advance every mover by its velocity
pub fn integrate(registry: &mut Registry, dt_s: f32) {
    for mover in registry.iter_mut() {
        let Velocity { linear, angular } = mover.velocity;
        mover.position.x += linear.x * dt_s;
        mover.position.y += linear.y * dt_s;
        mover.position.rotate(angular * dt_s);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::state::MoverKind;
    use approx::assert_relative_eq;

    fn session() -> GameState {
        let mut state = GameState::empty(Settings::default());
        state.spawn_player(400.0, 350.0, 0.0);
        state
    }

    fn player(state: &GameState) -> &Mover {
        state.player().unwrap()
    }

    #[test]
    fn test_turn_sets_rate_without_accumulating() {
        let mut state = session();
        let left = KeyStates::with(&[LogicalKey::TurnLeft]);
        apply_player_input(&mut state, left, 0.016);
        apply_player_input(&mut state, left, 0.016);
        assert_eq!(player(&state).velocity.angular, state.settings.turn_rate);

        apply_player_input(&mut state, KeyStates::with(&[LogicalKey::TurnRight]), 0.016);
        assert_eq!(player(&state).velocity.angular, -state.settings.turn_rate);

        apply_player_input(&mut state, KeyStates::default(), 0.016);
        assert_eq!(player(&state).velocity.angular, 0.0);
    }

    #[test]
    fn test_thrust_accelerates_along_heading() {
        let mut state = session();
        let accel = state.settings.thrust_acceleration();
        apply_player_input(&mut state, KeyStates::with(&[LogicalKey::Thrust]), 0.5);
        let v = player(&state).velocity.linear;
        assert_relative_eq!(v.x, accel * 0.5, epsilon = 1e-3);
        assert_relative_eq!(v.y, 0.0, epsilon = 1e-3);
        assert!(player(&state).player_data().unwrap().thruster.enabled);
    }

    #[test]
    fn test_thrust_has_no_speed_cap() {
        let mut state = session();
        let thrust = KeyStates::with(&[LogicalKey::Thrust]);
        for _ in 0..100 {
            apply_player_input(&mut state, thrust, 0.1);
        }
        let expected = state.settings.thrust_acceleration() * 10.0;
        assert_relative_eq!(player(&state).velocity.speed(), expected, epsilon = 0.5);
    }

    #[test]
    fn test_brake_never_reverses() {
        let mut state = session();
        let id = state.player_id().unwrap();
        state.registry.get_mut(id).unwrap().velocity.linear = Vec2::new(10.0, 0.0);
        apply_player_input(&mut state, KeyStates::with(&[LogicalKey::Brake]), 1.0);
        assert_eq!(player(&state).velocity.linear, Vec2::ZERO);
    }

    #[test]
    fn test_damping_slows_drift() {
        let mut settings = Settings::default();
        settings.linear_damping = 0.5;
        let mut state = GameState::empty(settings);
        let id = state.spawn_player(0.0, 0.0, 0.0).unwrap();
        state.registry.get_mut(id).unwrap().velocity.linear = Vec2::new(100.0, 0.0);
        apply_player_input(&mut state, KeyStates::default(), 1.0);
        assert_relative_eq!(player(&state).velocity.linear.x, 50.0, epsilon = 1e-3);
    }

    #[test]
    fn test_fire_is_edge_triggered() {
        let mut state = session();
        let fire = KeyStates::with(&[LogicalKey::Fire]);
        assert!(apply_player_input(&mut state, fire, 0.016).is_some());
        assert!(apply_player_input(&mut state, fire, 0.016).is_none());
        assert!(apply_player_input(&mut state, fire, 0.016).is_none());
        assert_eq!(state.active_bullet_count(), 1);

        apply_player_input(&mut state, KeyStates::default(), 0.016);
        assert!(apply_player_input(&mut state, fire, 0.016).is_some());
        assert_eq!(state.active_bullet_count(), 2);
    }

    #[test]
    fn test_bullet_inherits_shooter_pose() {
        let mut state = GameState::empty(Settings::default());
        state.spawn_player(100.0, 200.0, 90.0);
        let bullet = apply_player_input(&mut state, KeyStates::with(&[LogicalKey::Fire]), 0.016)
            .unwrap();
        let bullet = state.registry().get(bullet).unwrap();
        assert_eq!(bullet.kind(), MoverKind::Bullet);
        assert_eq!((bullet.position.x, bullet.position.y), (100.0, 200.0));
        assert_eq!(bullet.position.heading(), 90.0);
        // Stationary shooter: fired along the heading at the minimum speed
        assert_relative_eq!(bullet.velocity.speed(), state.settings.min_bullet_speed, epsilon = 1e-2);
        assert!(bullet.velocity.linear.y < 0.0);
    }

    #[test]
    fn test_bullet_outruns_moving_shooter() {
        let shooter = Velocity::from_polar(500.0, 45.0);
        let v = bullet_velocity(&shooter, 0.0, 1.5, 300.0);
        assert_relative_eq!(v.length(), 750.0, epsilon = 1e-2);
        assert_relative_eq!(crate::to_polar(v).1, 45.0, epsilon = 1e-2);

        let slow = Velocity::from_polar(10.0, 180.0);
        assert_relative_eq!(bullet_velocity(&slow, 0.0, 1.5, 300.0).length(), 300.0, epsilon = 1e-2);
    }

    #[test]
    fn test_dead_player_ignores_input() {
        let mut state = session();
        state.kill_player();
        assert!(apply_player_input(&mut state, KeyStates::with(&[LogicalKey::Fire]), 0.016).is_none());
        assert_eq!(state.active_bullet_count(), 0);
    }

    #[test]
    fn test_integrate_moves_and_turns() {
        let mut state = GameState::empty(Settings::default());
        let id = state.spawn_asteroid(10.0, 10.0, 0.0, 100.0);
        state.registry.get_mut(id).unwrap().velocity.angular = -90.0;
        integrate(&mut state.registry, 0.5);
        let rock = state.registry().get(id).unwrap();
        assert_relative_eq!(rock.position.x, 60.0, epsilon = 1e-3);
        assert_relative_eq!(rock.position.y, 10.0, epsilon = 1e-3);
        assert_eq!(rock.position.heading(), 315.0);
    }
}
