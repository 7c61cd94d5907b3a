//! Arena boundary policies
//!
//! Players and asteroids wrap to the opposite edge; bullets are clamped
//! inside the arena and bounce off the walls.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::reflect_velocity;
use super::registry::Registry;
use super::state::{Collider, Mover, MoverKind, Position, Velocity};

/// How a mover is kept inside the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoundaryPolicy {
    /// Teleport to the opposite edge, velocity unchanged
    Wrap,
    /// Clamp to the wall and reflect off it
    Bounce,
}

impl MoverKind {
    pub fn boundary_policy(self) -> BoundaryPolicy {
        match self {
            MoverKind::Player | MoverKind::Asteroid => BoundaryPolicy::Wrap,
            MoverKind::Bullet => BoundaryPolicy::Bounce,
        }
    }
}

/// Arena size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct World {
    pub width: f32,
    pub height: f32,
}

/// Wrap a single axis coordinate: below 0 goes to `extent`, at or past `extent` goes to 0
#[inline]
fn wrap_axis(value: f32, extent: f32) -> f32 {
    if value < 0.0 {
        extent
    } else if value >= extent {
        0.0
    } else {
        value
    }
}

/// Clamp a single axis coordinate into [0, max]
#[inline]
fn clamp_axis(value: f32, max: f32) -> f32 {
    if value <= 0.0 { 0.0 } else { value.min(max) }
}

pub fn wrap(position: &mut Position, world: World) {
    position.x = wrap_axis(position.x, world.width);
    position.y = wrap_axis(position.y, world.height);
}

/// Clamp into the arena and reflect the velocity off any wall reached
///
/// Each axis is handled on its own: touching a side wall reflects only the X
/// component, a top/bottom wall only Y, a corner both. The component is
/// reflected only while it still points into the wall.
pub fn bounce(position: &mut Position, velocity: &mut Velocity, collider: Collider, world: World) {
    let max_x = world.width - collider.width;
    let max_y = world.height - collider.height;
    position.x = clamp_axis(position.x, max_x);
    position.y = clamp_axis(position.y, max_y);

    let walls = [
        (position.x == 0.0, Vec2::X),
        (position.x == max_x, Vec2::NEG_X),
        (position.y == 0.0, Vec2::Y),
        (position.y == max_y, Vec2::NEG_Y),
    ];
    for (touching, normal) in walls {
        if touching && velocity.linear.dot(normal) < 0.0 {
            velocity.linear = reflect_velocity(velocity.linear, normal);
        }
    }
}

/// Apply each mover's boundary policy
pub fn resolve(mover: &mut Mover, world: World) {
    match mover.kind().boundary_policy() {
        BoundaryPolicy::Wrap => wrap(&mut mover.position, world),
        BoundaryPolicy::Bounce => {
            bounce(&mut mover.position, &mut mover.velocity, mover.collider, world)
        }
    }
}

pub fn resolve_all(registry: &mut Registry, world: World) {
    for mover in registry.iter_mut() {
        resolve(mover, world);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORLD: World = World {
        width: 800.0,
        height: 700.0,
    };
    const BULLET: Collider = Collider {
        width: 5.0,
        height: 5.0,
    };

    #[test]
    fn test_wrap_left_edge_goes_to_width() {
        let mut pos = Position::new(-1.0, 100.0, 0.0);
        wrap(&mut pos, WORLD);
        assert_eq!(pos.x, 800.0);
        assert_eq!(pos.y, 100.0);
    }

    #[test]
    fn test_wrap_far_edges_go_to_zero() {
        let mut pos = Position::new(800.0, 701.0, 0.0);
        wrap(&mut pos, WORLD);
        assert_eq!((pos.x, pos.y), (0.0, 0.0));

        let mut pos = Position::new(10.0, -0.5, 0.0);
        wrap(&mut pos, WORLD);
        assert_eq!((pos.x, pos.y), (10.0, 700.0));
    }

    #[test]
    fn test_wrap_preserves_velocity() {
        let settings = crate::Settings::default();
        let mut rock = Mover::asteroid(Default::default(), -1.0, 50.0, 180.0, 100.0, &settings);
        let before = rock.velocity;
        resolve(&mut rock, WORLD);
        assert_eq!(rock.position.x, 800.0);
        assert_eq!(rock.velocity, before);
    }

    #[test]
    fn test_bounce_left_wall_inverts_x_only() {
        let mut pos = Position::new(-3.0, 100.0, 0.0);
        let mut vel = Velocity {
            linear: Vec2::new(-40.0, 25.0),
            angular: 0.0,
        };
        bounce(&mut pos, &mut vel, BULLET, WORLD);
        assert_eq!(pos.x, 0.0);
        assert_eq!(vel.linear, Vec2::new(40.0, 25.0));
    }

    #[test]
    fn test_bounce_far_wall_accounts_for_size() {
        let mut pos = Position::new(900.0, 100.0, 0.0);
        let mut vel = Velocity {
            linear: Vec2::new(40.0, -10.0),
            angular: 0.0,
        };
        bounce(&mut pos, &mut vel, BULLET, WORLD);
        assert_eq!(pos.x, 795.0);
        assert_eq!(vel.linear, Vec2::new(-40.0, -10.0));
    }

    #[test]
    fn test_bounce_floor_inverts_y_only() {
        let mut pos = Position::new(300.0, 720.0, 0.0);
        let mut vel = Velocity {
            linear: Vec2::new(12.0, 30.0),
            angular: 0.0,
        };
        bounce(&mut pos, &mut vel, BULLET, WORLD);
        assert_eq!(pos.y, 695.0);
        assert_eq!(vel.linear, Vec2::new(12.0, -30.0));
    }

    #[test]
    fn test_bounce_corner_inverts_both() {
        let mut pos = Position::new(-1.0, -1.0, 0.0);
        let mut vel = Velocity {
            linear: Vec2::new(-5.0, -7.0),
            angular: 0.0,
        };
        bounce(&mut pos, &mut vel, BULLET, WORLD);
        assert_eq!((pos.x, pos.y), (0.0, 0.0));
        assert_eq!(vel.linear, Vec2::new(5.0, 7.0));
    }

    #[test]
    fn test_bounce_leaves_interior_untouched() {
        let mut pos = Position::new(200.0, 200.0, 0.0);
        let mut vel = Velocity {
            linear: Vec2::new(-5.0, 7.0),
            angular: 0.0,
        };
        bounce(&mut pos, &mut vel, BULLET, WORLD);
        assert_eq!((pos.x, pos.y), (200.0, 200.0));
        assert_eq!(vel.linear, Vec2::new(-5.0, 7.0));
    }

    #[test]
    fn test_bounce_does_not_flip_back_into_wall() {
        // Already reflected and leaving the wall
        let mut pos = Position::new(0.0, 100.0, 0.0);
        let mut vel = Velocity {
            linear: Vec2::new(40.0, 0.0),
            angular: 0.0,
        };
        bounce(&mut pos, &mut vel, BULLET, WORLD);
        assert_eq!(vel.linear.x, 40.0);
    }

    #[test]
    fn test_policy_per_kind() {
        assert_eq!(MoverKind::Player.boundary_policy(), BoundaryPolicy::Wrap);
        assert_eq!(MoverKind::Asteroid.boundary_policy(), BoundaryPolicy::Wrap);
        assert_eq!(MoverKind::Bullet.boundary_policy(), BoundaryPolicy::Bounce);
    }
}
