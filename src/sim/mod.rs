//! Simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - No rendering or platform dependencies
//! - Input arrives only as a [`KeyStates`] snapshot per tick
//! - Output leaves only as a [`Snapshot`] and the tick's [`GameEvent`]s
//! - Seeded RNG only, stable iteration order

pub mod boundary;
pub mod collision;
pub mod input;
pub mod integrator;
pub mod registry;
pub mod snapshot;
pub mod state;
pub mod stats;
pub mod tick;

pub use boundary::{BoundaryPolicy, World};
pub use collision::{BulletHit, in_proximity, reflect_velocity};
pub use input::{InputBuffer, KeyStates, LogicalKey};
pub use registry::{EntityId, Registry};
pub use snapshot::{EntityView, Snapshot};
pub use state::{
    BulletData, Collider, GameEvent, GameState, Mover, MoverData, MoverKind, PlayerData, Position,
    Thruster, Velocity,
};
pub use stats::{FrameClock, FrameStats};
pub use tick::{TickInput, tick};
