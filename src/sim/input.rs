//! Logical input keys and per-tick key snapshots
//!
//! The host's key-capture layer writes into an [`InputBuffer`] whenever key
//! events arrive. At tick start the host copies out a [`KeyStates`] snapshot,
//! which the integrator reads and never mutates.

use serde::{Deserialize, Serialize};

/// Logical controls understood by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicalKey {
    Thrust,
    Brake,
    TurnLeft,
    TurnRight,
    Fire,
}

impl LogicalKey {
    pub const ALL: [LogicalKey; 5] = [
        LogicalKey::Thrust,
        LogicalKey::Brake,
        LogicalKey::TurnLeft,
        LogicalKey::TurnRight,
        LogicalKey::Fire,
    ];

    /// Map a web-style key code (`KeyboardEvent.code`) to a logical key
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "KeyW" | "ArrowUp" => Some(LogicalKey::Thrust),
            "KeyS" | "ArrowDown" => Some(LogicalKey::Brake),
            "KeyA" | "ArrowLeft" => Some(LogicalKey::TurnLeft),
            "KeyD" | "ArrowRight" => Some(LogicalKey::TurnRight),
            "Space" => Some(LogicalKey::Fire),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Snapshot of which logical keys are held
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyStates {
    held: [bool; LogicalKey::ALL.len()],
}

impl KeyStates {
    /// Snapshot with the given keys held
    pub fn with(keys: &[LogicalKey]) -> Self {
        let mut states = Self::default();
        for &key in keys {
            states.set(key, true);
        }
        states
    }

    pub fn is_down(&self, key: LogicalKey) -> bool {
        self.held[key.index()]
    }

    pub fn set(&mut self, key: LogicalKey, down: bool) {
        self.held[key.index()] = down;
    }

    /// Net turn direction: +1 left (counter-clockwise on screen), -1 right, 0 neither/both
    pub fn turn_axis(&self) -> f32 {
        match (self.is_down(LogicalKey::TurnLeft), self.is_down(LogicalKey::TurnRight)) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        }
    }
}

/// Key buffer written by the input collaborator between ticks
#[derive(Debug, Clone, Default)]
pub struct InputBuffer {
    states: KeyStates,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press; returns false (and ignores it) for unmapped codes
    pub fn key_down(&mut self, code: &str) -> bool {
        self.set_code(code, true)
    }

    /// Record a key release; returns false (and ignores it) for unmapped codes
    pub fn key_up(&mut self, code: &str) -> bool {
        self.set_code(code, false)
    }

    /// Release every key (e.g. when the window loses focus)
    pub fn clear(&mut self) {
        self.states = KeyStates::default();
    }

    /// Immutable copy for the next tick
    pub fn snapshot(&self) -> KeyStates {
        self.states
    }

    fn set_code(&mut self, code: &str, down: bool) -> bool {
        match LogicalKey::from_code(code) {
            Some(key) => {
                self.states.set(key, down);
                true
            }
            None => {
                log::warn!("Ignoring unrecognized key code {code:?}");
                false
            }
        }
    }
}
