//! Live-entity store
//!
//! Movers live in a slot arena keyed by generation-checked handles, so an id
//! held after its entity was removed never resolves to a newer entity.
//! Iteration follows slot order, which is stable for a given spawn/remove
//! history.

use slotmap::{SlotMap, new_key_type};

use super::state::{Mover, MoverKind};

new_key_type! {
    /// Unique handle of a live mover
    pub struct EntityId;
}

/// Sole owner of every mover in a session
#[derive(Debug, Clone, Default)]
pub struct Registry {
    movers: SlotMap<EntityId, Mover>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a mover built from its freshly allocated id
    pub fn spawn(&mut self, build: impl FnOnce(EntityId) -> Mover) -> EntityId {
        self.movers.insert_with_key(build)
    }

    /// Remove a mover, returning it if it was still alive
    pub fn remove(&mut self, id: EntityId) -> Option<Mover> {
        self.movers.remove(id)
    }

    pub fn get(&self, id: EntityId) -> Option<&Mover> {
        self.movers.get(id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Mover> {
        self.movers.get_mut(id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.movers.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.movers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Mover> {
        self.movers.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Mover> {
        self.movers.values_mut()
    }

    /// Ids of every mover of `kind`, in iteration order
    pub fn ids_of(&self, kind: MoverKind) -> Vec<EntityId> {
        self.movers
            .iter()
            .filter(|(_, m)| m.kind() == kind)
            .map(|(id, _)| id)
            .collect()
    }

    /// Number of live movers of `kind`
    pub fn count(&self, kind: MoverKind) -> usize {
        self.movers.values().filter(|m| m.kind() == kind).count()
    }

    /// Remove every mover matching `predicate`, returning the removed ids
    pub fn remove_where(&mut self, mut predicate: impl FnMut(&Mover) -> bool) -> Vec<EntityId> {
        let doomed: Vec<EntityId> = self
            .movers
            .iter()
            .filter(|&(_, m)| predicate(m))
            .map(|(id, _)| id)
            .collect();
        for &id in &doomed {
            self.movers.remove(id);
        }
        doomed
    }
}
