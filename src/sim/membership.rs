//! Cached physics membership
//!
//! The physics system only iterates entities that can move or collide.
//! Both sets are kept in sync from registry notifications rather than
//! rebuilt every tick, and iterate in ascending id order so resolution is
//! reproducible.

use std::collections::BTreeSet;

use super::components::{Collidable, Velocity};
use super::registry::{EntityEvent, EntityId, Registry};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Membership {
    movable: BTreeSet<EntityId>,
    collidable: BTreeSet<EntityId>,
}

impl Membership {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate every live entity of the registry
    pub fn from_registry(registry: &Registry) -> Self {
        let mut membership = Self::new();
        for entity in registry.entities() {
            membership.added(registry, entity);
        }
        membership
    }

    /// Track an entity if it has a body.
    ///
    /// Entities without both position and sprite are ignored entirely.
    pub fn added(&mut self, registry: &Registry, entity: EntityId) {
        if !registry.has_body(entity) {
            return;
        }
        if registry.has::<Velocity>(entity) {
            self.movable.insert(entity);
        }
        if registry.has::<Collidable>(entity) {
            self.collidable.insert(entity);
        }
    }

    pub fn removed(&mut self, entity: EntityId) {
        self.movable.remove(&entity);
        self.collidable.remove(&entity);
    }

    /// Re-evaluate after components changed
    pub fn modified(&mut self, registry: &Registry, entity: EntityId) {
        self.removed(entity);
        self.added(registry, entity);
    }

    pub fn apply(&mut self, registry: &Registry, event: EntityEvent) {
        match event {
            EntityEvent::Added(entity) => self.added(registry, entity),
            EntityEvent::Removed(entity) => self.removed(entity),
            EntityEvent::Modified(entity) => self.modified(registry, entity),
        }
    }

    pub fn movable(&self) -> &BTreeSet<EntityId> {
        &self.movable
    }

    pub fn collidable(&self) -> &BTreeSet<EntityId> {
        &self.collidable
    }

    pub fn is_movable(&self, entity: EntityId) -> bool {
        self.movable.contains(&entity)
    }

    pub fn is_collidable(&self, entity: EntityId) -> bool {
        self.collidable.contains(&entity)
    }
}
