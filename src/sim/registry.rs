//! Entity registry
//!
//! Owns entity lifetimes and typed component storage. Every structural
//! change (spawn, despawn, a component appearing or disappearing) is queued
//! as an [`EntityEvent`] so systems that cache membership can catch up
//! between ticks instead of rescanning the world.
//!
//! Components live in sparse arrays indexed by entity id. Worlds here hold
//! hundreds of entities, not millions, so a `Vec<Option<T>>` per type is
//! simpler than archetypes and fast enough.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::components::{Block, Collidable, Player, Position, Sprite, Velocity};

/// Unique entity identifier. Ids are never reused within one registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(u32);

impl EntityId {
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Sparse storage for a single component type
#[derive(Debug, Clone)]
pub struct ComponentStorage<T> {
    /// Indexed by entity id
    data: Vec<Option<T>>,
}

impl<T> ComponentStorage<T> {
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Insert or replace. Returns the previous value.
    pub fn insert(&mut self, entity: EntityId, component: T) -> Option<T> {
        let idx = entity.index();
        if idx >= self.data.len() {
            self.data.resize_with(idx + 1, || None);
        }
        self.data[idx].replace(component)
    }

    pub fn remove(&mut self, entity: EntityId) -> Option<T> {
        self.data.get_mut(entity.index()).and_then(Option::take)
    }

    pub fn get(&self, entity: EntityId) -> Option<&T> {
        self.data.get(entity.index()).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, entity: EntityId) -> Option<&mut T> {
        self.data.get_mut(entity.index()).and_then(Option::as_mut)
    }

    pub fn contains(&self, entity: EntityId) -> bool {
        self.get(entity).is_some()
    }

    /// Iterate `(id, component)` pairs in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &T)> {
        self.data
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.as_ref().map(|c| (EntityId(idx as u32), c)))
    }

    pub fn count(&self) -> usize {
        self.data.iter().filter(|slot| slot.is_some()).count()
    }
}

impl<T> Default for ComponentStorage<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A type that can be attached to an entity.
///
/// Maps the type to its storage field so the registry can offer
/// `has::<T>` / `get::<T>` without runtime type inspection.
pub trait Component: Sized + 'static {
    fn storage(registry: &Registry) -> &ComponentStorage<Self>;
    fn storage_mut(registry: &mut Registry) -> &mut ComponentStorage<Self>;
}

macro_rules! impl_component {
    ($ty:ty => $field:ident) => {
        impl Component for $ty {
            #[inline]
            fn storage(registry: &Registry) -> &ComponentStorage<Self> {
                &registry.$field
            }

            #[inline]
            fn storage_mut(registry: &mut Registry) -> &mut ComponentStorage<Self> {
                &mut registry.$field
            }
        }
    };
}

impl_component!(Position => positions);
impl_component!(Velocity => velocities);
impl_component!(Sprite => sprites);
impl_component!(Collidable => collidables);
impl_component!(Block => blocks);
impl_component!(Player => players);

/// Structural change notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityEvent {
    Added(EntityId),
    Removed(EntityId),
    /// A component was attached to or detached from a live entity
    Modified(EntityId),
}

/// Container for all entities and their components
#[derive(Debug, Default)]
pub struct Registry {
    next_id: u32,
    alive: BTreeSet<EntityId>,
    /// Structural changes since the last drain, oldest first
    events: Vec<EntityEvent>,

    positions: ComponentStorage<Position>,
    velocities: ComponentStorage<Velocity>,
    sprites: ComponentStorage<Sprite>,
    collidables: ComponentStorage<Collidable>,
    blocks: ComponentStorage<Block>,
    players: ComponentStorage<Player>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a new entity and queue its `Added` event.
    ///
    /// Components attached through the returned builder are part of the
    /// spawn: they don't produce extra `Modified` events.
    pub fn spawn(&mut self) -> EntityBuilder<'_> {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.alive.insert(id);
        self.events.push(EntityEvent::Added(id));
        EntityBuilder { registry: self, id }
    }

    /// Destroy an entity and all its components.
    /// Returns false if it was already gone.
    pub fn despawn(&mut self, entity: EntityId) -> bool {
        if !self.alive.remove(&entity) {
            return false;
        }
        self.positions.remove(entity);
        self.velocities.remove(entity);
        self.sprites.remove(entity);
        self.collidables.remove(entity);
        self.blocks.remove(entity);
        self.players.remove(entity);
        self.events.push(EntityEvent::Removed(entity));
        true
    }

    pub fn is_alive(&self, entity: EntityId) -> bool {
        self.alive.contains(&entity)
    }

    /// Live entities in ascending id order
    pub fn entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.alive.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.alive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alive.is_empty()
    }

    /// Attach (or replace) a component on a live entity.
    ///
    /// Queues `Modified` when the component is new to the entity; replacing
    /// an existing value is not a structural change.
    pub fn insert<T: Component>(&mut self, entity: EntityId, component: T) {
        if !self.is_alive(entity) {
            log::warn!("insert on dead entity {entity} ignored");
            return;
        }
        if T::storage_mut(self).insert(entity, component).is_none() {
            self.events.push(EntityEvent::Modified(entity));
        }
    }

    /// Detach a component. Queues `Modified` if it was present.
    pub fn remove<T: Component>(&mut self, entity: EntityId) -> Option<T> {
        let removed = T::storage_mut(self).remove(entity);
        if removed.is_some() {
            self.events.push(EntityEvent::Modified(entity));
        }
        removed
    }

    #[inline]
    pub fn has<T: Component>(&self, entity: EntityId) -> bool {
        T::storage(self).contains(entity)
    }

    #[inline]
    pub fn get<T: Component>(&self, entity: EntityId) -> Option<&T> {
        T::storage(self).get(entity)
    }

    #[inline]
    pub fn get_mut<T: Component>(&mut self, entity: EntityId) -> Option<&mut T> {
        T::storage_mut(self).get_mut(entity)
    }

    /// Position and sprite: the minimum for an entity to exist physically
    pub fn has_body(&self, entity: EntityId) -> bool {
        self.has::<Position>(entity) && self.has::<Sprite>(entity)
    }

    pub fn storage<T: Component>(&self) -> &ComponentStorage<T> {
        T::storage(self)
    }

    /// Pending structural events, oldest first
    pub fn pending_events(&self) -> &[EntityEvent] {
        &self.events
    }

    /// Take all pending structural events, oldest first
    pub fn drain_events(&mut self) -> Vec<EntityEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Attaches components to a freshly spawned entity
pub struct EntityBuilder<'a> {
    registry: &'a mut Registry,
    id: EntityId,
}

impl EntityBuilder<'_> {
    pub fn with<T: Component>(self, component: T) -> Self {
        T::storage_mut(self.registry).insert(self.id, component);
        self
    }

    /// Attach only when `Some`
    pub fn maybe<T: Component>(self, component: Option<T>) -> Self {
        match component {
            Some(c) => self.with(c),
            None => self,
        }
    }

    pub fn id(self) -> EntityId {
        self.id
    }
}
