//! Per-tick integration and collision resolution
//!
//! Each movable body is integrated, kept on screen if it is a player,
//! reported for deletion if it left the screen, then resolved against the
//! collidable set. Resolution is greedy and single-pass: movers are handled
//! in ascending id order, and bodies shoved by a push are not re-checked
//! until they move themselves.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::collision::collisions;
use super::components::{Collidable, Player, Position, Sprite, Velocity};
use super::membership::Membership;
use super::rect::{Rect, is_out_of_screen};
use super::registry::{EntityId, Registry};
use super::resolve::{Mover, Resolution, mover_yields, push_other, yield_step};

/// What a tick changed, for the caller to act on
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityChanges {
    /// Entities to destroy. The physics system never despawns by itself.
    pub deleted: BTreeSet<EntityId>,
    /// Entities whose position differs from the start of the tick
    pub moved: BTreeSet<EntityId>,
}

impl EntityChanges {
    pub fn is_empty(&self) -> bool {
        self.deleted.is_empty() && self.moved.is_empty()
    }

    /// Fold a later tick into this one
    pub fn merge(&mut self, later: EntityChanges) {
        self.deleted.extend(later.deleted);
        self.moved.extend(later.moved);
        let deleted = &self.deleted;
        self.moved.retain(|id| !deleted.contains(id));
    }
}

/// Movement and collision for every physical entity
#[derive(Debug, Clone, Default)]
pub struct PhysicsSystem {
    membership: Membership,
}

impl PhysicsSystem {
    /// Start tracking every entity already in the registry
    pub fn new(registry: &Registry) -> Self {
        let membership = Membership::from_registry(registry);
        log::debug!(
            "physics tracking {} movable, {} collidable",
            membership.movable().len(),
            membership.collidable().len()
        );
        Self { membership }
    }

    pub fn membership(&self) -> &Membership {
        &self.membership
    }

    /// Apply pending structural events from the registry.
    ///
    /// Must run between ticks, never during one.
    pub fn sync(&mut self, registry: &mut Registry) {
        for event in registry.drain_events() {
            log::trace!("membership event {event:?}");
            self.membership.apply(registry, event);
        }
    }

    /// Advance every movable entity by `delta_time` seconds
    pub fn tick(&mut self, registry: &mut Registry, delta_time: f32) -> EntityChanges {
        debug_assert!(
            delta_time.is_finite() && delta_time >= 0.0,
            "delta_time must be finite and non-negative, got {delta_time}"
        );
        let delta_time = if delta_time.is_finite() { delta_time.max(0.0) } else { 0.0 };

        let mut changes = EntityChanges::default();
        let mut start_positions = Vec::new();

        // Snapshot so pushes on non-movers are also reported
        for &entity in self.membership.collidable().union(self.membership.movable()) {
            if let Some(position) = registry.get::<Position>(entity) {
                start_positions.push((entity, position.as_vec2()));
            }
        }

        for &entity in self.membership.movable() {
            if self.step_entity(registry, entity, delta_time) == Step::Delete {
                changes.deleted.insert(entity);
            }
        }

        for (entity, start) in start_positions {
            if changes.deleted.contains(&entity) {
                continue;
            }
            let moved = registry
                .get::<Position>(entity)
                .is_some_and(|p| p.as_vec2() != start);
            if moved {
                changes.moved.insert(entity);
            }
        }

        if !changes.deleted.is_empty() {
            log::debug!("tick deleted {} entities: {:?}", changes.deleted.len(), changes.deleted);
        }
        changes
    }

    fn step_entity(&self, registry: &mut Registry, entity: EntityId, delta_time: f32) -> Step {
        let Some(velocity) = registry.get::<Velocity>(entity).copied() else {
            return Step::Skipped;
        };
        // Checked before moving so a body that lost its sprite stays put
        let Some(sprite) = registry.get::<Sprite>(entity).copied() else {
            return Step::Skipped;
        };
        let Some(position) = registry.get_mut::<Position>(entity) else {
            return Step::Skipped;
        };

        let old = position.as_vec2();
        let delta = velocity.0 * delta_time;
        position.x += delta.x;
        position.y += delta.y;
        let mut off_screen = is_out_of_screen(&Rect::from_parts(position, &sprite));

        if off_screen && registry.has::<Player>(entity) {
            // Exact undo; subtracting delta again isn't float-exact
            if let Some(position) = registry.get_mut::<Position>(entity) {
                position.set_vec2(old);
                off_screen = is_out_of_screen(&Rect::from_parts(position, &sprite));
            }
        }

        let delete_when_off = registry
            .get::<Position>(entity)
            .is_some_and(|p| p.delete_if_out_of_screen);
        if delete_when_off && off_screen {
            return Step::Delete;
        }

        let Some(priority) = registry.get::<Collidable>(entity).map(|c| c.priority) else {
            return Step::Moved;
        };
        if off_screen {
            return Step::Moved;
        }

        let mover = Mover {
            id: entity,
            priority,
            old,
            delta,
        };
        self.resolve(registry, &mover);
        Step::Moved
    }

    fn resolve(&self, registry: &mut Registry, mover: &Mover) {
        let collidable = self.membership.collidable();
        for (other, direction) in collisions(registry, collidable, mover.id) {
            let Some(other_priority) = registry.get::<Collidable>(other).map(|c| c.priority) else {
                continue;
            };

            let outcome = if mover_yields(mover.priority, other_priority) {
                yield_step(registry, collidable, mover)
            } else {
                push_other(registry, other, direction, mover.delta);
                Resolution::Push
            };
            log::trace!(
                "{} ({}) vs {} ({}) {:?}: {:?}",
                mover.id,
                mover.priority,
                other,
                other_priority,
                direction,
                outcome
            );

            if outcome.ends_resolution() {
                break;
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Skipped,
    Moved,
    Delete,
}
