//! Pairwise collision resolution
//!
//! Resolution is positional only. For each contact the mover either yields
//! (undoes part of its own displacement) or pushes the other body along the
//! contact axis. Yielding tries the cheapest fix first:
//!
//! 1. cancel the x displacement only
//! 2. keep x, cancel the y displacement only
//! 3. cancel both
//!
//! and ends resolution for the mover whatever the outcome.

use std::collections::BTreeSet;

use glam::Vec2;

use super::collision::collisions;
use super::components::Position;
use super::rect::Direction;
use super::registry::{EntityId, Registry};

/// What happened for one contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Mover had strictly higher priority and shoved the other body
    Push,
    /// Cancelling dx was enough
    YieldX,
    /// Cancelling dy (with dx kept) was enough
    YieldY,
    /// Neither single axis helped; mover is back at its old position
    YieldBoth,
}

impl Resolution {
    /// Yield outcomes stop processing the remaining contacts of the mover
    #[inline]
    pub fn ends_resolution(self) -> bool {
        !matches!(self, Resolution::Push)
    }
}

/// The entity being integrated this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mover {
    pub id: EntityId,
    pub priority: i32,
    /// Position before integration
    pub old: Vec2,
    /// Displacement applied this tick
    pub delta: Vec2,
}

/// Ties go to the body already in place
#[inline]
pub fn mover_yields(own_priority: i32, other_priority: i32) -> bool {
    own_priority <= other_priority
}

/// Undo the mover's displacement one axis at a time until it is free.
///
/// Collisions are recomputed against the whole collidable set after each
/// step, not just the contact that triggered the yield.
pub fn yield_step(registry: &mut Registry, collidable: &BTreeSet<EntityId>, mover: &Mover) -> Resolution {
    update_position(registry, mover.id, |p| p.x = mover.old.x);
    if collisions(registry, collidable, mover.id).is_empty() {
        return Resolution::YieldX;
    }

    update_position(registry, mover.id, |p| {
        p.x += mover.delta.x;
        p.y = mover.old.y;
    });
    if collisions(registry, collidable, mover.id).is_empty() {
        return Resolution::YieldY;
    }

    update_position(registry, mover.id, |p| p.x = mover.old.x);
    Resolution::YieldBoth
}

/// Move `other` by the mover's displacement along the contact axis.
///
/// Only the component matching the contact direction is carried over, so a
/// side hit never lifts or drops the other body.
pub fn push_other(registry: &mut Registry, other: EntityId, direction: Direction, delta: Vec2) {
    update_position(registry, other, |p| {
        if direction.is_horizontal() {
            p.x += delta.x;
        }
        if direction.is_vertical() {
            p.y += delta.y;
        }
    });
}

fn update_position(registry: &mut Registry, entity: EntityId, f: impl FnOnce(&mut Position)) {
    if let Some(position) = registry.get_mut::<Position>(entity) {
        f(position);
    }
}
