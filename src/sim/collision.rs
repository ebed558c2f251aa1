//! Collision queries against the collidable set

use std::collections::BTreeSet;

use super::components::{Block, Collidable, Position, Sprite};
use super::rect::{Direction, Rect, classify};
use super::registry::{EntityId, Registry};

/// A body overlapping the subject, and on which side(s)
pub type Contact = (EntityId, Direction);

/// Bounding box of an entity, if it has a body
pub fn body_rect(registry: &Registry, entity: EntityId) -> Option<Rect> {
    let position = registry.get::<Position>(entity)?;
    let sprite = registry.get::<Sprite>(entity)?;
    Some(Rect::from_parts(position, sprite))
}

/// Every collidable body currently overlapping `subject`.
///
/// Empty when the subject isn't collidable. Blocks never collide with
/// other blocks. Results follow the ascending id order of `collidable`.
pub fn collisions(
    registry: &Registry,
    collidable: &BTreeSet<EntityId>,
    subject: EntityId,
) -> Vec<Contact> {
    let mut contacts = Vec::new();
    if !registry.has::<Collidable>(subject) {
        return contacts;
    }
    let Some(subject_rect) = body_rect(registry, subject) else {
        return contacts;
    };
    let subject_is_block = registry.has::<Block>(subject);

    for &other in collidable {
        if other == subject || !registry.has::<Collidable>(other) {
            continue;
        }
        if subject_is_block && registry.has::<Block>(other) {
            continue;
        }
        let Some(other_rect) = body_rect(registry, other) else {
            continue;
        };
        let direction = classify(&subject_rect, &other_rect);
        if !direction.is_none() {
            contacts.push((other, direction));
        }
    }
    contacts
}
