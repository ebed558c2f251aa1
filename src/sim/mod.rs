//! Deterministic simulation module
//!
//! All physics lives here. This module must be pure and deterministic:
//! - Caller-provided timestep only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod components;
pub mod membership;
pub mod rect;
pub mod registry;
pub mod resolve;
pub mod stage;
pub mod tick;

pub use collision::{Contact, body_rect, collisions};
pub use components::{Block, Collidable, Player, Position, Sprite, Velocity};
pub use membership::Membership;
pub use rect::{Direction, Rect, classify, is_out_of_screen};
pub use registry::{Component, ComponentStorage, EntityBuilder, EntityEvent, EntityId, Registry};
pub use resolve::{Mover, Resolution};
pub use stage::Stage;
pub use tick::{EntityChanges, PhysicsSystem};
