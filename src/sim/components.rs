//! Physics components
//!
//! Plain data attached to entities. Behavior lives in the physics system.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// World position of an entity
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    /// Despawn the entity once it leaves the screen through the top/left edge
    #[serde(default)]
    pub delete_if_out_of_screen: bool,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            delete_if_out_of_screen: false,
        }
    }

    pub fn with_despawn(mut self) -> Self {
        self.delete_if_out_of_screen = true;
        self
    }

    #[inline]
    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[inline]
    pub fn set_vec2(&mut self, v: Vec2) {
        self.x = v.x;
        self.y = v.y;
    }
}

/// Displacement per second
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity(pub Vec2);

impl Velocity {
    pub fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }
}

/// Sprite extent used as the collision box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    pub size: Vec2,
    /// Position marks the center of the sprite instead of its top-left corner
    #[serde(default)]
    pub centered: bool,
}

impl Sprite {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            centered: false,
        }
    }

    pub fn centered(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            centered: true,
        }
    }
}

/// Takes part in collisions.
///
/// On contact the body with the strictly higher priority pushes the other;
/// on a tie or lower priority the moving body yields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collidable {
    pub priority: i32,
}

impl Collidable {
    pub fn new(priority: i32) -> Self {
        Self { priority }
    }
}

/// Environment geometry. Blocks never collide with each other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block;

/// Player-controlled entity, kept from leaving the screen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player;
