//! Axis-aligned rectangle geometry
//!
//! Every physics body is an AABB built from its position and sprite extent.
//! Overlap is classified into direction flags relative to the top-left
//! corners of the two rectangles.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};

use super::components::{Position, Sprite};
use crate::consts::{SCREEN_LEFT, SCREEN_TOP};

/// An axis-aligned bounding box in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Build the bounding box of a body.
    ///
    /// A centered sprite puts the position at the middle of the box,
    /// otherwise the position is the top-left corner.
    pub fn from_parts(position: &Position, sprite: &Sprite) -> Self {
        let mut origin = position.as_vec2();
        if sprite.centered {
            origin -= sprite.size / 2.0;
        }
        Self::new(origin.x, origin.y, sprite.size.x, sprite.size.y)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Strict overlap test: rectangles that only share an edge don't intersect.
    ///
    /// Negative extents are normalized first, so a box described from its
    /// bottom-right corner still behaves.
    pub fn intersects(&self, other: &Rect) -> bool {
        let (a_min_x, a_max_x) = min_max(self.left, self.right());
        let (a_min_y, a_max_y) = min_max(self.top, self.bottom());
        let (b_min_x, b_max_x) = min_max(other.left, other.right());
        let (b_min_y, b_max_y) = min_max(other.top, other.bottom());

        let inter_left = a_min_x.max(b_min_x);
        let inter_top = a_min_y.max(b_min_y);
        let inter_right = a_max_x.min(b_max_x);
        let inter_bottom = a_max_y.min(b_max_y);

        inter_left < inter_right && inter_top < inter_bottom
    }
}

#[inline]
fn min_max(a: f32, b: f32) -> (f32, f32) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Which side(s) of the other rectangle a collision happened on.
///
/// Flags are not exclusive: a diagonal overlap sets one vertical and one
/// horizontal flag.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Direction(u8);

impl Direction {
    pub const NONE: Direction = Direction(0);
    pub const TOP: Direction = Direction(1);
    pub const BOTTOM: Direction = Direction(1 << 1);
    pub const LEFT: Direction = Direction(1 << 2);
    pub const RIGHT: Direction = Direction(1 << 3);

    #[inline]
    pub fn is_none(self) -> bool {
        self.0 == 0
    }

    /// True if every flag of `other` is set
    #[inline]
    pub fn contains(self, other: Direction) -> bool {
        self.0 & other.0 == other.0
    }

    /// True if any flag of `other` is set
    #[inline]
    pub fn intersects(self, other: Direction) -> bool {
        self.0 & other.0 != 0
    }

    /// Collision happened along the x axis (LEFT or RIGHT)
    #[inline]
    pub fn is_horizontal(self) -> bool {
        self.intersects(Direction::LEFT | Direction::RIGHT)
    }

    /// Collision happened along the y axis (TOP or BOTTOM)
    #[inline]
    pub fn is_vertical(self) -> bool {
        self.intersects(Direction::TOP | Direction::BOTTOM)
    }
}

impl BitOr for Direction {
    type Output = Direction;

    fn bitor(self, rhs: Direction) -> Direction {
        Direction(self.0 | rhs.0)
    }
}

impl BitOrAssign for Direction {
    fn bitor_assign(&mut self, rhs: Direction) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            return f.write_str("NONE");
        }
        let names = [
            (Direction::TOP, "TOP"),
            (Direction::BOTTOM, "BOTTOM"),
            (Direction::LEFT, "LEFT"),
            (Direction::RIGHT, "RIGHT"),
        ];
        let mut first = true;
        for (flag, name) in names {
            if self.contains(flag) {
                if !first {
                    f.write_str(" | ")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Classify the overlap of `a` against `b`.
///
/// Returns `NONE` when the boxes don't intersect, and also when they share
/// the exact same top-left corner (no direction can be derived).
pub fn classify(a: &Rect, b: &Rect) -> Direction {
    let mut direction = Direction::NONE;
    if !a.intersects(b) {
        return direction;
    }
    if a.top < b.top {
        direction |= Direction::TOP;
    }
    if a.top > b.top {
        direction |= Direction::BOTTOM;
    }
    if a.left < b.left {
        direction |= Direction::LEFT;
    }
    if a.left > b.left {
        direction |= Direction::RIGHT;
    }
    direction
}

/// A body is off screen once it has fully crossed the top or left edge.
///
/// Right and bottom edges are never checked: the stage scrolls and bodies
/// spawn past them.
pub fn is_out_of_screen(rect: &Rect) -> bool {
    rect.right() < SCREEN_LEFT || rect.bottom() < SCREEN_TOP
}
