//! Collision detection for the bird against pipes, eggs and the ground
//!
//! Everything is axis-aligned: the bird is a (shrunk) box, pipe segments are
//! boxes, and eggs are picked up by distance from the bird's center.

use glam::Vec2;

use super::state::{Bird, Pipe};
use crate::consts::EGG_PICKUP_RADIUS;

/// Axis-aligned rectangle in playfield pixels (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Shrink by `margin` on every side
    pub fn inset(&self, margin: f32) -> Self {
        Self {
            left: self.left + margin,
            top: self.top + margin,
            width: (self.width - 2.0 * margin).max(0.0),
            height: (self.height - 2.0 * margin).max(0.0),
        }
    }

    /// Strict overlap; touching edges do not count
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.right() > other.left
            && self.left < other.right()
            && self.bottom() > other.top
            && self.top < other.bottom()
    }
}

/// Which part of a pipe the bird flew into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipeSegment {
    Top,
    Bottom,
}

/// Check the bird's hitbox against both segments of a pipe
pub fn bird_pipe_collision(bird: &Bird, pipe: &Pipe, gap: f32) -> Option<PipeSegment> {
    let hitbox = bird.hitbox();
    if hitbox.overlaps(&pipe.top_rect()) {
        Some(PipeSegment::Top)
    } else if hitbox.overlaps(&pipe.bottom_rect(gap)) {
        Some(PipeSegment::Bottom)
    } else {
        None
    }
}

/// Check whether the bird is close enough to grab a pipe's uncollected egg
pub fn egg_in_reach(bird: &Bird, pipe: &Pipe) -> bool {
    match (pipe.egg, pipe.egg_center()) {
        (Some(egg), Some(center)) if !egg.collected => {
            within_radius(bird.center(), center, EGG_PICKUP_RADIUS)
        }
        _ => false,
    }
}

/// Euclidean proximity test (strictly inside)
#[inline]
pub fn within_radius(a: Vec2, b: Vec2, radius: f32) -> bool {
    a.distance(b) < radius
}

/// Check if the bird has sunk past the ground boundary
#[inline]
pub fn bird_ground_collision(bird: &Bird) -> bool {
    bird.y > crate::ground_limit()
}
