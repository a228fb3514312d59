//! Collision detection
//!
//! Two cases: a pointer press against the bubble set, and the player's car
//! against the falling obstacles (axis-aligned boxes with forgiving edges).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bubble::Bubble;

/// Axis-aligned rectangle, top-left origin (screen space, y grows down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Strict overlap test (touching edges do not count)
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Overlapping region, if any
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        if !self.overlaps(other) {
            return None;
        }
        let min = self.pos.max(other.pos);
        let max = Vec2::new(self.right(), self.bottom()).min(Vec2::new(other.right(), other.bottom()));
        Some(Rect {
            pos: min,
            size: max - min,
        })
    }
}

/// Check two car boxes with forgiving edges.
///
/// On each axis the boxes must overlap by more than `padding` before it
/// counts, so grazing contact inside the padding band is ignored.
#[inline]
pub fn padded_overlap(a: &Rect, b: &Rect, padding: f32) -> bool {
    a.left() + padding < b.right()
        && a.right() - padding > b.left()
        && a.top() + padding < b.bottom()
        && a.bottom() - padding > b.top()
}

/// Index of the first rect (in store order) that hits `player`.
///
/// Scanning stops at the first hit.
pub fn first_hit<'a, I>(player: &Rect, obstacles: I, padding: f32) -> Option<usize>
where
    I: IntoIterator<Item = &'a Rect>,
{
    obstacles
        .into_iter()
        .position(|rect| padded_overlap(player, rect, padding))
}

/// Index of the bubble a press at `point` pops, if any.
///
/// Scans newest to oldest so overlapping bubbles favor the topmost one; a hit
/// needs the center within `radius + tolerance`.
pub fn pop_target(bubbles: &[Bubble], point: Vec2, tolerance: f32) -> Option<usize> {
    bubbles
        .iter()
        .rposition(|b| b.pos.distance(point) < b.radius + tolerance)
}
