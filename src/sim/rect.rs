//! Axis-aligned boxes, the only collision shape the sim uses.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box, stored as top-left corner plus size.
///
/// World coordinates are y-down: `top()` is the smaller y, `bottom()` the
/// larger. Overlap tests are strict, so boxes sharing an edge do not overlap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Aabb {
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

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Strict overlap test; edge contact does not count.
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Point containment, inclusive of the top-left edges.
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.left() && p.x < self.right() && p.y >= self.top() && p.y < self.bottom()
    }

    /// Grown by `by` on every side (shrinks when negative).
    pub fn inflated(&self, by: f32) -> Aabb {
        Aabb {
            pos: self.pos - Vec2::splat(by),
            size: self.size + Vec2::splat(by * 2.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlaps_basic() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::new(5.0, 5.0, 10.0, 10.0);
        let c = Aabb::new(20.0, 20.0, 5.0, 5.0);

        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_overlaps_edge_contact_excluded() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        // Shares the x=10 edge exactly
        let b = Aabb::new(10.0, 0.0, 10.0, 10.0);
        // Shares the y=10 edge exactly
        let c = Aabb::new(0.0, 10.0, 10.0, 10.0);

        assert!(!a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_contains() {
        let a = Aabb::new(10.0, 20.0, 30.0, 40.0);

        assert!(a.contains(Vec2::new(10.0, 20.0)));
        assert!(a.contains(Vec2::new(25.0, 45.0)));
        assert!(!a.contains(Vec2::new(40.0, 30.0)));
        assert!(!a.contains(Vec2::new(9.9, 30.0)));
    }

    #[test]
    fn test_inflated() {
        let a = Aabb::new(10.0, 10.0, 20.0, 20.0);
        let grown = a.inflated(3.0);

        assert_eq!(grown.left(), 7.0);
        assert_eq!(grown.top(), 7.0);
        assert_eq!(grown.right(), 33.0);
        assert_eq!(grown.bottom(), 33.0);

        // A box flush against the original overlaps the inflated one
        let flush = Aabb::new(30.0, 10.0, 10.0, 10.0);
        assert!(!a.overlaps(&flush));
        assert!(grown.overlaps(&flush));
    }

    #[test]
    fn test_edges_and_center() {
        let a = Aabb::new(100.0, 200.0, 40.0, 60.0);

        assert_eq!(a.left(), 100.0);
        assert_eq!(a.right(), 140.0);
        assert_eq!(a.top(), 200.0);
        assert_eq!(a.bottom(), 260.0);
        assert_eq!(a.center(), Vec2::new(120.0, 230.0));
    }
}
