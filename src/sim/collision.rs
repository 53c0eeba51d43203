//! Axis-aligned rectangle overlap
//!
//! Every gameplay collision is a box test. Touching edges do not count.

use glam::Vec2;

/// An axis-aligned rectangle (top-left origin, y down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Strict overlap on all four sides: zero-area contact is a miss
    pub fn overlaps(&self, other: &Rect) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        self.min.x < b_max.x && a_max.x > other.min.x && self.min.y < b_max.y && a_max.y > other.min.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::new(Vec2::new(x, y), Vec2::new(w, h))
    }

    #[test]
    fn test_overlap_hit() {
        let a = rect(0.0, 0.0, 20.0, 20.0);
        let b = rect(10.0, 10.0, 30.0, 50.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_touching_edges_miss() {
        let target = rect(100.0, 540.0, 30.0, 50.0);
        // Flush against each side of the target
        assert!(!rect(80.0, 550.0, 20.0, 20.0).overlaps(&target)); // left
        assert!(!rect(130.0, 550.0, 20.0, 20.0).overlaps(&target)); // right
        assert!(!rect(105.0, 520.0, 20.0, 20.0).overlaps(&target)); // top
        assert!(!rect(105.0, 590.0, 20.0, 20.0).overlaps(&target)); // bottom
    }

    #[test]
    fn test_contained_rect_overlaps() {
        let outer = rect(0.0, 0.0, 100.0, 100.0);
        let inner = rect(40.0, 40.0, 4.0, 4.0);
        assert!(outer.overlaps(&inner));
    }

    #[test]
    fn test_disjoint_miss() {
        assert!(!rect(0.0, 0.0, 10.0, 10.0).overlaps(&rect(50.0, 50.0, 10.0, 10.0)));
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            aw in 1.0f32..100.0, ah in 1.0f32..100.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0,
            bw in 1.0f32..100.0, bh in 1.0f32..100.0,
        ) {
            let a = rect(ax, ay, aw, ah);
            let b = rect(bx, by, bw, bh);
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }

        #[test]
        fn rect_overlaps_itself(x in -500.0f32..500.0, y in -500.0f32..500.0, w in 1.0f32..100.0, h in 1.0f32..100.0) {
            let a = rect(x, y, w, h);
            prop_assert!(a.overlaps(&a));
        }
    }
}
