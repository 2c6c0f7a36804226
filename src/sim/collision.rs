//! Axis-aligned collision geometry

use glam::Vec2;

/// Axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Strict overlap test; rectangles that only share an edge do not overlap
    pub fn overlaps(&self, other: &Rect) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        a_max.x > other.min.x
            && self.min.x < b_max.x
            && a_max.y > other.min.y
            && self.min.y < b_max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_inside() {
        let paddle = Rect::new(100.0, 500.0, 90.0, 28.0);
        let square = Rect::new(120.0, 490.0, 24.0, 24.0);
        assert!(paddle.overlaps(&square));
        assert!(square.overlaps(&paddle));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let paddle = Rect::new(100.0, 500.0, 90.0, 28.0);
        // Bottom edge of the square exactly on the paddle's top edge
        let above = Rect::new(120.0, 476.0, 24.0, 24.0);
        assert!(!paddle.overlaps(&above));
        // Right edge of the square exactly on the paddle's left edge
        let left = Rect::new(76.0, 505.0, 24.0, 24.0);
        assert!(!paddle.overlaps(&left));
    }

    #[test]
    fn test_disjoint_horizontally() {
        let paddle = Rect::new(100.0, 500.0, 90.0, 28.0);
        let square = Rect::new(300.0, 505.0, 24.0, 24.0);
        assert!(!paddle.overlaps(&square));
    }

    #[test]
    fn test_center() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.center(), Vec2::new(25.0, 40.0));
        assert_eq!(r.max(), Vec2::new(40.0, 60.0));
    }
}
