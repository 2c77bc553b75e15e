use bytemuck::{Pod, Zeroable};

/// Axis-aligned rectangle, layout-compatible with `GPU_Rect`.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Builds a rect from two corner points, as taken by the `x1, y1, x2, y2`
    /// drawing calls.
    #[inline]
    pub fn from_corners(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Rect::new(x1, y1, x2 - x1, y2 - y1).normalized()
    }

    #[inline]
    pub fn right(self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.w <= 0.0 || self.h <= 0.0
    }

    /// Normalizes the rectangle so width/height are non-negative.
    #[inline]
    pub fn normalized(self) -> Self {
        let mut r = self;
        if r.w < 0.0 {
            r.x += r.w;
            r.w = -r.w;
        }
        if r.h < 0.0 {
            r.y += r.h;
            r.h = -r.h;
        }
        r
    }

    /// Half-open containment: [min, max).
    #[inline]
    pub fn contains(self, px: f32, py: f32) -> bool {
        let r = self.normalized();
        px >= r.x && py >= r.y && px < r.right() && py < r.bottom()
    }

    #[inline]
    pub fn intersect(self, other: Rect) -> Option<Rect> {
        let a = self.normalized();
        let b = other.normalized();

        let x0 = a.x.max(b.x);
        let y0 = a.y.max(b.y);
        let x1 = a.right().min(b.right());
        let y1 = a.bottom().min(b.bottom());

        let w = x1 - x0;
        let h = y1 - y0;

        if w <= 0.0 || h <= 0.0 {
            None
        } else {
            Some(Rect::new(x0, y0, w, h))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: f32, y: f32, w: f32, h: f32) -> Rect { Rect::new(x, y, w, h) }

    // ── normalized ────────────────────────────────────────────────────────

    #[test]
    fn normalized_positive_is_identity() {
        let rect = r(1.0, 2.0, 10.0, 20.0);
        assert_eq!(rect.normalized(), rect);
    }

    #[test]
    fn normalized_negative_width() {
        let n = r(10.0, 0.0, -4.0, 5.0).normalized();
        assert_eq!(n.x, 6.0);
        assert_eq!(n.w, 4.0);
    }

    #[test]
    fn from_corners_accepts_reversed_points() {
        assert_eq!(Rect::from_corners(10.0, 10.0, 0.0, 4.0), r(0.0, 4.0, 10.0, 6.0));
    }

    // ── contains ──────────────────────────────────────────────────────────

    #[test]
    fn contains_top_left_inclusive() {
        assert!(r(0.0, 0.0, 10.0, 10.0).contains(0.0, 0.0));
    }

    #[test]
    fn contains_bottom_right_exclusive() {
        assert!(!r(0.0, 0.0, 10.0, 10.0).contains(10.0, 10.0));
    }

    // ── intersect ─────────────────────────────────────────────────────────

    #[test]
    fn intersect_overlapping() {
        let i = r(0.0, 0.0, 10.0, 10.0).intersect(r(5.0, 5.0, 10.0, 10.0)).unwrap();
        assert_eq!(i, r(5.0, 5.0, 5.0, 5.0));
    }

    #[test]
    fn intersect_touching_edge_returns_none() {
        assert!(r(0.0, 0.0, 10.0, 10.0).intersect(r(10.0, 0.0, 10.0, 10.0)).is_none());
    }

    // ── layout ────────────────────────────────────────────────────────────

    #[test]
    fn rect_is_four_packed_floats() {
        let raw: [f32; 4] = bytemuck::cast(r(1.0, 2.0, 3.0, 4.0));
        assert_eq!(raw, [1.0, 2.0, 3.0, 4.0]);
    }
}
