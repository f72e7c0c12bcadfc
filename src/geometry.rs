//! Geometry primitives used by the tiling engine.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A host-space pixel rectangle: top left corner + extent.
///
/// Mirrors the shape of a `wlr_box` on the host side but carries no
/// dependency on any particular Wayland backend.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Default, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Rect {
    /// The x-coordinate of the top left corner of this rect.
    pub x: i32,
    /// The y-coordinate of the top left corner of this rect.
    pub y: i32,
    /// The width of this rect.
    pub w: u32,
    /// The height of this rect.
    pub h: u32,
}

impl Rect {
    /// Create a new [Rect].
    pub fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Shrink this rect on all four sides by `gap_px`, used for the root
    /// area's outer padding. Saturates at zero rather than going negative.
    pub fn shrink(&self, gap_px: u32) -> Self {
        let g = gap_px as i32;
        let shrink_dim = |d: u32| d.saturating_sub(2 * gap_px);

        Self {
            x: self.x + g,
            y: self.y + g,
            w: shrink_dim(self.w),
            h: shrink_dim(self.h),
        }
    }

    /// Split this rect vertically (left/right children) at `ratio` along its
    /// width, subtracting half of `gap_px` from the touching edge of each
    /// side when `gap_px > 0`. `ratio` is not re-clamped here: callers are
    /// expected to have already clamped it via [`Config`][crate::config::Config].
    pub fn split_vertical(&self, ratio: f32, gap_px: u32) -> (Self, Self) {
        let mid = (self.w as f32 * ratio) as u32;
        let mut left = Self {
            x: self.x,
            y: self.y,
            w: mid,
            h: self.h,
        };
        let mut right = Self {
            x: self.x + mid as i32,
            y: self.y,
            w: self.w - mid,
            h: self.h,
        };

        if gap_px > 0 {
            let half = gap_px / 2;
            left.w = left.w.saturating_sub(half);
            right.x += half as i32;
            right.w = right.w.saturating_sub(half);
        }

        (left, right)
    }

    /// Split this rect horizontally (top/bottom children) at `ratio` along
    /// its height, with the same gap handling as [`split_vertical`][Rect::split_vertical].
    pub fn split_horizontal(&self, ratio: f32, gap_px: u32) -> (Self, Self) {
        let mid = (self.h as f32 * ratio) as u32;
        let mut top = Self {
            x: self.x,
            y: self.y,
            w: self.w,
            h: mid,
        };
        let mut bottom = Self {
            x: self.x,
            y: self.y + mid as i32,
            w: self.w,
            h: self.h - mid,
        };

        if gap_px > 0 {
            let half = gap_px / 2;
            top.h = top.h.saturating_sub(half);
            bottom.y += half as i32;
            bottom.h = bottom.h.saturating_sub(half);
        }

        (top, bottom)
    }

    /// The aspect ratio (`w / h`) of this rect, used by the aspect policy.
    /// Returns `0.0` for a zero-height rect rather than dividing by zero.
    pub fn aspect(&self) -> f32 {
        if self.h == 0 {
            return 0.0;
        }

        self.w as f32 / self.h as f32
    }

    /// The smallest [Rect] containing both `self` and `other`.
    pub fn union(&self, other: &Self) -> Self {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = (self.x + self.w as i32).max(other.x + other.w as i32);
        let bottom = (self.y + self.h as i32).max(other.y + other.h as i32);

        Self {
            x,
            y,
            w: (right - x) as u32,
            h: (bottom - y) as u32,
        }
    }

    /// Whether `p` (given as an `(x, y)` pair) falls within this rect.
    pub fn contains_point(&self, p: (i32, i32)) -> bool {
        let (x, y) = p;

        (self.x..(self.x + self.w as i32)).contains(&x)
            && (self.y..(self.y + self.h as i32)).contains(&y)
    }

    /// The center point of this rect, as used by [`nearest_client_to_point`][crate::query::nearest_client_to_point]
    /// and directional swap scoring.
    pub fn center(&self) -> (i32, i32) {
        (self.x + self.w as i32 / 2, self.y + self.h as i32 / 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simple_test_case::test_case;

    #[test_case(Rect::new(0, 0, 1920, 1080), 0, Rect::new(0, 0, 1920, 1080); "no gap")]
    #[test_case(Rect::new(0, 0, 1920, 1080), 10, Rect::new(10, 10, 1900, 1060); "with gap")]
    #[test]
    fn shrink(r: Rect, gap: u32, expected: Rect) {
        assert_eq!(r.shrink(gap), expected);
    }

    #[test]
    fn split_vertical_no_gap_covers_area() {
        let r = Rect::new(0, 0, 1920, 1080);
        let (left, right) = r.split_vertical(0.5, 0);

        assert_eq!(left, Rect::new(0, 0, 960, 1080));
        assert_eq!(right, Rect::new(960, 0, 960, 1080));
    }

    #[test]
    fn split_vertical_with_gap_leaves_one_gap_between_siblings() {
        let r = Rect::new(0, 0, 1920, 1080);
        let (left, right) = r.split_vertical(0.5, 10);

        assert_eq!(left.w, 955);
        assert_eq!(right.x - (left.x + left.w as i32), 10);
    }

    #[test_case(1920, 1080, 2; "16:9")]
    #[test_case(3440, 1440, 3; "ultrawide")]
    #[test_case(5120, 1440, 4; "super ultrawide")]
    #[test]
    fn aspect_thresholds(w: u32, h: u32, expected_cols: u32) {
        let r = Rect::new(0, 0, w, h);
        let cols = crate::query::target_columns(r);

        assert_eq!(cols, expected_cols);
    }

    #[test]
    fn union_covers_both() {
        let a = Rect::new(0, 0, 100, 100);
        let b = Rect::new(50, 50, 100, 100);

        assert_eq!(a.union(&b), Rect::new(0, 0, 150, 150));
    }
}
