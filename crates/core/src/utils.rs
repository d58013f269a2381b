//! Geometric primitives shared by every reconstruction stage.
//!
//! All rectangles use a flipped-Y convention: `y` grows upward from the bottom
//! edge of the page, so `top >= bottom` for every well-formed rectangle. Raw
//! OCR boxes (origin top-left, `y` growing downward) are converted exactly
//! once, by [`Rect::from_pixels`], when tokens are ingested.

use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;

use serde::Serialize;

/// An axis-aligned pixel rectangle in flipped-Y page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rect {
    pub left: i32,
    pub right: i32,
    pub bottom: i32,
    pub top: i32,
}

impl Rect {
    /// Creates a rectangle from its horizontal extent and flipped-Y vertical extent.
    pub const fn new(left: i32, right: i32, bottom: i32, top: i32) -> Self {
        Self {
            left,
            right,
            bottom,
            top,
        }
    }

    /// Converts an OCR pixel box (top-left origin) into flipped-Y coordinates.
    pub const fn from_pixels(left: i32, top: i32, width: i32, height: i32, page_height: i32) -> Self {
        Self {
            left,
            right: left + width,
            bottom: page_height - top - height,
            top: page_height - top,
        }
    }

    pub const fn width(&self) -> i32 {
        self.right - self.left
    }

    pub const fn height(&self) -> i32 {
        self.top - self.bottom
    }

    /// Componentwise union; the result covers both inputs.
    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            left: self.left.min(other.left),
            right: self.right.max(other.right),
            bottom: self.bottom.min(other.bottom),
            top: self.top.max(other.top),
        }
    }

    /// Grows the rectangle by `pad` pixels on every side.
    pub const fn padded(&self, pad: i32) -> Rect {
        Rect {
            left: self.left - pad,
            right: self.right + pad,
            bottom: self.bottom - pad,
            top: self.top + pad,
        }
    }

    /// Returns true if the closed horizontal ranges share at least one pixel.
    pub const fn is_hoverlap(&self, other: &Rect) -> bool {
        other.left <= self.right && self.left <= other.right
    }

    /// Returns true if the closed vertical ranges share at least one pixel.
    pub const fn is_voverlap(&self, other: &Rect) -> bool {
        other.bottom <= self.top && self.bottom <= other.top
    }

    /// Returns true if `other` lies entirely inside this rectangle.
    pub const fn contains(&self, other: &Rect) -> bool {
        self.left <= other.left
            && other.right <= self.right
            && self.bottom <= other.bottom
            && other.top <= self.top
    }

    /// Maps the rectangle back to a top-left-origin pixel crop `(x, y, w, h)`.
    ///
    /// The crop is grown by `pad` and clamped to the page. Returns `None` when
    /// nothing of the rectangle lies on the page.
    pub fn to_pixel_crop(
        &self,
        pad: i32,
        page_width: u32,
        page_height: u32,
    ) -> Option<(u32, u32, u32, u32)> {
        let page_w = i64::from(page_width);
        let page_h = i64::from(page_height);
        let x0 = (i64::from(self.left) - i64::from(pad)).clamp(0, page_w);
        let x1 = (i64::from(self.right) + i64::from(pad)).clamp(0, page_w);
        let y0 = (page_h - i64::from(self.top) - i64::from(pad)).clamp(0, page_h);
        let y1 = (page_h - i64::from(self.bottom) + i64::from(pad)).clamp(0, page_h);

        if x1 <= x0 || y1 <= y0 {
            return None;
        }

        Some((x0 as u32, y0 as u32, (x1 - x0) as u32, (y1 - y0) as u32))
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.left, self.bottom, self.right, self.top)
    }
}

/// Trait for layout objects that carry a bounding box.
pub trait HasBBox {
    fn bbox(&self) -> Rect;

    fn width(&self) -> i32 {
        self.bbox().width()
    }

    fn height(&self) -> i32 {
        self.bbox().height()
    }
}

impl HasBBox for Rect {
    fn bbox(&self) -> Rect {
        *self
    }
}

/// Computes the union of all boxes, or `None` for an empty iterator.
pub fn get_bound<'a, T, I>(objs: I) -> Option<Rect>
where
    T: HasBBox + 'a,
    I: IntoIterator<Item = &'a T>,
{
    objs.into_iter().fold(None, |acc, obj| {
        let r = obj.bbox();
        Some(match acc {
            None => r,
            Some(b) => b.union(&r),
        })
    })
}

/// Eliminates duplicated elements, keeping first occurrences in order.
pub fn uniq<T: Eq + Hash + Clone>(objs: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut done = HashSet::new();
    let mut result = Vec::new();
    for obj in objs {
        if done.insert(obj.clone()) {
            result.push(obj);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pixels_flips_y() {
        let r = Rect::from_pixels(10, 20, 30, 5, 100);
        assert_eq!(r, Rect::new(10, 40, 75, 80));
        assert_eq!(r.height(), 5);
        assert_eq!(r.width(), 30);
    }

    #[test]
    fn test_union_never_shrinks() {
        let a = Rect::new(0, 10, 0, 10);
        let b = Rect::new(5, 20, -3, 8);
        let u = a.union(&b);
        assert_eq!(u, Rect::new(0, 20, -3, 10));
        assert!(u.contains(&a));
        assert!(u.contains(&b));
    }

    #[test]
    fn test_padded_overlap() {
        let a = Rect::new(0, 10, 0, 10);
        let b = Rect::new(13, 20, 0, 10);
        assert!(!a.is_hoverlap(&b));
        assert!(a.padded(2).is_hoverlap(&b.padded(2)));
        assert!(a.is_voverlap(&b));
    }

    #[test]
    fn test_to_pixel_crop_clamps_to_page() {
        let r = Rect::from_pixels(2, 3, 10, 10, 50);
        assert_eq!(r.to_pixel_crop(5, 100, 50), Some((0, 0, 17, 18)));

        let off_page = Rect::new(200, 210, 0, 10);
        assert_eq!(off_page.to_pixel_crop(5, 100, 50), None);
    }

    #[test]
    fn test_get_bound() {
        let rects = [Rect::new(0, 1, 0, 1), Rect::new(4, 6, -2, 0)];
        assert_eq!(get_bound(&rects), Some(Rect::new(0, 6, -2, 1)));
        assert_eq!(get_bound(&[] as &[Rect]), None);
    }

    #[test]
    fn test_uniq() {
        let v = vec!["a", "b", "a", "c", "b"];
        assert_eq!(uniq(v), vec!["a", "b", "c"]);
    }
}
