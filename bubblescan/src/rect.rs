//! Integer rectangles in image pixel space.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle `{x, y, width, height}` in pixel coordinates.
///
/// Covers columns `x..x + width` and rows `y..y + height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Rect {
    #[inline]
    pub const fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle covering a whole `width x height` image.
    #[inline]
    pub const fn full(width: usize, height: usize) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Rectangle spanning inclusive pixel bounds.
    #[inline]
    pub const fn from_bounds(x_min: usize, y_min: usize, x_max: usize, y_max: usize) -> Self {
        Self::new(x_min, y_min, x_max - x_min + 1, y_max - y_min + 1)
    }

    /// Exclusive right edge.
    #[inline]
    pub const fn right(&self) -> usize {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    #[inline]
    pub const fn bottom(&self) -> usize {
        self.y + self.height
    }

    #[inline]
    pub const fn area(&self) -> usize {
        self.width * self.height
    }

    /// `width / height`.
    #[inline]
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    /// Whether the rectangle lies inside a `width x height` image.
    #[inline]
    pub const fn fits_within(&self, width: usize, height: usize) -> bool {
        self.width >= 1 && self.height >= 1 && self.right() <= width && self.bottom() <= height
    }

    pub fn intersection_area(&self, other: &Rect) -> usize {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        x1.saturating_sub(x0) * y1.saturating_sub(y0)
    }

    /// Intersection over union of the two areas, 0 when disjoint.
    pub fn iou(&self, other: &Rect) -> f64 {
        let intersection = self.intersection_area(other);
        if intersection == 0 {
            return 0.0;
        }
        let union = self.area() + other.area() - intersection;
        intersection as f64 / union as f64
    }

    /// Smallest rectangle containing both.
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(x, y, right - x, bottom - y)
    }

    /// Whether the two rectangles share a region of positive area.
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.intersection_area(other) > 0
    }

    /// Whether `other` overlaps this rectangle grown by `margin` on every side.
    ///
    /// The grown rectangle is not clipped, so boxes on the image border are
    /// treated the same as interior ones.
    pub fn is_within_margin(&self, other: &Rect, margin: usize) -> bool {
        let x0 = self.x as isize - margin as isize;
        let y0 = self.y as isize - margin as isize;
        let x1 = (self.right() + margin) as isize;
        let y1 = (self.bottom() + margin) as isize;

        x0 < other.right() as isize
            && (other.x as isize) < x1
            && y0 < other.bottom() as isize
            && (other.y as isize) < y1
    }

    /// Grow by `pad` on every side, clamped to a `width x height` image.
    ///
    /// Each side is clamped on its own: a box cut off at the left or top edge
    /// is not widened on the opposite side to make up for the lost padding.
    pub fn padded(&self, pad: usize, width: usize, height: usize) -> Rect {
        let x = self.x.saturating_sub(pad);
        let y = self.y.saturating_sub(pad);
        let right = (self.right() + pad).min(width);
        let bottom = (self.bottom() + pad).min(height);
        Rect::new(x, y, right - x, bottom - y)
    }
}

impl From<Rect> for imageproc::rect::Rect {
    fn from(rect: Rect) -> Self {
        imageproc::rect::Rect::at(rect.x as i32, rect.y as i32)
            .of_size(rect.width as u32, rect.height as u32)
    }
}
