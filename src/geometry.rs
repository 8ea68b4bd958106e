//! Axis-aligned integer rectangles.
//!
//! Coordinates are pixels with the origin at the top-left corner. Negative
//! widths or heights are representable (they can arrive from callers) but are
//! treated as empty by every derived operation.

/// Axis-aligned rectangle in integer pixel coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl Rect {
    /// Creates a rectangle from its top-left corner and size.
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns true when the rectangle covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Exclusive right edge.
    pub fn right(&self) -> i64 {
        i64::from(self.x) + i64::from(self.width.max(0))
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> i64 {
        i64::from(self.y) + i64::from(self.height.max(0))
    }

    /// Pixel area; zero for empty rectangles.
    pub fn area(&self) -> i64 {
        i64::from(self.width.max(0)) * i64::from(self.height.max(0))
    }

    /// Overlapping region, or an empty rectangle at the origin when disjoint.
    pub fn intersection(&self, other: &Rect) -> Rect {
        let x0 = i64::from(self.x).max(i64::from(other.x));
        let y0 = i64::from(self.y).max(i64::from(other.y));
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        if x1 <= x0 || y1 <= y0 {
            return Rect::default();
        }
        // Both corners lie inside i32 rectangles, so the narrowing is lossless.
        Rect::new(x0 as i32, y0 as i32, (x1 - x0) as i32, (y1 - y0) as i32)
    }

    /// Smallest rectangle containing both inputs; empty inputs are ignored.
    pub fn union(&self, other: &Rect) -> Rect {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        let x0 = self.x.min(other.x);
        let y0 = self.y.min(other.y);
        let x1 = self.right().max(other.right());
        let y1 = self.bottom().max(other.bottom());
        let width = (x1 - i64::from(x0)).min(i64::from(i32::MAX)) as i32;
        let height = (y1 - i64::from(y0)).min(i64::from(i32::MAX)) as i32;
        Rect::new(x0, y0, width, height)
    }

    /// Intersection over union; `0.0` when the union has no area.
    pub fn iou(&self, other: &Rect) -> f32 {
        let inter = self.intersection(other).area();
        let union = self.area() + other.area() - inter;
        if union <= 0 {
            return 0.0;
        }
        (inter as f64 / union as f64) as f32
    }

    /// Returns true when `self` lies fully inside a `width`x`height` image.
    pub fn fits_within(&self, width: usize, height: usize) -> bool {
        !self.is_empty()
            && self.x >= 0
            && self.y >= 0
            && self.right() <= width as i64
            && self.bottom() <= height as i64
    }

    /// Clips the rectangle to a `width`x`height` image.
    ///
    /// Returns `None` when nothing of the rectangle remains inside the image.
    pub fn clamp_to(&self, width: usize, height: usize) -> Option<Rect> {
        let bounds = Rect::new(
            0,
            0,
            width.min(i32::MAX as usize) as i32,
            height.min(i32::MAX as usize) as i32,
        );
        let clipped = self.intersection(&bounds);
        if clipped.is_empty() {
            None
        } else {
            Some(clipped)
        }
    }
}
