//! Floating-point sizes and rectangles in device space.
//!
//! Coordinates are in device space: y grows downward and the origin is the
//! top-left corner of the top-left pixel. Pixel centres sit at `+0.5`.

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn scaled(self, ratio: f64) -> Self {
        Self::new(self.width * ratio, self.height * ratio)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    pub fn min_x(&self) -> f64 {
        self.x.min(self.x + self.width)
    }

    pub fn max_x(&self) -> f64 {
        self.x.max(self.x + self.width)
    }

    pub fn min_y(&self) -> f64 {
        self.y.min(self.y + self.height)
    }

    pub fn max_y(&self) -> f64 {
        self.y.max(self.y + self.height)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// True when the rect covers no area. NaN extents count as empty.
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Same rect with non-negative width and height.
    pub fn standardized(&self) -> Self {
        Self::new(
            self.min_x(),
            self.min_y(),
            self.width.abs(),
            self.height.abs(),
        )
    }

    /// Smallest rect with integral origin and size that contains this one.
    ///
    /// The rect is standardized first; an empty rect stays empty at its
    /// (floored) origin.
    pub fn integral(&self) -> Self {
        let r = self.standardized();
        if r.is_empty() {
            return Self::new(r.x.floor(), r.y.floor(), 0.0, 0.0);
        }
        let x0 = r.x.floor();
        let y0 = r.y.floor();
        let x1 = (r.x + r.width).ceil();
        let y1 = (r.y + r.height).ceil();
        Self::new(x0, y0, x1 - x0, y1 - y0)
    }

    /// Shrinks the rect by `dx` on the left and right and `dy` on the top and
    /// bottom. The result may have a negative size.
    pub fn inset(&self, dx: f64, dy: f64) -> Self {
        Self::new(
            self.x + dx,
            self.y + dy,
            self.width - dx * 2.0,
            self.height - dy * 2.0,
        )
    }

    /// Overlap of two rects; empty (zero-sized) when they do not intersect.
    pub fn intersection(&self, other: &Rect) -> Self {
        let a = self.standardized();
        let b = other.standardized();
        let x0 = a.x.max(b.x);
        let y0 = a.y.max(b.y);
        let x1 = a.max_x().min(b.max_x());
        let y1 = a.max_y().min(b.max_y());
        if !(x1 > x0 && y1 > y0) {
            return Self::new(x0, y0, 0.0, 0.0);
        }
        Self::new(x0, y0, x1 - x0, y1 - y0)
    }

    /// The same rect in the drawing library's single-precision type; `None`
    /// for empty rects.
    pub fn to_skia(&self) -> Option<tiny_skia::Rect> {
        if self.is_empty() {
            return None;
        }
        tiny_skia::Rect::from_xywh(
            self.x as f32,
            self.y as f32,
            self.width as f32,
            self.height as f32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_rounds_outward() {
        let r = Rect::new(0.4, 1.6, 10.2, 3.3).integral();
        assert_eq!(r, Rect::new(0.0, 1.0, 11.0, 4.0));
    }

    #[test]
    fn integral_keeps_whole_rects() {
        let r = Rect::new(3.0, 4.0, 50.0, 50.0);
        assert_eq!(r.integral(), r);
    }

    #[test]
    fn integral_standardizes_negative_sizes() {
        let r = Rect::new(10.0, 10.0, -4.5, -2.0).integral();
        assert_eq!(r, Rect::new(5.0, 8.0, 5.0, 2.0));
    }

    #[test]
    fn empty_rects() {
        assert!(Rect::new(0.0, 0.0, 0.0, 10.0).is_empty());
        assert!(Rect::new(0.0, 0.0, f64::NAN, 10.0).is_empty());
        assert!(Rect::new(0.0, 0.0, 10.0, 10.0).inset(6.0, 6.0).is_empty());
    }

    #[test]
    fn intersection_clips_to_bounds() {
        let bounds = Rect::new(0.0, 0.0, 10.0, 10.0);
        let r = Rect::new(-5.0, 5.0, 10.0, 20.0).intersection(&bounds);
        assert_eq!(r, Rect::new(0.0, 5.0, 5.0, 5.0));
        assert!(Rect::new(20.0, 0.0, 5.0, 5.0).intersection(&bounds).is_empty());
    }

    #[test]
    fn empty_rects_have_no_skia_counterpart() {
        assert!(Rect::new(0.0, 0.0, 10.0, 10.0).inset(6.0, 6.0).to_skia().is_none());
        let r = Rect::new(1.0, 2.0, 3.0, 4.0).to_skia().unwrap();
        assert_eq!((r.left(), r.top(), r.right(), r.bottom()), (1.0, 2.0, 4.0, 6.0));
    }
}
