use tracing::debug;

use crate::core::bitmap::Bitmap;
use crate::core::geometry::Rect;

/// Copies the part of the raw pixel buffer covered by `rect`.
///
/// `rect` is rounded outward to integral bounds and clipped to the bitmap.
/// The orientation tag is ignored: coordinates address raw pixels with the
/// origin at the top-left, and the result is tagged `Up`. An empty overlap
/// yields a 0×0 bitmap of the same format.
pub fn crop(bitmap: &Bitmap, rect: Rect) -> Bitmap {
    let bounds = Rect::from_size(bitmap.size());
    let area = rect.integral().intersection(&bounds);
    if area.is_empty() {
        debug!("Crop {:?} misses the {}x{} bitmap", rect, bitmap.width(), bitmap.height());
        return Bitmap::empty(bitmap.format());
    }

    let x = area.x as usize;
    let y = area.y as usize;
    let width = area.width as usize;
    let height = area.height as usize;
    debug!("Cropping {}x{} at ({}, {})", width, height, x, y);

    let bpp = bitmap.format().bytes_per_pixel();
    let row_bytes = width * bpp;
    let mut pixels = Vec::with_capacity(row_bytes * height);
    for row in y..y + height {
        let start = row * bitmap.bytes_per_row() + x * bpp;
        pixels.extend_from_slice(&bitmap.pixels()[start..start + row_bytes]);
    }
    Bitmap::from_parts(width, height, bitmap.format(), pixels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::bitmap::PixelFormat;
    use crate::core::processing::test_support::gradient;
    use crate::types::{AlphaLayout, ColorSpace, Orientation};

    #[test]
    fn full_rect_is_identity_on_raw_pixels() {
        let source = gradient(7, 5);
        let result = crop(&source, Rect::from_size(source.size()));
        assert_eq!(result, source);
    }

    #[test]
    fn crops_sub_rectangle() {
        let source = gradient(8, 8);
        let result = crop(&source, Rect::new(2.0, 3.0, 4.0, 2.0));
        assert_eq!((result.width(), result.height()), (4, 2));
        assert_eq!(result.pixel(0, 0), &[2, 3, 100]);
        assert_eq!(result.pixel(3, 1), &[5, 4, 100]);
    }

    #[test]
    fn fractional_rect_is_rounded_outward() {
        let source = gradient(8, 8);
        let result = crop(&source, Rect::new(1.5, 1.5, 2.0, 2.0));
        assert_eq!((result.width(), result.height()), (3, 3));
        assert_eq!(result.pixel(0, 0), &[1, 1, 100]);
    }

    #[test]
    fn rect_is_clipped_to_bounds() {
        let source = gradient(4, 4);
        let result = crop(&source, Rect::new(2.0, -1.0, 10.0, 3.0));
        assert_eq!((result.width(), result.height()), (2, 2));
        assert_eq!(result.pixel(0, 0), &[2, 0, 100]);
    }

    #[test]
    fn empty_overlap_gives_empty_bitmap() {
        let source = gradient(4, 4);
        let result = crop(&source, Rect::new(10.0, 10.0, 2.0, 2.0));
        assert!(result.is_empty());
        assert_eq!(result.format(), source.format());
        assert!(crop(&source, Rect::new(1.0, 1.0, 0.0, 0.0)).is_empty());
    }

    #[test]
    fn orientation_is_ignored() {
        let source = gradient(4, 2).with_orientation(Orientation::Right);
        let result = crop(&source, Rect::new(0.0, 0.0, 3.0, 1.0));
        assert_eq!((result.width(), result.height()), (3, 1));
        assert_eq!(result.orientation(), Orientation::Up);
    }

    #[test]
    fn sixteen_bit_rows_are_copied_whole() {
        let format = PixelFormat::new(16, ColorSpace::Gray, AlphaLayout::None);
        let pixels: Vec<u8> = (0..2 * 2 * 2).map(|v| v as u8).collect();
        let source = Bitmap::new(2, 2, format, pixels).unwrap();
        let result = crop(&source, Rect::new(1.0, 0.0, 1.0, 2.0));
        assert_eq!(result.pixels(), &[2, 3, 6, 7]);
    }
}
