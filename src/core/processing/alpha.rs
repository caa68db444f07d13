use tracing::debug;

use crate::core::bitmap::{Bitmap, PixelFormat};
use crate::core::geometry::Rect;
use crate::error::Result;
use crate::render::{RenderBackend, Transform};
use crate::types::{AlphaLayout, InterpolationQuality};

/// True iff the bitmap stores an alpha sample (straight or premultiplied).
pub fn has_alpha(bitmap: &Bitmap) -> bool {
    bitmap.format().alpha.has_alpha()
}

/// Returns a bitmap with an alpha channel.
///
/// Bitmaps that already carry alpha are returned as-is, sharing their pixel
/// storage. Others are redrawn onto an 8-bit premultiplied-alpha-first surface
/// of the same size and colour space.
pub fn ensure_alpha<B: RenderBackend>(backend: &B, bitmap: &Bitmap) -> Result<Bitmap> {
    if has_alpha(bitmap) {
        return Ok(bitmap.clone());
    }

    debug!(
        "Adding alpha channel to {}x{} {} bitmap",
        bitmap.width(),
        bitmap.height(),
        bitmap.format()
    );
    let format = PixelFormat::new(8, bitmap.format().color_space, AlphaLayout::PremultipliedFirst);
    let mut surface = backend.create_surface(bitmap.width(), bitmap.height(), format)?;
    backend.draw_bitmap(
        &mut surface,
        bitmap,
        Rect::from_size(bitmap.size()),
        Transform::identity(),
        InterpolationQuality::None,
    )?;
    Ok(backend.snapshot(&surface)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::processing::test_support::{gradient, solid_rgba};
    use crate::error::{Error, RenderFailure};
    use crate::render::RasterBackend;
    use crate::types::ColorSpace;

    #[test]
    fn bitmap_with_alpha_is_returned_unchanged() {
        let source = solid_rgba(3, 2, [10, 20, 30, 128], AlphaLayout::Last);
        let result = ensure_alpha(&RasterBackend, &source).unwrap();
        assert!(result.shares_pixels_with(&source));
        assert_eq!(result, source);
    }

    #[test]
    fn opaque_bitmap_gains_premultiplied_alpha() {
        let source = gradient(4, 3);
        let result = ensure_alpha(&RasterBackend, &source).unwrap();

        assert!(has_alpha(&result));
        assert_eq!(result.format().alpha, AlphaLayout::PremultipliedFirst);
        assert_eq!(result.format().bits_per_component, 8);
        assert_eq!((result.width(), result.height()), (4, 3));
        for y in 0..3 {
            for x in 0..4 {
                assert_eq!(result.pixel(x, y), &[255, x as u8, y as u8, 100]);
            }
        }
    }

    #[test]
    fn gray_keeps_its_color_space() {
        let source = Bitmap::new(2, 1, PixelFormat::gray8(), vec![7, 200]).unwrap();
        let result = ensure_alpha(&RasterBackend, &source).unwrap();
        assert_eq!(result.format().color_space, ColorSpace::Gray);
        assert_eq!(result.pixels(), &[255, 7, 255, 200]);
    }

    #[test]
    fn empty_opaque_bitmap_is_a_render_failure() {
        let source = Bitmap::empty(PixelFormat::rgb8());
        assert!(matches!(
            ensure_alpha(&RasterBackend, &source),
            Err(Error::Render(RenderFailure::InvalidDimensions { .. }))
        ));
    }
}
