use tracing::info;

use crate::core::bitmap::Bitmap;
use crate::core::geometry::{Rect, Size};
use crate::core::processing::border::add_transparent_border;
use crate::core::processing::crop::crop;
use crate::core::processing::resize::resize_with_content_mode;
use crate::core::processing::rounded::round_corners;
use crate::error::Result;
use crate::render::RenderBackend;
use crate::types::{ContentMode, InterpolationQuality};

/// Square thumbnail: aspect-fill to `size`, centre crop, optional transparent
/// border, then rounded corners inset by the border.
///
/// The output is `size + 2 * border` pixels on each side.
pub fn thumbnail<B: RenderBackend>(
    backend: &B,
    bitmap: &Bitmap,
    size: u32,
    border: u32,
    corner: u32,
    quality: InterpolationQuality,
) -> Result<Bitmap> {
    info!(
        "Thumbnail of {}x{} ({}): size {}, border {}, corner {}, quality {}",
        bitmap.width(),
        bitmap.height(),
        bitmap.orientation(),
        size,
        border,
        corner,
        quality
    );

    let side = size as f64;
    let resized = resize_with_content_mode(
        backend,
        bitmap,
        Size::new(side, side),
        ContentMode::AspectFill,
        quality,
    )?;

    let origin_x = ((resized.width() as f64 - side) / 2.0).round();
    let origin_y = ((resized.height() as f64 - side) / 2.0).round();
    let cropped = crop(&resized, Rect::new(origin_x, origin_y, side, side));
    info!(
        "Cropped {}x{} at ({}, {}) to {}x{}",
        resized.width(),
        resized.height(),
        origin_x,
        origin_y,
        cropped.width(),
        cropped.height()
    );

    let framed = if border != 0 {
        add_transparent_border(backend, &cropped, border)?
    } else {
        cropped
    };

    let rounded = round_corners(backend, &framed, corner, border)?;
    info!("Thumbnail ready: {}x{}", rounded.width(), rounded.height());
    Ok(rounded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::processing::test_support::gradient;
    use crate::render::RasterBackend;
    use crate::types::Orientation;

    #[test]
    fn plain_thumbnail_is_exactly_square_and_opaque() {
        for (w, h) in [(100, 60), (37, 80), (64, 64)] {
            let source = gradient(w, h);
            let result = thumbnail(&RasterBackend, &source, 32, 0, 0, InterpolationQuality::High).unwrap();
            assert_eq!((result.width(), result.height()), (32, 32), "{w}x{h}");
            for (x, y) in [(0, 0), (31, 0), (0, 31), (31, 31), (16, 16)] {
                assert_eq!(result.rgba8_at(x, y)[3], 255, "{w}x{h} at ({x}, {y})");
            }
        }
    }

    #[test]
    fn crop_is_centred() {
        // 40x20 fills 10x10 as 20x10, so the crop starts at column 5, which
        // samples source column 10 or 11.
        let source = gradient(40, 20);
        let result = thumbnail(&RasterBackend, &source, 10, 0, 0, InterpolationQuality::None).unwrap();
        assert_eq!((result.width(), result.height()), (10, 10));
        let left = result.rgba8_at(0, 5)[0];
        let right = result.rgba8_at(9, 5)[0];
        assert!((10..=11).contains(&left), "left column samples {left}");
        assert_eq!(right - left, 18);
    }

    #[test]
    fn border_grows_the_output() {
        let source = gradient(30, 30);
        let result = thumbnail(&RasterBackend, &source, 20, 3, 0, InterpolationQuality::Low).unwrap();
        assert_eq!((result.width(), result.height()), (26, 26));
        assert_eq!(result.rgba8_at(1, 13)[3], 0);
        assert_eq!(result.rgba8_at(3, 13)[3], 255);
    }

    #[test]
    fn orientation_is_applied_before_cropping() {
        let source = gradient(20, 10).with_orientation(Orientation::Right);
        let result = thumbnail(&RasterBackend, &source, 10, 0, 0, InterpolationQuality::None).unwrap();
        assert_eq!((result.width(), result.height()), (10, 10));
        assert_eq!(result.orientation(), Orientation::Up);
    }

    #[test]
    fn empty_source_fails_instead_of_producing_a_blank_square() {
        let empty = Bitmap::empty(crate::core::bitmap::PixelFormat::rgb8());
        let result = thumbnail(&RasterBackend, &empty, 16, 0, 0, InterpolationQuality::High);
        assert!(matches!(
            result,
            Err(crate::error::Error::Render(
                crate::error::RenderFailure::InvalidDimensions { .. }
            ))
        ));
    }
}
