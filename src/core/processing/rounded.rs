use tracing::debug;

use crate::core::bitmap::Bitmap;
use crate::core::geometry::Rect;
use crate::core::processing::alpha::ensure_alpha;
use crate::error::Result;
use crate::render::{RenderBackend, Transform, rounded_rect_path};
use crate::types::InterpolationQuality;

/// Clips the bitmap to a rounded rectangle inset by `border` pixels.
///
/// The corners are rounded by an oval of `corner` × `corner`; a zero corner
/// keeps them square. Everything outside the clip becomes transparent.
pub fn round_corners<B: RenderBackend>(
    backend: &B,
    bitmap: &Bitmap,
    corner: u32,
    border: u32,
) -> Result<Bitmap> {
    let image = ensure_alpha(backend, bitmap)?;
    debug!(
        "Rounding {}x{} corners: radius {}, inset {}",
        image.width(),
        image.height(),
        corner,
        border
    );

    let format = backend.drawable_format(image.format());
    let mut surface = backend.create_surface(image.width(), image.height(), format)?;
    let bounds = Rect::from_size(image.size());
    let inset = bounds.inset(border as f64, border as f64);
    match rounded_rect_path(inset, corner as f64, corner as f64) {
        Some(clip) => {
            backend.clip_to_path(&mut surface, &clip)?;
            backend.draw_bitmap(
                &mut surface,
                &image,
                bounds,
                Transform::identity(),
                InterpolationQuality::None,
            )?;
        }
        // Nothing survives an empty clip.
        None => debug!("Inset {:?} leaves no visible area", inset),
    }
    Ok(backend.snapshot(&surface)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::processing::test_support::{gradient, solid_rgba};
    use crate::render::RasterBackend;
    use crate::types::AlphaLayout;

    #[test]
    fn zero_corner_is_a_plain_inset_rectangle() {
        let source = gradient(8, 6);
        let result = round_corners(&RasterBackend, &source, 0, 2).unwrap();
        assert_eq!((result.width(), result.height()), (8, 6));

        for y in 0..6 {
            for x in 0..8 {
                let inside = (2..6).contains(&x) && (2..4).contains(&y);
                let expected = if inside { [x as u8, y as u8, 100, 255] } else { [0; 4] };
                assert_eq!(result.rgba8_at(x, y), expected, "({x}, {y})");
            }
        }
    }

    #[test]
    fn zero_corner_and_border_keeps_everything() {
        let source = gradient(5, 5);
        let expected = ensure_alpha(&RasterBackend, &source).unwrap();
        let result = round_corners(&RasterBackend, &source, 0, 0).unwrap();
        assert_eq!(result.pixels(), expected.pixels());
    }

    #[test]
    fn corners_are_cut_and_centre_kept() {
        let source = solid_rgba(40, 40, [255, 255, 255, 255], AlphaLayout::PremultipliedLast);
        let result = round_corners(&RasterBackend, &source, 10, 0).unwrap();

        for (x, y) in [(0, 0), (39, 0), (0, 39), (39, 39), (1, 1)] {
            assert_eq!(result.rgba8_at(x, y)[3], 0, "corner ({x}, {y})");
        }
        for (x, y) in [(20, 20), (0, 20), (20, 0), (39, 20), (10, 10)] {
            assert_eq!(result.rgba8_at(x, y)[3], 255, "inside ({x}, {y})");
        }
        // The arc crosses this pixel, so it is only partly covered.
        let edge = result.rgba8_at(3, 2)[3];
        assert!(edge > 0 && edge < 255);
    }

    #[test]
    fn over_inset_clips_everything() {
        let source = gradient(6, 6);
        let result = round_corners(&RasterBackend, &source, 2, 4).unwrap();
        assert_eq!((result.width(), result.height()), (6, 6));
        assert!(result.pixels().iter().all(|&b| b == 0));
    }

    #[test]
    fn input_is_not_modified() {
        let source = gradient(6, 6);
        let before = source.pixels().to_vec();
        round_corners(&RasterBackend, &source, 3, 1).unwrap();
        assert_eq!(source.pixels(), &before[..]);
    }
}
