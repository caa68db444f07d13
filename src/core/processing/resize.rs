use tracing::debug;

use crate::core::bitmap::Bitmap;
use crate::core::geometry::{Rect, Size};
use crate::error::{RenderFailure, Result};
use crate::render::{RenderBackend, Transform};
use crate::types::{ContentMode, InterpolationQuality, Orientation};

/// Transform that draws a raw bitmap upright into a `target`-sized canvas.
///
/// For the quarter-turn orientations the bitmap is drawn into the transposed
/// rect `(0, 0, target.height, target.width)`, which this transform maps onto
/// the canvas. Mirrored variants flip the raw bitmap horizontally first.
pub fn orientation_transform(orientation: Orientation, target: Size) -> Transform {
    let (w, h) = (target.width as f32, target.height as f32);
    let turn = match orientation {
        Orientation::Up | Orientation::UpMirrored => Transform::identity(),
        // (x, y) -> (w - x, h - y)
        Orientation::Down | Orientation::DownMirrored => {
            Transform::from_row(-1.0, 0.0, 0.0, -1.0, w, h)
        }
        // Counter-clockwise: (x, y) -> (y, h - x)
        Orientation::Left | Orientation::LeftMirrored => {
            Transform::from_row(0.0, -1.0, 1.0, 0.0, 0.0, h)
        }
        // Clockwise: (x, y) -> (w - y, x)
        Orientation::Right | Orientation::RightMirrored => {
            Transform::from_row(0.0, 1.0, -1.0, 0.0, w, 0.0)
        }
    };

    if !orientation.is_mirrored() {
        return turn;
    }
    let raw_width = if orientation.swaps_axes() { h } else { w };
    turn.pre_concat(Transform::from_row(-1.0, 0.0, 0.0, 1.0, raw_width, 0.0))
}

/// Redraws `bitmap` upright at exactly `target` size.
///
/// The canvas is `target` rounded outward to whole pixels. Straight alpha is
/// upgraded to premultiplied; colour space is kept and the depth is whatever
/// the backend draws closest to the source's. The result is tagged `Up`.
pub fn resize<B: RenderBackend>(
    backend: &B,
    bitmap: &Bitmap,
    target: Size,
    quality: InterpolationQuality,
) -> Result<Bitmap> {
    let orientation = bitmap.orientation();
    let canvas = Rect::from_size(target).integral();
    if !(canvas.width.is_finite() && canvas.height.is_finite())
        || canvas.width < 1.0
        || canvas.height < 1.0
    {
        return Err(RenderFailure::InvalidDimensions {
            width: target.width,
            height: target.height,
        }
        .into());
    }

    debug!(
        "Resizing {}x{} ({}) -> {:.2}x{:.2} [{}]",
        bitmap.width(),
        bitmap.height(),
        orientation,
        target.width,
        target.height,
        quality
    );

    let format = backend.drawable_format(bitmap.format());
    let mut surface = backend.create_surface(canvas.width as usize, canvas.height as usize, format)?;
    let transform = orientation_transform(orientation, target);
    let dest = if orientation.swaps_axes() {
        Rect::new(0.0, 0.0, target.height, target.width)
    } else {
        Rect::from_size(target)
    };
    backend.draw_bitmap(&mut surface, bitmap, dest, transform, quality)?;
    Ok(backend.snapshot(&surface)?)
}

/// Scales the upright image to cover (`AspectFill`) or fit inside
/// (`AspectFit`) `bounds`, keeping its aspect ratio.
pub fn resize_with_content_mode<B: RenderBackend>(
    backend: &B,
    bitmap: &Bitmap,
    bounds: Size,
    mode: ContentMode,
    quality: InterpolationQuality,
) -> Result<Bitmap> {
    let display = bitmap.display_size();
    if bitmap.is_empty() {
        return Err(RenderFailure::InvalidDimensions {
            width: display.width,
            height: display.height,
        }
        .into());
    }
    let bounds_valid = bounds.width > 0.0
        && bounds.height > 0.0
        && bounds.width.is_finite()
        && bounds.height.is_finite();
    if !bounds_valid {
        return Err(RenderFailure::InvalidDimensions {
            width: bounds.width,
            height: bounds.height,
        }
        .into());
    }

    let horizontal = bounds.width / display.width;
    let vertical = bounds.height / display.height;
    let ratio = match mode {
        ContentMode::AspectFill => horizontal.max(vertical),
        ContentMode::AspectFit => horizontal.min(vertical),
    };

    // The side that set the ratio takes the bound as-is, so `w / w * w`
    // rounding noise cannot widen the canvas by a pixel.
    let mut target = display.scaled(ratio);
    if ratio == horizontal {
        target.width = bounds.width;
    }
    if ratio == vertical {
        target.height = bounds.height;
    }
    debug!("{} ratio {:.4} for bounds {:?}", mode, ratio, bounds);
    resize(backend, bitmap, target, quality)
}
