//! Clip path construction.
use tiny_skia::{Path, PathBuilder};

use crate::core::geometry::Rect;

/// Control-point distance of a cubic Bézier approximating a quarter circle,
/// as a fraction of the radius: 4/3 * tan(π/8).
const KAPPA: f32 = 0.552_284_8;

/// Rectangle with corners rounded by an oval of `oval_width` × `oval_height`
/// radii.
///
/// The outline starts on the right edge and runs clockwise on screen: each
/// edge is a line and each corner a cubic quarter arc. A zero oval gives a
/// plain rectangle. Radii are clamped to half the rectangle's extents. An empty
/// `rect` (including one with a negative size, which is not flipped) has no
/// outline and gives `None`.
pub fn rounded_rect_path(rect: Rect, oval_width: f64, oval_height: f64) -> Option<Path> {
    let bounds = rect.to_skia()?;
    if !(oval_width > 0.0 && oval_height > 0.0) {
        return Some(PathBuilder::from_rect(bounds));
    }

    let rx = oval_width.min(rect.width / 2.0) as f32;
    let ry = oval_height.min(rect.height / 2.0) as f32;
    let (kx, ky) = (rx * KAPPA, ry * KAPPA);
    let (left, top, right, bottom) = (bounds.left(), bounds.top(), bounds.right(), bounds.bottom());

    let mut pb = PathBuilder::new();
    pb.move_to(right, top + ry);
    pb.line_to(right, bottom - ry);
    pb.cubic_to(right, bottom - ry + ky, right - rx + kx, bottom, right - rx, bottom);
    pb.line_to(left + rx, bottom);
    pb.cubic_to(left + rx - kx, bottom, left, bottom - ry + ky, left, bottom - ry);
    pb.line_to(left, top + ry);
    pb.cubic_to(left, top + ry - ky, left + rx - kx, top, left + rx, top);
    pb.line_to(right - rx, top);
    pb.cubic_to(right - rx + kx, top, right, top + ry - ky, right, top + ry);
    pb.close();
    pb.finish()
}
