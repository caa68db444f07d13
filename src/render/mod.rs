//! Rendering backend interface used by the compositing operations, and the
//! built-in `tiny-skia` implementation (`RasterBackend`).
//!
//! The compositor only needs a handful of primitives: create an off-screen
//! surface, draw a bitmap into it under a transform, fill rectangles, clip to a
//! path, mask a bitmap with a gray image, and snapshot a surface back into a
//! `Bitmap`. Paths, colours and transforms use the `tiny-skia` types.
pub mod path;
pub mod raster;

pub use path::rounded_rect_path;
pub use raster::{RasterBackend, RasterSurface};
pub use tiny_skia::{Color, Path, Transform};

use crate::core::bitmap::{Bitmap, PixelFormat};
use crate::core::geometry::Rect;
use crate::error::RenderFailure;
use crate::types::InterpolationQuality;

pub trait RenderBackend {
    type Surface;

    /// The closest format this backend can draw into for `requested`.
    ///
    /// Callers pick surface formats through this, so a backend with fewer
    /// capabilities reports the depth it actually produces instead of
    /// labelling narrower pixels with the requested depth.
    fn drawable_format(&self, requested: PixelFormat) -> PixelFormat {
        requested.normalized_for_drawing()
    }

    /// Allocates a transparent off-screen surface.
    fn create_surface(
        &self,
        width: usize,
        height: usize,
        format: PixelFormat,
    ) -> Result<Self::Surface, RenderFailure>;

    /// Draws `bitmap` (raw pixels, orientation ignored) scaled into `dest`,
    /// with `transform` mapping destination coordinates into the surface.
    /// An empty bitmap or destination is an error.
    fn draw_bitmap(
        &self,
        surface: &mut Self::Surface,
        bitmap: &Bitmap,
        dest: Rect,
        transform: Transform,
        quality: InterpolationQuality,
    ) -> Result<(), RenderFailure>;

    /// Fills `rect` with a solid colour, honouring the active clip.
    fn fill_rect(&self, surface: &mut Self::Surface, rect: Rect, color: Color);

    /// Intersects the surface's clip with the area enclosed by `path`
    /// (non-zero winding).
    fn clip_to_path(&self, surface: &mut Self::Surface, path: &Path) -> Result<(), RenderFailure>;

    /// Multiplies `image` by a single-channel mask of the same size:
    /// white keeps a pixel, black makes it transparent.
    fn mask(&self, image: &Bitmap, mask: &Bitmap) -> Result<Bitmap, RenderFailure>;

    /// Extracts the surface contents as a new bitmap.
    fn snapshot(&self, surface: &Self::Surface) -> Result<Bitmap, RenderFailure>;
}
