use tracing::debug;

use crate::core::bitmap::{Bitmap, PixelFormat};
use crate::core::geometry::Rect;
use crate::core::processing::alpha::ensure_alpha;
use crate::error::Result;
use crate::render::{Color, RenderBackend, Transform};
use crate::types::InterpolationQuality;

/// Surrounds the bitmap with a fully transparent border `border` pixels wide.
///
/// The result is `(w + 2 * border) × (h + 2 * border)`. Inside the border the
/// source pixels keep their colour and alpha.
pub fn add_transparent_border<B: RenderBackend>(
    backend: &B,
    bitmap: &Bitmap,
    border: u32,
) -> Result<Bitmap> {
    let image = ensure_alpha(backend, bitmap)?;
    let inset = border as usize;
    let width = image.width().saturating_add(inset.saturating_mul(2));
    let height = image.height().saturating_add(inset.saturating_mul(2));
    debug!(
        "Adding {}px transparent border: {}x{} -> {}x{}",
        border,
        image.width(),
        image.height(),
        width,
        height
    );

    let format = backend.drawable_format(image.format());
    let mut surface = backend.create_surface(width, height, format)?;
    let location = Rect::new(
        border as f64,
        border as f64,
        image.width() as f64,
        image.height() as f64,
    );
    backend.draw_bitmap(
        &mut surface,
        &image,
        location,
        Transform::identity(),
        InterpolationQuality::None,
    )?;
    let bordered = backend.snapshot(&surface)?;

    let mask = border_mask(backend, border, width, height)?;
    Ok(backend.mask(&bordered, &mask)?)
}

/// Gray mask: black everywhere except a white rectangle inset by `border`.
fn border_mask<B: RenderBackend>(
    backend: &B,
    border: u32,
    width: usize,
    height: usize,
) -> Result<Bitmap> {
    let mut context = backend.create_surface(width, height, PixelFormat::gray8())?;
    let full = Rect::new(0.0, 0.0, width as f64, height as f64);
    backend.fill_rect(&mut context, full, Color::BLACK);
    backend.fill_rect(
        &mut context,
        full.inset(border as f64, border as f64),
        Color::WHITE,
    );
    Ok(backend.snapshot(&context)?)
}
