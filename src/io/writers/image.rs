use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageFormat};
use tracing::info;

use crate::core::bitmap::{Bitmap, PixelFormat};
use crate::core::pixel::encode_rgba8;
use crate::error::{Error, Result};
use crate::types::{AlphaLayout, ColorSpace, OutputFormat};

const JPEG_QUALITY: u8 = 95;

/// Repacks every pixel of `bitmap` into the 8-bit `format`.
fn pack(bitmap: &Bitmap, format: PixelFormat) -> Vec<u8> {
    let bpp = format.bytes_per_pixel();
    let mut out = vec![0u8; bitmap.width() * bitmap.height() * bpp];
    let mut chunks = out.chunks_exact_mut(bpp);
    for y in 0..bitmap.height() {
        for x in 0..bitmap.width() {
            if let Some(chunk) = chunks.next() {
                encode_rgba8(format, bitmap.rgba8_at(x, y), chunk);
            }
        }
    }
    out
}

/// 8-bit layout the encoder receives, plus the matching `image` colour type.
fn encoder_layout(bitmap: &Bitmap, keep_alpha: bool) -> (PixelFormat, ExtendedColorType) {
    let alpha = keep_alpha && bitmap.has_alpha();
    match (bitmap.format().color_space, alpha) {
        (ColorSpace::Gray, false) => (PixelFormat::gray8(), ExtendedColorType::L8),
        (ColorSpace::Gray, true) => (
            PixelFormat::new(8, ColorSpace::Gray, AlphaLayout::Last),
            ExtendedColorType::La8,
        ),
        (ColorSpace::Rgb, false) => (PixelFormat::rgb8(), ExtendedColorType::Rgb8),
        (ColorSpace::Rgb, true) => (PixelFormat::rgba8(AlphaLayout::Last), ExtendedColorType::Rgba8),
    }
}

/// Encodes `bitmap` to `output`.
///
/// PNG keeps alpha, stored straight (un-premultiplied). JPEG has no alpha
/// channel, so transparent areas come out black. Samples are written at 8
/// bits per component.
pub fn save_bitmap(bitmap: &Bitmap, output: &Path, format: OutputFormat) -> Result<()> {
    if bitmap.is_empty() {
        return Err(Error::Processing(format!(
            "cannot encode an empty {}x{} bitmap",
            bitmap.width(),
            bitmap.height()
        )));
    }
    let width = u32::try_from(bitmap.width()).map_err(|_| Error::InvalidArgument {
        arg: "width",
        value: bitmap.width().to_string(),
    })?;
    let height = u32::try_from(bitmap.height()).map_err(|_| Error::InvalidArgument {
        arg: "height",
        value: bitmap.height().to_string(),
    })?;

    match format {
        OutputFormat::Png => {
            let (layout, color) = encoder_layout(bitmap, true);
            let data = pack(bitmap, layout);
            image::save_buffer_with_format(output, &data, width, height, color, ImageFormat::Png)?;
        }
        OutputFormat::Jpeg => {
            let (layout, color) = encoder_layout(bitmap, false);
            let data = pack(bitmap, layout);
            let writer = BufWriter::new(File::create(output)?);
            JpegEncoder::new_with_quality(writer, JPEG_QUALITY)
                .write_image(&data, width, height, color)?;
        }
    }

    info!(
        "Saved {}x{} {:?} to {:?}",
        bitmap.width(),
        bitmap.height(),
        format,
        output
    );
    Ok(())
}
