use std::path::Path;

use image::{DynamicImage, ImageDecoder, ImageReader};
use tracing::{info, warn};

use crate::core::bitmap::{Bitmap, PixelFormat};
use crate::error::Result;
use crate::types::{AlphaLayout, ColorSpace, Orientation};

/// Decodes an image file into a `Bitmap` tagged with its EXIF orientation.
///
/// 8- and 16-bit gray and RGB images keep their layout (straight alpha maps to
/// `AlphaLayout::Last`). Anything else, e.g. floating-point images, is
/// converted to 8-bit RGBA.
pub fn load_bitmap(path: &Path) -> Result<Bitmap> {
    let mut decoder = ImageReader::open(path)?
        .with_guessed_format()?
        .into_decoder()?;

    let orientation = match decoder.orientation() {
        Ok(tag) => Orientation::from_exif(tag.to_exif()).unwrap_or_default(),
        Err(e) => {
            warn!("Could not read orientation of {:?}: {}; assuming Up", path, e);
            Orientation::Up
        }
    };

    let image = DynamicImage::from_decoder(decoder)?;
    let bitmap = bitmap_from_dynamic(image)?.with_orientation(orientation);
    info!(
        "Loaded {:?}: {}x{} {} ({})",
        path,
        bitmap.width(),
        bitmap.height(),
        bitmap.format(),
        orientation
    );
    Ok(bitmap)
}

fn wide_samples(samples: Vec<u16>) -> Vec<u8> {
    samples.into_iter().flat_map(u16::to_be_bytes).collect()
}

/// Converts a decoded image without touching its samples where the layout
/// has a direct `PixelFormat` equivalent.
pub fn bitmap_from_dynamic(image: DynamicImage) -> Result<Bitmap> {
    let width = image.width() as usize;
    let height = image.height() as usize;
    let (format, pixels) = match image {
        DynamicImage::ImageLuma8(buf) => (PixelFormat::gray8(), buf.into_raw()),
        DynamicImage::ImageLumaA8(buf) => (
            PixelFormat::new(8, ColorSpace::Gray, AlphaLayout::Last),
            buf.into_raw(),
        ),
        DynamicImage::ImageRgb8(buf) => (PixelFormat::rgb8(), buf.into_raw()),
        DynamicImage::ImageRgba8(buf) => (PixelFormat::rgba8(AlphaLayout::Last), buf.into_raw()),
        DynamicImage::ImageLuma16(buf) => (
            PixelFormat::new(16, ColorSpace::Gray, AlphaLayout::None),
            wide_samples(buf.into_raw()),
        ),
        DynamicImage::ImageLumaA16(buf) => (
            PixelFormat::new(16, ColorSpace::Gray, AlphaLayout::Last),
            wide_samples(buf.into_raw()),
        ),
        DynamicImage::ImageRgb16(buf) => (
            PixelFormat::new(16, ColorSpace::Rgb, AlphaLayout::None),
            wide_samples(buf.into_raw()),
        ),
        DynamicImage::ImageRgba16(buf) => (
            PixelFormat::new(16, ColorSpace::Rgb, AlphaLayout::Last),
            wide_samples(buf.into_raw()),
        ),
        other => (
            PixelFormat::rgba8(AlphaLayout::Last),
            other.to_rgba8().into_raw(),
        ),
    };
    Bitmap::new(width, height, format, pixels)
}
