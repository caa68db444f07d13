//! Immutable in-memory bitmap and its pixel format.
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::geometry::Size;
use crate::core::pixel::decode_rgba8;
use crate::error::{Error, Result};
use crate::types::{AlphaLayout, ColorSpace, Orientation};

/// Storage layout of one pixel: sample depth, colour model and alpha placement.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct PixelFormat {
    pub bits_per_component: u8,
    pub color_space: ColorSpace,
    pub alpha: AlphaLayout,
}

impl PixelFormat {
    pub const fn new(bits_per_component: u8, color_space: ColorSpace, alpha: AlphaLayout) -> Self {
        Self {
            bits_per_component,
            color_space,
            alpha,
        }
    }

    pub const fn gray8() -> Self {
        Self::new(8, ColorSpace::Gray, AlphaLayout::None)
    }

    pub const fn rgb8() -> Self {
        Self::new(8, ColorSpace::Rgb, AlphaLayout::None)
    }

    pub const fn rgba8(alpha: AlphaLayout) -> Self {
        Self::new(8, ColorSpace::Rgb, alpha)
    }

    pub fn channels(&self) -> usize {
        self.color_space.channels() + usize::from(self.alpha.has_alpha())
    }

    pub fn bytes_per_component(&self) -> usize {
        (self.bits_per_component as usize).div_ceil(8)
    }

    pub fn bytes_per_pixel(&self) -> usize {
        self.channels() * self.bytes_per_component()
    }

    pub fn with_alpha(self, alpha: AlphaLayout) -> Self {
        Self { alpha, ..self }
    }

    /// The format a drawing destination uses for this source: straight alpha
    /// becomes premultiplied, everything else is kept.
    pub fn normalized_for_drawing(self) -> Self {
        self.with_alpha(self.alpha.premultiplied())
    }
}

impl std::fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}-bit {} alpha={}",
            self.bits_per_component, self.color_space, self.alpha
        )
    }
}

/// A decoded image: raw pixel rows plus format and orientation tag.
///
/// Pixels are tightly packed, top row first; 16-bit samples are big-endian.
/// The buffer is shared, so cloning a `Bitmap` never copies pixels.
#[derive(Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: usize,
    height: usize,
    format: PixelFormat,
    orientation: Orientation,
    pixels: Arc<[u8]>,
}

impl Bitmap {
    /// Wraps a pixel buffer, checking the depth and the buffer length.
    pub fn new(width: usize, height: usize, format: PixelFormat, pixels: Vec<u8>) -> Result<Self> {
        if !matches!(format.bits_per_component, 8 | 16) {
            return Err(Error::UnsupportedBitDepth(format.bits_per_component));
        }
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(format.bytes_per_pixel()))
            .ok_or(Error::BufferSize {
                expected: usize::MAX,
                actual: pixels.len(),
            })?;
        if pixels.len() != expected {
            return Err(Error::BufferSize {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self::from_parts(width, height, format, pixels))
    }

    /// A 0×0 bitmap of the given format.
    pub fn empty(format: PixelFormat) -> Self {
        Self::from_parts(0, 0, format, Vec::new())
    }

    /// Caller guarantees `pixels.len() == width * height * bytes_per_pixel`.
    pub(crate) fn from_parts(
        width: usize,
        height: usize,
        format: PixelFormat,
        pixels: Vec<u8>,
    ) -> Self {
        debug_assert_eq!(pixels.len(), width * height * format.bytes_per_pixel());
        Self {
            width,
            height,
            format,
            orientation: Orientation::Up,
            pixels: pixels.into(),
        }
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn bytes_per_row(&self) -> usize {
        self.width * self.format.bytes_per_pixel()
    }

    pub fn has_alpha(&self) -> bool {
        self.format.alpha.has_alpha()
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Raw pixel dimensions.
    pub fn size(&self) -> Size {
        Size::new(self.width as f64, self.height as f64)
    }

    /// Dimensions as displayed: width and height swap for quarter-turn
    /// orientations.
    pub fn display_size(&self) -> Size {
        if self.orientation.swaps_axes() {
            Size::new(self.height as f64, self.width as f64)
        } else {
            self.size()
        }
    }

    /// Whether both bitmaps are backed by the same pixel storage.
    pub fn shares_pixels_with(&self, other: &Bitmap) -> bool {
        Arc::ptr_eq(&self.pixels, &other.pixels)
    }

    /// Raw bytes of the pixel at column `x`, row `y`.
    pub fn pixel(&self, x: usize, y: usize) -> &[u8] {
        let bpp = self.format.bytes_per_pixel();
        let start = y * self.bytes_per_row() + x * bpp;
        &self.pixels[start..start + bpp]
    }

    /// Pixel at column `x`, row `y` as premultiplied `[r, g, b, a]`.
    pub fn rgba8_at(&self, x: usize, y: usize) -> [u8; 4] {
        decode_rgba8(self.format, self.pixel(x, y))
    }

    /// Whole buffer as premultiplied RGBA8, row-major.
    pub fn to_rgba8_premultiplied(&self) -> Vec<u8> {
        let bpp = self.format.bytes_per_pixel();
        let mut out = Vec::with_capacity(self.width * self.height * 4);
        if bpp == 0 {
            return out;
        }
        for px in self.pixels.chunks_exact(bpp) {
            out.extend_from_slice(&decode_rgba8(self.format, px));
        }
        out
    }
}

impl std::fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bitmap")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("format", &self.format)
            .field("orientation", &self.orientation)
            .field("bytes", &self.pixels.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_wrong_buffer_length() {
        let err = Bitmap::new(2, 2, PixelFormat::rgb8(), vec![0; 11]).unwrap_err();
        assert!(matches!(
            err,
            Error::BufferSize {
                expected: 12,
                actual: 11
            }
        ));
    }

    #[test]
    fn rejects_unsupported_depth() {
        let format = PixelFormat::new(12, ColorSpace::Gray, AlphaLayout::None);
        assert!(matches!(
            Bitmap::new(1, 1, format, vec![0; 2]),
            Err(Error::UnsupportedBitDepth(12))
        ));
    }

    #[test]
    fn display_size_swaps_for_quarter_turns() {
        let bitmap = Bitmap::new(4, 2, PixelFormat::gray8(), vec![0; 8])
            .unwrap()
            .with_orientation(Orientation::Left);
        assert_eq!(bitmap.size(), Size::new(4.0, 2.0));
        assert_eq!(bitmap.display_size(), Size::new(2.0, 4.0));
    }

    #[test]
    fn clones_share_storage() {
        let bitmap = Bitmap::new(1, 1, PixelFormat::rgb8(), vec![1, 2, 3]).unwrap();
        let copy = bitmap.clone();
        assert!(copy.shares_pixels_with(&bitmap));
        assert_eq!(copy, bitmap);
    }

    #[test]
    fn pixel_addresses_rows_and_columns() {
        let pixels = (0u8..12).collect();
        let bitmap = Bitmap::new(2, 2, PixelFormat::rgb8(), pixels).unwrap();
        assert_eq!(bitmap.pixel(1, 1), &[9, 10, 11]);
        assert_eq!(bitmap.rgba8_at(0, 1), [6, 7, 8, 255]);
    }
}
