//! Compositing operations. Each takes a rendering backend and an input bitmap
//! and returns a new bitmap; inputs are never modified.
pub mod alpha;
pub mod border;
pub mod crop;
pub mod pipeline;
pub mod resize;
pub mod rounded;

pub use alpha::{ensure_alpha, has_alpha};
pub use border::add_transparent_border;
pub use crop::crop;
pub use pipeline::thumbnail;
pub use resize::{orientation_transform, resize, resize_with_content_mode};
pub use rounded::round_corners;

#[cfg(test)]
pub(crate) mod test_support {
    use crate::core::bitmap::{Bitmap, PixelFormat};
    use crate::types::AlphaLayout;

    /// Opaque RGB bitmap whose pixel at (x, y) is `[x, y, 100]`.
    pub fn gradient(width: usize, height: usize) -> Bitmap {
        let mut pixels = Vec::with_capacity(width * height * 3);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[x as u8, y as u8, 100]);
            }
        }
        Bitmap::new(width, height, PixelFormat::rgb8(), pixels).unwrap()
    }

    pub fn solid_rgba(width: usize, height: usize, rgba: [u8; 4], alpha: AlphaLayout) -> Bitmap {
        let px = if alpha.is_first() {
            [rgba[3], rgba[0], rgba[1], rgba[2]]
        } else {
            rgba
        };
        Bitmap::new(width, height, PixelFormat::rgba8(alpha), px.repeat(width * height)).unwrap()
    }
}
