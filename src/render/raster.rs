//! `RenderBackend` implemented on `tiny-skia`.
//!
//! Surfaces are premultiplied RGBA8 pixmaps plus an optional clip mask; the
//! declared `PixelFormat` is only applied when a surface is snapshotted.
//! Scaling goes through `fast_image_resize` first, so the pixmap draw mostly
//! places already-sized pixels under the orientation transform.
use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer, images::Image};
use tiny_skia::{
    Color, FillRule, FilterQuality, IntSize, Mask, Paint, Path, Pixmap, PixmapPaint, Transform,
};
use tracing::debug;

use super::RenderBackend;
use crate::core::bitmap::{Bitmap, PixelFormat};
use crate::core::geometry::Rect;
use crate::core::pixel::{decode_rgba8, encode_rgba8, mul_div255};
use crate::error::RenderFailure;
use crate::types::{AlphaLayout, ColorSpace, InterpolationQuality};

/// Off-screen drawing target of the raster backend.
pub struct RasterSurface {
    pixmap: Pixmap,
    format: PixelFormat,
    clip: Option<Mask>,
}

impl RasterSurface {
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Clip coverage at a pixel; 255 when no clip is active.
    pub fn clip_coverage(&self, x: usize, y: usize) -> u8 {
        self.clip
            .as_ref()
            .map_or(255, |clip| clip.data()[y * self.pixmap.width() as usize + x])
    }

    /// Pixel as premultiplied RGBA, after a round trip through the declared
    /// format (what a snapshot would store).
    pub fn rgba8_at(&self, x: usize, y: usize) -> [u8; 4] {
        let start = (y * self.pixmap.width() as usize + x) * 4;
        let px = &self.pixmap.data()[start..start + 4];
        let mut buf = [0u8; 4];
        let bpp = self.format.bytes_per_pixel();
        encode_rgba8(self.format, [px[0], px[1], px[2], px[3]], &mut buf[..bpp]);
        decode_rgba8(self.format, &buf[..bpp])
    }
}

impl std::fmt::Debug for RasterSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterSurface")
            .field("width", &self.pixmap.width())
            .field("height", &self.pixmap.height())
            .field("format", &self.format)
            .field("clipped", &self.clip.is_some())
            .finish()
    }
}

/// Stateless software backend. Draws 8-bit surfaces only.
#[derive(Copy, Clone, Debug, Default)]
pub struct RasterBackend;

fn resize_alg(quality: InterpolationQuality) -> ResizeAlg {
    match quality {
        InterpolationQuality::None => ResizeAlg::Nearest,
        InterpolationQuality::Low => ResizeAlg::Convolution(FilterType::Bilinear),
        InterpolationQuality::Medium => ResizeAlg::Convolution(FilterType::CatmullRom),
        InterpolationQuality::High => ResizeAlg::Convolution(FilterType::Lanczos3),
    }
}

fn filter_quality(quality: InterpolationQuality) -> FilterQuality {
    match quality {
        InterpolationQuality::None => FilterQuality::Nearest,
        InterpolationQuality::Low => FilterQuality::Bilinear,
        InterpolationQuality::Medium | InterpolationQuality::High => FilterQuality::Bicubic,
    }
}

/// Whether `transform` maps pixel centres onto pixel centres (right-angle
/// turns, flips and whole-pixel offsets only).
fn is_pixel_aligned(transform: &Transform) -> bool {
    [
        transform.sx,
        transform.kx,
        transform.ky,
        transform.sy,
        transform.tx,
        transform.ty,
    ]
    .iter()
    .all(|v| v.fract() == 0.0)
}

fn int_size(width: usize, height: usize) -> Result<IntSize, RenderFailure> {
    let invalid = || RenderFailure::InvalidDimensions {
        width: width as f64,
        height: height as f64,
    };
    let w = u32::try_from(width).map_err(|_| invalid())?;
    let h = u32::try_from(height).map_err(|_| invalid())?;
    IntSize::from_wh(w, h).ok_or_else(invalid)
}

/// Rescales premultiplied RGBA8 pixels. The data is already premultiplied, so
/// the resizer must not touch alpha itself.
fn resample_rgba8(
    src: Vec<u8>,
    src_size: IntSize,
    dst_size: IntSize,
    quality: InterpolationQuality,
) -> Result<Vec<u8>, RenderFailure> {
    let src_image = Image::from_vec_u8(src_size.width(), src_size.height(), src, PixelType::U8x4)
        .map_err(|e| RenderFailure::Resample(e.to_string()))?;
    let mut dst_image = Image::new(dst_size.width(), dst_size.height(), PixelType::U8x4);
    let options = ResizeOptions::new()
        .resize_alg(resize_alg(quality))
        .use_alpha(false);
    let mut resizer = Resizer::new();
    resizer
        .resize(&src_image, &mut dst_image, &options)
        .map_err(|e| RenderFailure::Resample(e.to_string()))?;

    let mut pixels = dst_image.into_vec();
    // Ringing filters can push colour above alpha.
    for px in pixels.chunks_exact_mut(4) {
        let a = px[3];
        px[..3].iter_mut().for_each(|c| *c = (*c).min(a));
    }
    Ok(pixels)
}

fn bitmap_from_pixmap(pixmap: &Pixmap, format: PixelFormat) -> Bitmap {
    let (width, height) = (pixmap.width() as usize, pixmap.height() as usize);
    let bpp = format.bytes_per_pixel();
    let mut out = vec![0u8; width * height * bpp];
    for (px, chunk) in pixmap.data().chunks_exact(4).zip(out.chunks_exact_mut(bpp)) {
        encode_rgba8(format, [px[0], px[1], px[2], px[3]], chunk);
    }
    Bitmap::from_parts(width, height, format, out)
}

impl RenderBackend for RasterBackend {
    type Surface = RasterSurface;

    fn drawable_format(&self, requested: PixelFormat) -> PixelFormat {
        PixelFormat {
            bits_per_component: 8,
            ..requested.normalized_for_drawing()
        }
    }

    fn create_surface(
        &self,
        width: usize,
        height: usize,
        format: PixelFormat,
    ) -> Result<RasterSurface, RenderFailure> {
        if format.bits_per_component != 8 {
            return Err(RenderFailure::UnsupportedFormat(format));
        }
        if format.alpha.has_alpha() && !format.alpha.is_premultiplied() {
            return Err(RenderFailure::UnsupportedFormat(format));
        }
        let size = int_size(width, height)?;
        let pixmap = Pixmap::new(size.width(), size.height()).ok_or(
            RenderFailure::InvalidDimensions {
                width: width as f64,
                height: height as f64,
            },
        )?;
        debug!("Creating {}x{} surface ({})", width, height, format);
        Ok(RasterSurface {
            pixmap,
            format,
            clip: None,
        })
    }

    fn draw_bitmap(
        &self,
        surface: &mut RasterSurface,
        bitmap: &Bitmap,
        dest: Rect,
        transform: Transform,
        quality: InterpolationQuality,
    ) -> Result<(), RenderFailure> {
        if bitmap.is_empty() {
            return Err(RenderFailure::InvalidDimensions {
                width: bitmap.width() as f64,
                height: bitmap.height() as f64,
            });
        }
        if dest.is_empty() || !(dest.width.is_finite() && dest.height.is_finite()) {
            return Err(RenderFailure::InvalidDimensions {
                width: dest.width,
                height: dest.height,
            });
        }

        let src_size = int_size(bitmap.width(), bitmap.height())?;
        let sample_size = int_size(
            (dest.width.round() as usize).max(1),
            (dest.height.round() as usize).max(1),
        )?;
        let rgba = bitmap.to_rgba8_premultiplied();
        let samples = if sample_size == src_size {
            rgba
        } else {
            debug!(
                "Resampling {}x{} -> {}x{} ({})",
                src_size.width(),
                src_size.height(),
                sample_size.width(),
                sample_size.height(),
                quality
            );
            resample_rgba8(rgba, src_size, sample_size, quality)?
        };
        let sample = Pixmap::from_vec(samples, sample_size).ok_or(
            RenderFailure::InvalidDimensions {
                width: dest.width,
                height: dest.height,
            },
        )?;

        let placement = transform
            .pre_translate(dest.x as f32, dest.y as f32)
            .pre_scale(
                (dest.width / sample_size.width() as f64) as f32,
                (dest.height / sample_size.height() as f64) as f32,
            );
        if placement.invert().is_none() {
            return Err(RenderFailure::SingularTransform);
        }

        let paint = PixmapPaint {
            quality: if is_pixel_aligned(&placement) {
                FilterQuality::Nearest
            } else {
                filter_quality(quality)
            },
            ..PixmapPaint::default()
        };
        surface.pixmap.draw_pixmap(
            0,
            0,
            sample.as_ref(),
            &paint,
            placement,
            surface.clip.as_ref(),
        );
        Ok(())
    }

    fn fill_rect(&self, surface: &mut RasterSurface, rect: Rect, color: Color) {
        let Some(rect) = rect.to_skia() else {
            return;
        };
        let mut paint = Paint::default();
        paint.set_color(color);
        surface
            .pixmap
            .fill_rect(rect, &paint, Transform::identity(), surface.clip.as_ref());
    }

    fn clip_to_path(&self, surface: &mut RasterSurface, path: &Path) -> Result<(), RenderFailure> {
        let (width, height) = (surface.pixmap.width(), surface.pixmap.height());
        let mut coverage = Mask::new(width, height).ok_or(RenderFailure::InvalidDimensions {
            width: width as f64,
            height: height as f64,
        })?;
        coverage.fill_path(path, FillRule::Winding, true, Transform::identity());
        if let Some(existing) = &surface.clip {
            for (c, e) in coverage.data_mut().iter_mut().zip(existing.data()) {
                *c = mul_div255(*c, *e);
            }
        }
        surface.clip = Some(coverage);
        Ok(())
    }

    fn mask(&self, image: &Bitmap, mask: &Bitmap) -> Result<Bitmap, RenderFailure> {
        let mask_format = mask.format();
        if mask_format != PixelFormat::new(8, ColorSpace::Gray, AlphaLayout::None) {
            return Err(RenderFailure::MaskMismatch(format!(
                "mask must be 8-bit gray without alpha, got {}",
                mask_format
            )));
        }
        if mask.width() != image.width() || mask.height() != image.height() {
            return Err(RenderFailure::MaskMismatch(format!(
                "mask is {}x{}, image is {}x{}",
                mask.width(),
                mask.height(),
                image.width(),
                image.height()
            )));
        }

        let size = int_size(image.width(), image.height())?;
        let invalid = || RenderFailure::InvalidDimensions {
            width: image.width() as f64,
            height: image.height() as f64,
        };
        let mut pixmap =
            Pixmap::from_vec(image.to_rgba8_premultiplied(), size).ok_or_else(invalid)?;
        // A gray sample is its own luminance.
        let mut coverage = Mask::new(size.width(), size.height()).ok_or_else(invalid)?;
        coverage.data_mut().copy_from_slice(mask.pixels());
        pixmap.apply_mask(&coverage);

        let format = if image.has_alpha() {
            image.format()
        } else {
            image.format().with_alpha(AlphaLayout::PremultipliedFirst)
        };
        Ok(bitmap_from_pixmap(&pixmap, self.drawable_format(format)))
    }

    fn snapshot(&self, surface: &RasterSurface) -> Result<Bitmap, RenderFailure> {
        Ok(bitmap_from_pixmap(&surface.pixmap, surface.format))
    }
}
