//! High-level, ergonomic library API: a `Compositor` bound to a rendering
//! backend, file-to-file thumbnail generation and directory batch helpers.
//! Prefer these entrypoints over the low-level processing modules when
//! integrating imgcompose.
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use image::ImageFormat;
use tracing::{info, warn};

use crate::core::bitmap::Bitmap;
use crate::core::geometry::{Rect, Size};
use crate::core::params::ThumbnailParams;
use crate::core::processing;
use crate::error::{Error, Result};
use crate::io::reader::load_bitmap;
use crate::io::writers::image::save_bitmap;
use crate::io::writers::metadata::{ThumbnailRecord, write_sidecar};
use crate::render::{RasterBackend, RenderBackend};
use crate::types::{ContentMode, InterpolationQuality};

/// Image compositing operations bound to one rendering backend.
#[derive(Debug, Clone, Default)]
pub struct Compositor<B: RenderBackend = RasterBackend> {
    backend: B,
}

impl Compositor<RasterBackend> {
    /// Compositor using the built-in software rasterizer.
    pub fn raster() -> Self {
        Self::default()
    }
}

impl<B: RenderBackend> Compositor<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn has_alpha(&self, bitmap: &Bitmap) -> bool {
        processing::has_alpha(bitmap)
    }

    pub fn ensure_alpha(&self, bitmap: &Bitmap) -> Result<Bitmap> {
        processing::ensure_alpha(&self.backend, bitmap)
    }

    pub fn add_transparent_border(&self, bitmap: &Bitmap, border: u32) -> Result<Bitmap> {
        processing::add_transparent_border(&self.backend, bitmap, border)
    }

    pub fn resize(
        &self,
        bitmap: &Bitmap,
        target: Size,
        quality: InterpolationQuality,
    ) -> Result<Bitmap> {
        processing::resize(&self.backend, bitmap, target, quality)
    }

    pub fn resize_with_content_mode(
        &self,
        bitmap: &Bitmap,
        bounds: Size,
        mode: ContentMode,
        quality: InterpolationQuality,
    ) -> Result<Bitmap> {
        processing::resize_with_content_mode(&self.backend, bitmap, bounds, mode, quality)
    }

    pub fn crop(&self, bitmap: &Bitmap, rect: Rect) -> Bitmap {
        processing::crop(bitmap, rect)
    }

    pub fn round_corners(&self, bitmap: &Bitmap, corner: u32, border: u32) -> Result<Bitmap> {
        processing::round_corners(&self.backend, bitmap, corner, border)
    }

    pub fn thumbnail(
        &self,
        bitmap: &Bitmap,
        size: u32,
        border: u32,
        corner: u32,
        quality: InterpolationQuality,
    ) -> Result<Bitmap> {
        processing::thumbnail(&self.backend, bitmap, size, border, corner, quality)
    }

    /// Runs `thumbnail` with the values from `params`.
    pub fn thumbnail_with_params(&self, bitmap: &Bitmap, params: &ThumbnailParams) -> Result<Bitmap> {
        params.validate()?;
        let source = match params.orientation {
            Some(orientation) => bitmap.clone().with_orientation(orientation),
            None => bitmap.clone(),
        };
        self.thumbnail(
            &source,
            params.size,
            params.border,
            params.corner_radius,
            params.quality,
        )
    }
}

/// Load `input`, build its thumbnail with `params` and save it to `output`.
/// Writes a JSON sidecar as well when `params.sidecar` is set.
pub fn thumbnail_file_to_path(input: &Path, output: &Path, params: &ThumbnailParams) -> Result<Bitmap> {
    params.validate()?;
    let source = load_bitmap(input)?;
    let thumbnail = Compositor::raster().thumbnail_with_params(&source, params)?;
    save_bitmap(&thumbnail, output, params.format)?;

    if params.sidecar {
        let record = ThumbnailRecord::new(input, output, &source, &thumbnail, params);
        write_sidecar(output, &record)?;
    }
    info!("Thumbnail written: {:?} -> {:?}", input, output);
    Ok(thumbnail)
}

/// Batch processing report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub processed: usize,
    pub skipped: usize,
    pub errors: usize,
}

/// Whether the file extension names an image format `image` can decode.
pub fn is_supported_image(path: &Path) -> bool {
    ImageFormat::from_path(path).is_ok_and(|format| format.reading_enabled())
}

/// Regular files directly inside `input_dir`, sorted by path.
pub fn iterate_input_files(input_dir: &Path) -> Result<std::vec::IntoIter<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(input_dir).map_err(Error::from)? {
        let entry = entry.map_err(Error::from)?;
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files.into_iter())
}

/// Thumbnail every supported image in `input_dir` into `output_dir` using `params`.
/// If `continue_on_error` is true, errors are counted in the report and processing continues; otherwise, the first error is returned.
pub fn process_directory_to_path(
    input_dir: &Path,
    output_dir: &Path,
    params: &ThumbnailParams,
    continue_on_error: bool,
) -> Result<BatchReport> {
    params.validate()?;
    std::fs::create_dir_all(output_dir).map_err(Error::from)?;

    let mut report = BatchReport::default();
    let mut written: HashSet<PathBuf> = HashSet::new();

    info!("Starting batch processing from directory: {:?}", input_dir);
    for path in iterate_input_files(input_dir)? {
        let stem = match path.file_stem() {
            Some(stem) if is_supported_image(&path) => stem.to_string_lossy().into_owned(),
            _ => {
                info!("Skipping unsupported file: {:?}", path);
                report.skipped += 1;
                continue;
            }
        };
        let output_path = output_dir.join(format!("{}.{}", stem, params.format.extension()));

        // `a.png` and `a.jpg` would both write `a.<ext>`.
        let outcome = if written.contains(&output_path) {
            Err(Error::Processing(format!(
                "{:?} maps to {:?}, already written by an earlier input",
                path, output_path
            )))
        } else {
            info!("Processing: {:?} -> {:?}", path, output_path);
            thumbnail_file_to_path(&path, &output_path, params)
        };
        match outcome {
            Ok(_) => {
                report.processed += 1;
                written.insert(output_path);
            }
            Err(e) => {
                warn!("Error processing {:?}: {}", path, e);
                report.errors += 1;
                if !continue_on_error {
                    return Err(e);
                }
            }
        }
    }

    info!(
        "Batch processing complete: processed={} skipped={} errors={}",
        report.processed, report.skipped, report.errors
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::bitmap::PixelFormat;
    use crate::types::Orientation;

    #[test]
    fn supported_extensions() {
        assert!(is_supported_image(Path::new("a.png")));
        assert!(is_supported_image(Path::new("b.JPG")));
        assert!(!is_supported_image(Path::new("notes.txt")));
        assert!(!is_supported_image(Path::new("no_extension")));
    }

    #[test]
    fn params_orientation_overrides_the_tag() {
        let pixels: Vec<u8> = (0..20 * 10 * 3).map(|v| v as u8).collect();
        let bitmap = Bitmap::new(20, 10, PixelFormat::rgb8(), pixels).unwrap();
        let params = ThumbnailParams {
            size: 8,
            orientation: Some(Orientation::Right),
            ..Default::default()
        };
        let result = Compositor::raster().thumbnail_with_params(&bitmap, &params).unwrap();
        assert_eq!((result.width(), result.height()), (8, 8));
        assert_eq!(bitmap.orientation(), Orientation::Up);
    }

    #[test]
    fn zero_size_params_fail_before_rendering() {
        let bitmap = Bitmap::new(1, 1, PixelFormat::gray8(), vec![0]).unwrap();
        let params = ThumbnailParams {
            size: 0,
            ..Default::default()
        };
        assert!(matches!(
            Compositor::raster().thumbnail_with_params(&bitmap, &params),
            Err(Error::ZeroSize { size: 0 })
        ));
    }
}
