use std::path::Path;

use tracing::info;
use tracing_subscriber::EnvFilter;

use imgcompose::api::{Compositor, process_directory_to_path, thumbnail_file_to_path};
use imgcompose::core::bitmap::Bitmap;
use imgcompose::core::geometry::{Rect, Size};
use imgcompose::io::{load_bitmap, save_bitmap};
use imgcompose::types::OutputFormat;
use imgcompose::ThumbnailParams;

use super::args::{CliArgs, Command, SingleIo, ThumbnailOverrides};
use super::errors::AppError;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Output format implied by the file extension, if it names one.
fn format_from_extension(path: &Path) -> Option<OutputFormat> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some(OutputFormat::Png),
        "jpg" | "jpeg" => Some(OutputFormat::Jpeg),
        _ => None,
    }
}

fn resolve_format(explicit: Option<OutputFormat>, output: &Path) -> Result<OutputFormat, AppError> {
    explicit
        .or_else(|| format_from_extension(output))
        .ok_or_else(|| AppError::UnknownOutputFormat {
            path: output.display().to_string(),
        })
}

/// Config file values (or defaults) with the explicit flags applied on top.
fn resolve_params(
    overrides: &ThumbnailOverrides,
    output: Option<&Path>,
) -> Result<ThumbnailParams, AppError> {
    let mut params = match &overrides.config {
        Some(path) => {
            info!("Loading thumbnail parameters from {:?}", path);
            ThumbnailParams::from_json_file(path)?
        }
        None => ThumbnailParams::default(),
    };

    if let Some(size) = overrides.size {
        params.size = size;
    }
    if let Some(border) = overrides.border {
        params.border = border;
    }
    if let Some(corner) = overrides.corner {
        params.corner_radius = corner;
    }
    if let Some(quality) = overrides.quality {
        params.quality = quality;
    }
    match (overrides.format, output.and_then(format_from_extension)) {
        (Some(format), _) => params.format = format,
        (None, Some(format)) if overrides.config.is_none() => params.format = format,
        _ => {}
    }
    if overrides.orientation.is_some() {
        params.orientation = overrides.orientation;
    }
    params.sidecar |= overrides.sidecar;

    if params.size == 0 {
        return Err(AppError::ZeroSize { size: params.size });
    }
    Ok(params)
}

/// Loads the input of a single-image command and applies its orientation flag.
fn load_input(io: &SingleIo) -> Result<Bitmap, AppError> {
    let bitmap = load_bitmap(&io.input)?;
    Ok(match io.orientation {
        Some(orientation) => bitmap.with_orientation(orientation),
        None => bitmap,
    })
}

fn save_output(bitmap: &Bitmap, io: &SingleIo) -> Result<(), AppError> {
    let format = resolve_format(io.format, &io.output)?;
    save_bitmap(bitmap, &io.output, format)?;
    info!(
        "Successfully processed: {:?} -> {:?} ({}x{})",
        io.input,
        io.output,
        bitmap.width(),
        bitmap.height()
    );
    Ok(())
}

pub fn run(args: CliArgs) -> Result<(), AppError> {
    if args.log {
        init_logging();
    }

    let compositor = Compositor::raster();

    match args.command {
        Command::Thumbnail {
            input,
            output,
            overrides,
        } => {
            let params = resolve_params(&overrides, Some(&output))?;
            thumbnail_file_to_path(&input, &output, &params)?;
        }
        Command::Batch {
            input_dir,
            output_dir,
            fail_fast,
            overrides,
        } => {
            let params = resolve_params(&overrides, None)?;
            info!("Output directory: {:?}", output_dir);
            let report = process_directory_to_path(&input_dir, &output_dir, &params, !fail_fast)?;
            info!("Processed: {}", report.processed);
            info!("Skipped: {}", report.skipped);
            info!("Errors: {}", report.errors);
        }
        Command::Resize {
            io,
            width,
            height,
            mode,
            quality,
        } => {
            let bitmap = load_input(&io)?;
            let target = Size::new(width, height);
            let resized = match mode {
                Some(mode) => compositor.resize_with_content_mode(&bitmap, target, mode, quality)?,
                None => compositor.resize(&bitmap, target, quality)?,
            };
            save_output(&resized, &io)?;
        }
        Command::Crop {
            io,
            x,
            y,
            width,
            height,
        } => {
            let bitmap = load_input(&io)?;
            let cropped = compositor.crop(&bitmap, Rect::new(x, y, width, height));
            save_output(&cropped, &io)?;
        }
        Command::Border { io, border } => {
            let bitmap = load_input(&io)?;
            let bordered = compositor.add_transparent_border(&bitmap, border)?;
            save_output(&bordered, &io)?;
        }
        Command::Round { io, corner, border } => {
            let bitmap = load_input(&io)?;
            let rounded = compositor.round_corners(&bitmap, corner, border)?;
            save_output(&rounded, &io)?;
        }
    }

    Ok(())
}
