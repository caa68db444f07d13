use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use imgcompose::types::{ContentMode, InterpolationQuality, Orientation, OutputFormat};

#[derive(Parser)]
#[command(name = "imgcompose", version, about = "imgcompose CLI")]
pub struct CliArgs {
    /// Enable logging (RUST_LOG overrides the default level)
    #[arg(long, global = true, default_value_t = false)]
    pub log: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Square thumbnail with optional transparent border and rounded corners
    Thumbnail {
        /// Input image file
        #[arg(short, long)]
        input: PathBuf,

        /// Output filename
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        overrides: ThumbnailOverrides,
    },

    /// Thumbnail every image of a directory
    Batch {
        /// Input directory containing image files
        #[arg(long)]
        input_dir: PathBuf,

        /// Output directory for the thumbnails
        #[arg(long)]
        output_dir: PathBuf,

        /// Stop at the first file that fails instead of counting it and moving on
        #[arg(long, default_value_t = false)]
        fail_fast: bool,

        #[command(flatten)]
        overrides: ThumbnailOverrides,
    },

    /// Resize upright into a bounding box, or to an exact size
    Resize {
        #[command(flatten)]
        io: SingleIo,

        /// Target width in pixels
        #[arg(long)]
        width: f64,

        /// Target height in pixels
        #[arg(long)]
        height: f64,

        /// Fit mode; omit to stretch to exactly width x height
        #[arg(long, value_enum)]
        mode: Option<ContentMode>,

        /// Interpolation quality
        #[arg(long, value_enum, default_value_t = InterpolationQuality::High)]
        quality: InterpolationQuality,
    },

    /// Copy a rectangle of the raw pixels
    Crop {
        #[command(flatten)]
        io: SingleIo,

        #[arg(long)]
        x: f64,

        #[arg(long)]
        y: f64,

        #[arg(long)]
        width: f64,

        #[arg(long)]
        height: f64,
    },

    /// Surround with a transparent border
    Border {
        #[command(flatten)]
        io: SingleIo,

        /// Border width in pixels
        #[arg(long)]
        border: u32,
    },

    /// Clip to a rounded rectangle
    Round {
        #[command(flatten)]
        io: SingleIo,

        /// Corner radius in pixels
        #[arg(long)]
        corner: u32,

        /// Inset of the rounded rectangle in pixels
        #[arg(long, default_value_t = 0)]
        border: u32,
    },
}

#[derive(Args)]
pub struct SingleIo {
    /// Input image file
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output filename
    #[arg(short, long)]
    pub output: PathBuf,

    /// Output format (png or jpeg); guessed from the output extension if omitted
    #[arg(short = 'f', long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Override the orientation read from the file
    #[arg(long, value_enum)]
    pub orientation: Option<Orientation>,
}

/// Thumbnail settings. Each flag given overrides the `--config` value.
#[derive(Args)]
pub struct ThumbnailOverrides {
    /// JSON file with thumbnail parameters
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Side of the square thumbnail in pixels
    #[arg(long)]
    pub size: Option<u32>,

    /// Transparent border width in pixels
    #[arg(long)]
    pub border: Option<u32>,

    /// Corner radius in pixels
    #[arg(long)]
    pub corner: Option<u32>,

    /// Interpolation quality
    #[arg(long, value_enum)]
    pub quality: Option<InterpolationQuality>,

    /// Output format (png or jpeg)
    #[arg(short = 'f', long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Override the orientation read from the file
    #[arg(long, value_enum)]
    pub orientation: Option<Orientation>,

    /// Write a JSON metadata sidecar next to each output
    #[arg(long, default_value_t = false)]
    pub sidecar: bool,
}
