//! Crate-level error type and `Result` alias.
//! Wraps I/O, codec and JSON failures, and carries the rendering backend's
//! `RenderFailure` for surfaces that cannot be created or drawn into.
use thiserror::Error;

use crate::core::bitmap::PixelFormat;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures reported by a rendering backend.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RenderFailure {
    #[error("Invalid surface dimensions: {width}x{height}")]
    InvalidDimensions { width: f64, height: f64 },

    #[error("Unsupported destination format: {0}")]
    UnsupportedFormat(PixelFormat),

    #[error("Mask mismatch: {0}")]
    MaskMismatch(String),

    #[error("Drawing transform is not invertible")]
    SingularTransform,

    #[error("Resampling failed: {0}")]
    Resample(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image codec error: {0}")]
    Image(#[from] image::ImageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Render failure: {0}")]
    Render(#[from] RenderFailure),

    #[error("Pixel buffer has {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },

    #[error("Unsupported bits per component: {0}")]
    UnsupportedBitDepth(u8),

    #[error("Invalid argument: {arg}={value}")]
    InvalidArgument { arg: &'static str, value: String },

    #[error("Size must be greater than 0, got: {size}")]
    ZeroSize { size: u32 },

    #[error("Processing error: {0}")]
    Processing(String),
}
