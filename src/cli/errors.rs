use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Size must be greater than 0, got: {size}")]
    ZeroSize { size: u32 },

    #[error("Cannot tell the output format from {path:?}; pass --format png or --format jpeg")]
    UnknownOutputFormat { path: String },

    #[error(transparent)]
    Library(#[from] imgcompose::Error),
}
