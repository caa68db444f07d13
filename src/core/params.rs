use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{InterpolationQuality, Orientation, OutputFormat};

/// Thumbnail parameters suitable for config files and batch runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThumbnailParams {
    /// Side of the square thumbnail before the border is added
    pub size: u32,
    /// Transparent border width in pixels; 0 disables the border
    pub border: u32,
    /// Corner rounding radius in pixels; 0 keeps square corners
    pub corner_radius: u32,
    pub quality: InterpolationQuality,
    pub format: OutputFormat,
    /// Overrides the orientation read from the file, if set
    pub orientation: Option<Orientation>,
    /// Write a JSON sidecar next to each output
    pub sidecar: bool,
}

impl Default for ThumbnailParams {
    fn default() -> Self {
        Self {
            size: 128,
            border: 0,
            corner_radius: 0,
            quality: InterpolationQuality::High,
            format: OutputFormat::Png,
            orientation: None,
            sidecar: false,
        }
    }
}

impl ThumbnailParams {
    /// Loads parameters from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let params: Self = serde_json::from_str(&text)?;
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(Error::ZeroSize { size: self.size });
        }
        Ok(())
    }

    /// Side length of the produced image: `size + 2 * border`.
    pub fn output_side(&self) -> u64 {
        self.size as u64 + 2 * self.border as u64
    }
}
