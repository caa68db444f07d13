use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::bitmap::Bitmap;
use crate::core::params::ThumbnailParams;
use crate::error::Result;
use crate::types::Orientation;

/// Provenance of one generated thumbnail, written as a JSON sidecar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThumbnailRecord {
    pub input: String,
    pub output: String,
    pub source_width: usize,
    pub source_height: usize,
    pub source_orientation: Orientation,
    pub width: usize,
    pub height: usize,
    pub params: ThumbnailParams,
    /// RFC 3339 UTC timestamp
    pub created_at: String,
}

impl ThumbnailRecord {
    pub fn new(
        input: &Path,
        output: &Path,
        source: &Bitmap,
        result: &Bitmap,
        params: &ThumbnailParams,
    ) -> Self {
        Self {
            input: input.display().to_string(),
            output: output.display().to_string(),
            source_width: source.width(),
            source_height: source.height(),
            source_orientation: source.orientation(),
            width: result.width(),
            height: result.height(),
            params: params.clone(),
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

/// Sidecar location for an output image: same stem, `.json` extension.
pub fn sidecar_path(output_path: &Path) -> PathBuf {
    output_path.with_extension("json")
}

/// Writes `record` as pretty JSON next to `output_path` and returns the
/// sidecar path.
pub fn write_sidecar(output_path: &Path, record: &ThumbnailRecord) -> Result<PathBuf> {
    let path = sidecar_path(output_path);
    let json_string = serde_json::to_string_pretty(record)?;
    std::fs::write(&path, json_string)?;
    info!("Created metadata sidecar: {:?}", path);
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::bitmap::PixelFormat;

    #[test]
    fn sidecar_replaces_extension() {
        assert_eq!(
            sidecar_path(Path::new("/out/photo.png")),
            PathBuf::from("/out/photo.json")
        );
    }

    #[test]
    fn record_round_trips_through_json() {
        let source = Bitmap::new(4, 2, PixelFormat::gray8(), vec![0; 8])
            .unwrap()
            .with_orientation(Orientation::Right);
        let result = Bitmap::new(2, 2, PixelFormat::gray8(), vec![0; 4]).unwrap();
        let record = ThumbnailRecord::new(
            Path::new("in.jpg"),
            Path::new("out.png"),
            &source,
            &result,
            &ThumbnailParams::default(),
        );

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains(r#""source_orientation":"right""#));
        let back: ThumbnailRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
        assert!(chrono::DateTime::parse_from_rfc3339(&back.created_at).is_ok());
    }
}
