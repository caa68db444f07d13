//! Shared types and enums used across imgcompose.
//! Includes `AlphaLayout`, `ColorSpace`, `Orientation`, `ContentMode`,
//! `InterpolationQuality` and the output `OutputFormat`.
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Where (and whether) a pixel stores its alpha sample, and whether the colour
/// samples are already multiplied by it.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlphaLayout {
    None,
    First,
    Last,
    PremultipliedFirst,
    PremultipliedLast,
}

impl AlphaLayout {
    pub fn has_alpha(self) -> bool {
        !matches!(self, AlphaLayout::None)
    }

    pub fn is_premultiplied(self) -> bool {
        matches!(
            self,
            AlphaLayout::PremultipliedFirst | AlphaLayout::PremultipliedLast
        )
    }

    /// Alpha sample precedes the colour samples.
    pub fn is_first(self) -> bool {
        matches!(self, AlphaLayout::First | AlphaLayout::PremultipliedFirst)
    }

    /// Straight alpha upgraded to its premultiplied counterpart; other layouts
    /// are returned as-is.
    pub fn premultiplied(self) -> Self {
        match self {
            AlphaLayout::First => AlphaLayout::PremultipliedFirst,
            AlphaLayout::Last => AlphaLayout::PremultipliedLast,
            other => other,
        }
    }
}

impl std::fmt::Display for AlphaLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AlphaLayout::None => "None",
            AlphaLayout::First => "First",
            AlphaLayout::Last => "Last",
            AlphaLayout::PremultipliedFirst => "PremultipliedFirst",
            AlphaLayout::PremultipliedLast => "PremultipliedLast",
        };
        write!(f, "{}", s)
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorSpace {
    Gray,
    Rgb,
}

impl ColorSpace {
    /// Number of colour samples per pixel, alpha excluded.
    pub fn channels(self) -> usize {
        match self {
            ColorSpace::Gray => 1,
            ColorSpace::Rgb => 3,
        }
    }
}

impl std::fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColorSpace::Gray => write!(f, "Gray"),
            ColorSpace::Rgb => write!(f, "Rgb"),
        }
    }
}

/// Display orientation of the raw pixel buffer, one per EXIF orientation value.
///
/// `Left` means the buffer is shown rotated 90° counter-clockwise, `Right`
/// rotated 90° clockwise. The mirrored variants additionally flip the image
/// horizontally before that rotation.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, Debug, Default, ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    #[default]
    Up,
    UpMirrored,
    Down,
    DownMirrored,
    Left,
    LeftMirrored,
    Right,
    RightMirrored,
}

impl Orientation {
    /// Maps an EXIF orientation tag (1-8). Returns `None` for other values.
    pub fn from_exif(value: u8) -> Option<Self> {
        Some(match value {
            1 => Orientation::Up,
            2 => Orientation::UpMirrored,
            3 => Orientation::Down,
            4 => Orientation::DownMirrored,
            5 => Orientation::LeftMirrored,
            6 => Orientation::Right,
            7 => Orientation::RightMirrored,
            8 => Orientation::Left,
            _ => return None,
        })
    }

    pub fn to_exif(self) -> u8 {
        match self {
            Orientation::Up => 1,
            Orientation::UpMirrored => 2,
            Orientation::Down => 3,
            Orientation::DownMirrored => 4,
            Orientation::LeftMirrored => 5,
            Orientation::Right => 6,
            Orientation::RightMirrored => 7,
            Orientation::Left => 8,
        }
    }

    /// Whether displaying the buffer swaps its width and height.
    pub fn swaps_axes(self) -> bool {
        matches!(
            self,
            Orientation::Left
                | Orientation::LeftMirrored
                | Orientation::Right
                | Orientation::RightMirrored
        )
    }

    pub fn is_mirrored(self) -> bool {
        matches!(
            self,
            Orientation::UpMirrored
                | Orientation::DownMirrored
                | Orientation::LeftMirrored
                | Orientation::RightMirrored
        )
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Orientation::Up => "Up",
            Orientation::UpMirrored => "UpMirrored",
            Orientation::Down => "Down",
            Orientation::DownMirrored => "DownMirrored",
            Orientation::Left => "Left",
            Orientation::LeftMirrored => "LeftMirrored",
            Orientation::Right => "Right",
            Orientation::RightMirrored => "RightMirrored",
        };
        write!(f, "{}", s)
    }
}

/// Scale-ratio policy for a bounded resize.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentMode {
    /// Cover the bounds; the result is at least as large as the bounds.
    AspectFill,
    /// Fit inside the bounds; the result is at most as large as the bounds.
    AspectFit,
}

impl std::fmt::Display for ContentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentMode::AspectFill => write!(f, "AspectFill"),
            ContentMode::AspectFit => write!(f, "AspectFit"),
        }
    }
}

#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default, ValueEnum, Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum InterpolationQuality {
    None,
    Low,
    Medium,
    #[default]
    High,
}

impl std::fmt::Display for InterpolationQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InterpolationQuality::None => write!(f, "None"),
            InterpolationQuality::Low => write!(f, "Low"),
            InterpolationQuality::Medium => write!(f, "Medium"),
            InterpolationQuality::High => write!(f, "High"),
        }
    }
}

#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Default, ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Png,
    Jpeg, // No alpha; transparent pixels come out black
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpg",
        }
    }
}
