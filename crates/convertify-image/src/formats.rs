//! Source and target image formats accepted by the converter.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConversionError;

/// Input formats recognised from a data URI's `image/<subtype>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    /// Portable Network Graphics
    Png,
    /// JPEG (declared as `jpeg` or `jpg`)
    Jpeg,
    /// JPEG 2000
    Jp2,
    /// Graphics Interchange Format
    Gif,
    /// Windows bitmap
    Bmp,
    /// Tagged Image File Format
    Tiff,
    /// WebP
    Webp,
    /// High Efficiency Image Container
    Heic,
}

impl SourceFormat {
    /// Determine the source format from a data URI subtype.
    ///
    /// Matching is exact: `image/PNG` is not a recognised subtype.
    pub fn from_subtype(subtype: &str) -> Option<Self> {
        match subtype {
            "png" => Some(Self::Png),
            "jpeg" | "jpg" => Some(Self::Jpeg),
            "jp2" => Some(Self::Jp2),
            "gif" => Some(Self::Gif),
            "bmp" => Some(Self::Bmp),
            "tiff" => Some(Self::Tiff),
            "webp" => Some(Self::Webp),
            "heic" => Some(Self::Heic),
            _ => None,
        }
    }

    /// File extension used when staging input of this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Jp2 => "jp2",
            Self::Gif => "gif",
            Self::Bmp => "bmp",
            Self::Tiff => "tiff",
            Self::Webp => "webp",
            Self::Heic => "heic",
        }
    }
}

impl std::fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Output formats the Base64 pipeline will produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetFormat {
    /// JPEG
    Jpg,
    /// Portable Network Graphics
    Png,
    /// Graphics Interchange Format
    Gif,
    /// WebP
    Webp,
    /// Tagged Image File Format
    Tiff,
    /// JPEG 2000
    Jp2,
}

impl TargetFormat {
    /// Every supported target, in documentation order.
    pub const ALL: [TargetFormat; 6] = [
        Self::Jpg,
        Self::Png,
        Self::Gif,
        Self::Webp,
        Self::Tiff,
        Self::Jp2,
    ];

    /// File extension, which is also the data URI subtype of the result.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Jpg => "jpg",
            Self::Png => "png",
            Self::Gif => "gif",
            Self::Webp => "webp",
            Self::Tiff => "tiff",
            Self::Jp2 => "jp2",
        }
    }
}

impl FromStr for TargetFormat {
    type Err = ConversionError;

    /// Parse a target format. Case-sensitive: `"JPG"` is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.extension() == s)
            .ok_or_else(|| ConversionError::unsupported_format(s))
    }
}

impl std::fmt::Display for TargetFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// File extensions `file_to_base64` accepts, compared exactly as written.
pub const ENCODABLE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "webp", "tiff", "jp2", "bmp", "heic",
];

/// Whether a file extension may be encoded into a data URI.
pub fn is_encodable_extension(ext: &str) -> bool {
    ENCODABLE_EXTENSIONS.contains(&ext)
}
