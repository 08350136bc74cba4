//! Platform-specific installation of ImageMagick.
//!
//! Linux uses apt, macOS uses Homebrew. Windows and anything else get an
//! `UnsupportedPlatform` error before any command is built.

use crate::error::ConversionError;
use crate::executor::ToolInvocation;

/// Manual installation page for platforms without a package-manager plan.
pub const WINDOWS_DOWNLOAD_URL: &str = "https://imagemagick.org/script/download.php#windows";

/// Operating system the converter runs on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Platform {
    /// Debian-style Linux with apt.
    Linux,
    /// macOS with Homebrew.
    MacOs,
    /// Windows (manual installation only).
    Windows,
    /// Any other identifier, kept as reported.
    Other(String),
}

impl Platform {
    /// The platform this binary was compiled for.
    pub fn current() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    /// Map an OS identifier (`std::env::consts::OS` style) to a platform.
    pub fn from_os(os: &str) -> Self {
        match os {
            "linux" => Self::Linux,
            "macos" => Self::MacOs,
            "windows" => Self::Windows,
            other => Self::Other(other.to_string()),
        }
    }

    /// Identifier used in messages.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Linux => "linux",
            Self::MacOs => "macos",
            Self::Windows => "windows",
            Self::Other(os) => os,
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ordered package-manager steps for one platform.
#[derive(Debug, Clone)]
pub struct InstallPlan {
    /// Steps run in order; the first failure stops the plan.
    pub steps: Vec<ToolInvocation>,
}

impl InstallPlan {
    /// Build the plan for `platform`.
    pub fn for_platform(platform: &Platform) -> Result<Self, ConversionError> {
        let steps = match platform {
            Platform::Linux => vec![
                ToolInvocation::new("sudo").args(["apt", "update"]),
                ToolInvocation::new("sudo").args([
                    "apt",
                    "install",
                    "-y",
                    "imagemagick",
                    "libopenjp2-7",
                    "ghostscript",
                ]),
            ],
            Platform::MacOs => {
                vec![ToolInvocation::new("brew").args(["install", "imagemagick"])]
            }
            Platform::Windows => {
                return Err(ConversionError::UnsupportedPlatform {
                    platform: platform.to_string(),
                    hint: format!("Please install ImageMagick manually: {WINDOWS_DOWNLOAD_URL}"),
                });
            }
            Platform::Other(_) => {
                return Err(ConversionError::UnsupportedPlatform {
                    platform: platform.to_string(),
                    hint: "Please install ImageMagick with your system package manager."
                        .to_string(),
                });
            }
        };

        Ok(Self { steps })
    }
}
