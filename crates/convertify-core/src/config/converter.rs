//! Configuration for the image conversion subsystem.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Settings for the ImageMagick-backed converter.
///
/// The temp directory is resolved from `temp_root` and handed to the
/// converter at construction; nothing here is global.
#[derive(Debug, Clone, Validate, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Executable used for conversions and detection (`convert` for
    /// ImageMagick 6, `magick` for ImageMagick 7).
    #[validate(length(min = 1))]
    pub tool_path: String,

    /// Argument passed to the tool to print its version.
    #[validate(length(min = 1))]
    pub version_arg: String,

    /// Root directory for staged conversion files.
    ///
    /// Falls back to `<os temp>/convertify` when unset.
    pub temp_root: Option<PathBuf>,

    /// Upper bound in seconds for any single tool invocation.
    ///
    /// Unset means the converter waits on the tool indefinitely.
    #[validate(range(min = 1, max = 86400))]
    pub tool_timeout_seconds: Option<u64>,

    /// Number of stderr characters kept in conversion errors.
    #[validate(range(min = 1, max = 1_000_000))]
    pub stderr_limit: usize,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            tool_path: default_tool_path(),
            version_arg: default_version_arg(),
            temp_root: None,
            tool_timeout_seconds: None,
            stderr_limit: default_stderr_limit(),
        }
    }
}

fn default_tool_path() -> String {
    "convert".to_string()
}

fn default_version_arg() -> String {
    "-version".to_string()
}

fn default_stderr_limit() -> usize {
    2000
}

impl ConverterConfig {
    /// Resolve the effective temp root directory.
    pub fn effective_temp_root(&self) -> PathBuf {
        self.temp_root
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("convertify"))
    }

    /// The configured tool timeout, if any.
    pub fn tool_timeout(&self) -> Option<Duration> {
        self.tool_timeout_seconds.map(Duration::from_secs)
    }
}
