//! Unified error type for the image conversion crate.
//!
//! Every failure of a public [`ImageConverter`](crate::ImageConverter)
//! operation surfaces as one `ConversionError` variant, and maps cleanly to
//! `convertify_core::AppError` at the application boundary.

use std::path::PathBuf;

use convertify_core::{AppError, ErrorKind};
use thiserror::Error;

/// Unified error type for all image conversion operations.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// The external tool is not available.
    #[error("{tool} is not installed. Run install_tool() to install it.")]
    NotInstalled {
        /// The configured tool executable.
        tool: String,
    },

    /// A requested or detected format is outside the supported set.
    #[error("Unsupported format: {format}")]
    UnsupportedFormat {
        /// The rejected format string, exactly as received.
        format: String,
    },

    /// The data URI did not match `data:image/<subtype>;base64,<payload>`.
    #[error("Invalid Base64 image: {reason}")]
    InvalidInput {
        /// What was wrong with the input.
        reason: String,
    },

    /// The tool ran and failed, or its output could not be read back.
    #[error("{message}: {stderr}")]
    Conversion {
        /// Short description of the failed step.
        message: String,
        /// Diagnostic output from the tool, truncated.
        stderr: String,
    },

    /// The source file could not be read.
    #[error("Failed to read image file {path}: {source}")]
    Read {
        /// The file that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A package-manager step failed.
    #[error("Installation step '{step}' failed: {stderr}")]
    Installation {
        /// The command line of the failed step.
        step: String,
        /// Diagnostic output from the package manager.
        stderr: String,
    },

    /// Installation is not attempted on this platform.
    #[error("Automatic installation is not supported on {platform}. {hint}")]
    UnsupportedPlatform {
        /// The platform identifier.
        platform: String,
        /// What the caller should do instead.
        hint: String,
    },

    /// Converter configuration failed validation.
    #[error("Invalid converter configuration: {reason}")]
    InvalidConfig {
        /// Validation failure details.
        reason: String,
    },

    /// IO error while staging temp files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConversionError {
    /// The application-level category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotInstalled { .. } => ErrorKind::NotInstalled,
            Self::UnsupportedFormat { .. } => ErrorKind::UnsupportedFormat,
            Self::InvalidInput { .. } => ErrorKind::Validation,
            Self::Conversion { .. } => ErrorKind::Conversion,
            Self::Read { .. } => ErrorKind::Read,
            Self::Installation { .. } => ErrorKind::Installation,
            Self::UnsupportedPlatform { .. } => ErrorKind::UnsupportedPlatform,
            Self::InvalidConfig { .. } => ErrorKind::Configuration,
            Self::Io(_) => ErrorKind::Storage,
        }
    }

    pub(crate) fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    pub(crate) fn unsupported_format(format: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
        }
    }
}

impl From<ConversionError> for AppError {
    fn from(err: ConversionError) -> Self {
        let kind = err.kind();
        AppError::with_source(kind, err.to_string(), err)
    }
}
