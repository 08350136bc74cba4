//! Domain models for a single conversion.

use crate::data_uri::DataUri;
use crate::error::ConversionError;
use crate::formats::{SourceFormat, TargetFormat};

/// A validated Base64 conversion request. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    source_bytes: Vec<u8>,
    source_format: SourceFormat,
    target_format: TargetFormat,
}

impl ConversionRequest {
    /// Validate a target format string and a data URI, in that order.
    ///
    /// Nothing is written anywhere; a failure here means no file I/O has
    /// happened for the request.
    pub fn from_data_uri(data_uri: &str, target_format: &str) -> Result<Self, ConversionError> {
        let target_format: TargetFormat = target_format.parse()?;
        let DataUri { format, bytes } = DataUri::parse(data_uri)?;

        Ok(Self {
            source_bytes: bytes,
            source_format: format,
            target_format,
        })
    }

    /// Decoded image bytes.
    pub fn source_bytes(&self) -> &[u8] {
        &self.source_bytes
    }

    /// Format declared by the data URI.
    pub fn source_format(&self) -> SourceFormat {
        self.source_format
    }

    /// Requested output format.
    pub fn target_format(&self) -> TargetFormat {
        self.target_format
    }
}
