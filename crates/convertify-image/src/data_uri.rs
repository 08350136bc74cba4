//! Parsing and building `data:image/<subtype>;base64,<payload>` strings.

use base64::Engine;
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::engine::DecodePaddingMode;

use crate::error::ConversionError;
use crate::formats::SourceFormat;

const IMAGE_PREFIX: &str = "data:image/";
const BASE64_MARKER: &str = ";base64,";

/// Standard alphabet that accepts payloads with or without `=` padding.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// A decoded image data URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    /// Format declared by the URI's media subtype.
    pub format: SourceFormat,
    /// Decoded payload bytes.
    pub bytes: Vec<u8>,
}

impl DataUri {
    /// Parse an image data URI.
    ///
    /// The format comes from the declared subtype only; the payload is
    /// never inspected. ASCII whitespace inside the payload is ignored so
    /// line-wrapped URIs are accepted.
    pub fn parse(input: &str) -> Result<Self, ConversionError> {
        let rest = input.strip_prefix(IMAGE_PREFIX).ok_or_else(|| {
            ConversionError::invalid_input("expected a data URI starting with 'data:image/'")
        })?;

        let (subtype, payload) = rest.split_once(BASE64_MARKER).ok_or_else(|| {
            ConversionError::invalid_input("missing ';base64,' marker after the media type")
        })?;

        let format = SourceFormat::from_subtype(subtype).ok_or_else(|| {
            ConversionError::invalid_input(format!("unsupported image subtype '{subtype}'"))
        })?;

        let compact: String = payload
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();
        if compact.is_empty() {
            return Err(ConversionError::invalid_input("empty Base64 payload"));
        }

        let bytes = LENIENT
            .decode(compact.as_bytes())
            .map_err(|e| ConversionError::invalid_input(format!("malformed Base64 payload: {e}")))?;

        Ok(Self { format, bytes })
    }
}

/// Build an image data URI from a subtype and raw bytes.
pub fn encode(subtype: &str, bytes: &[u8]) -> String {
    format!(
        "{IMAGE_PREFIX}{subtype}{BASE64_MARKER}{}",
        STANDARD.encode(bytes)
    )
}

/// Split a data URI into its subtype and decoded bytes without restricting
/// the subtype. Useful for reading back URIs this crate produced.
pub fn decode_payload(input: &str) -> Result<(String, Vec<u8>), ConversionError> {
    let rest = input
        .strip_prefix(IMAGE_PREFIX)
        .ok_or_else(|| ConversionError::invalid_input("not an image data URI"))?;
    let (subtype, payload) = rest
        .split_once(BASE64_MARKER)
        .ok_or_else(|| ConversionError::invalid_input("missing ';base64,' marker"))?;
    let bytes = LENIENT
        .decode(payload.as_bytes())
        .map_err(|e| ConversionError::invalid_input(format!("malformed Base64 payload: {e}")))?;
    Ok((subtype.to_string(), bytes))
}
