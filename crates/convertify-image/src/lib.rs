//! # convertify-image
//!
//! Image format conversion on top of the ImageMagick command-line tool.
//!
//! All decoding and encoding is done by the external binary. This crate
//! validates inputs, stages Base64 payloads into uniquely named temp files,
//! invokes the tool with an argument array (never a shell), reads the
//! result back and cleans up.
//!
//! ```no_run
//! # async fn demo() -> Result<(), convertify_image::ConversionError> {
//! use convertify_core::config::ConverterConfig;
//! use convertify_image::ImageConverter;
//!
//! let converter = ImageConverter::new(ConverterConfig::default())?;
//! if !converter.check_tool_installed().await {
//!     converter.install_tool().await?;
//! }
//! let jpg = converter
//!     .convert_from_base64("data:image/png;base64,iVBORw0KGgo=", "jpg")
//!     .await?;
//! assert!(jpg.starts_with("data:image/jpg;base64,"));
//! # Ok(())
//! # }
//! ```

pub mod converter;
pub mod data_uri;
pub mod error;
pub mod executor;
pub mod filesystem;
pub mod formats;
pub mod installer;
pub mod models;

pub use converter::ImageConverter;
pub use error::ConversionError;
pub use executor::{SystemToolRunner, ToolInvocation, ToolOutput, ToolRunner};
pub use formats::{SourceFormat, TargetFormat};
pub use installer::Platform;
pub use models::ConversionRequest;
