//! Encode an image file as a data URI.

use std::path::PathBuf;

use clap::Args;

use convertify_core::AppResult;
use convertify_image::ImageConverter;

use crate::output::{self, OutputFormat};

/// Arguments for the encode command
#[derive(Debug, Args)]
pub struct EncodeArgs {
    /// Image file; the extension is used as the declared format
    pub path: PathBuf,
}

/// Execute the encode command
pub async fn execute(
    args: &EncodeArgs,
    converter: &ImageConverter,
    format: OutputFormat,
) -> AppResult<()> {
    let data_uri = converter.file_to_base64(&args.path).await?;

    match format {
        OutputFormat::Json => output::print_json(&serde_json::json!({
            "path": args.path,
            "data_uri": data_uri,
        })),
        OutputFormat::Text => println!("{}", data_uri),
    }
    Ok(())
}
