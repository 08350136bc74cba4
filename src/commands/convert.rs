//! File and Base64 conversion commands.

use std::path::PathBuf;

use clap::Args;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use convertify_core::{AppError, AppResult, ErrorKind};
use convertify_image::ImageConverter;

use crate::output::{self, OutputFormat};

/// Arguments for file-path conversion
#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// Source image file
    pub input: PathBuf,
    /// Destination file; its extension selects the output format
    pub output: PathBuf,
}

/// Arguments for data URI conversion
#[derive(Debug, Args)]
pub struct ConvertBase64Args {
    /// Target format (jpg, png, gif, webp, tiff, jp2)
    #[arg(short, long)]
    pub to: String,
    /// File holding the data URI (stdin when omitted)
    #[arg(short, long)]
    pub input: Option<PathBuf>,
    /// File to write the converted data URI to (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute file-path conversion
pub async fn execute(
    args: &ConvertArgs,
    converter: &ImageConverter,
    format: OutputFormat,
) -> AppResult<()> {
    converter.convert_file(&args.input, &args.output).await?;

    match format {
        OutputFormat::Json => output::print_json(&serde_json::json!({
            "input": args.input,
            "output": args.output,
        })),
        OutputFormat::Text => output::print_success(&format!(
            "Converted {} -> {}",
            args.input.display(),
            args.output.display()
        )),
    }
    Ok(())
}

/// Execute data URI conversion
pub async fn execute_base64(
    args: &ConvertBase64Args,
    converter: &ImageConverter,
    format: OutputFormat,
) -> AppResult<()> {
    let data_uri = match &args.input {
        Some(path) => tokio::fs::read_to_string(path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Read,
                format!("Failed to read '{}'", path.display()),
                e,
            )
        })?,
        None => {
            let mut buf = String::new();
            tokio::io::stdin().read_to_string(&mut buf).await?;
            buf
        }
    };

    let converted = converter
        .convert_from_base64(data_uri.trim(), &args.to)
        .await?;

    match &args.output {
        Some(path) => {
            tokio::fs::write(path, &converted).await?;
            match format {
                OutputFormat::Json => output::print_json(&serde_json::json!({
                    "target_format": args.to,
                    "output": path,
                    "length": converted.len(),
                })),
                OutputFormat::Text => {
                    output::print_success(&format!("Wrote {}", path.display()));
                }
            }
        }
        None => match format {
            OutputFormat::Json => output::print_json(&serde_json::json!({
                "target_format": args.to,
                "data_uri": converted,
            })),
            OutputFormat::Text => {
                let mut stdout = tokio::io::stdout();
                stdout.write_all(converted.as_bytes()).await?;
                stdout.write_all(b"\n").await?;
                stdout.flush().await?;
            }
        },
    }
    Ok(())
}
