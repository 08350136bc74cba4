//! ImageMagick installation command.

use clap::Args;

use convertify_core::{AppError, AppResult};
use convertify_image::ImageConverter;

use crate::output::{self, OutputFormat};

/// Arguments for the install command
#[derive(Debug, Args)]
pub struct InstallArgs {
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Execute the install command
pub async fn execute(
    args: &InstallArgs,
    converter: &ImageConverter,
    format: OutputFormat,
) -> AppResult<()> {
    if !args.yes {
        let confirmed = dialoguer::Confirm::new()
            .with_prompt("Install ImageMagick with the system package manager (may use sudo)?")
            .default(false)
            .interact()
            .map_err(|e| AppError::internal(format!("Input error: {}", e)))?;

        if !confirmed {
            output::print_warning("Installation cancelled");
            return Ok(());
        }
    }

    converter.install_tool().await?;

    match format {
        OutputFormat::Json => output::print_json(&serde_json::json!({ "installed": true })),
        OutputFormat::Text => output::print_success("ImageMagick installed successfully"),
    }
    Ok(())
}
