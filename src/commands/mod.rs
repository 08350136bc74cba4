//! CLI command definitions and dispatch.

pub mod check;
pub mod convert;
pub mod encode;
pub mod install;

use clap::{Parser, Subcommand};

use convertify_core::AppResult;
use convertify_core::config::AppConfig;
use convertify_image::ImageConverter;

use crate::output::OutputFormat;

/// Convertify: image conversion through ImageMagick
#[derive(Debug, Parser)]
#[command(name = "convertify", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Report whether ImageMagick is available
    Check,
    /// Install ImageMagick with the system package manager
    Install(install::InstallArgs),
    /// Convert one image file into another
    Convert(convert::ConvertArgs),
    /// Convert a Base64 data URI to another format
    ConvertBase64(convert::ConvertBase64Args),
    /// Print an image file as a Base64 data URI
    Encode(encode::EncodeArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: AppConfig) -> AppResult<()> {
        let converter = ImageConverter::new(config.converter)?;
        tracing::debug!(
            command = ?self.command,
            temp_dir = %converter.temp_dir().display(),
            "Executing command"
        );

        match &self.command {
            Commands::Check => check::execute(&converter, self.format).await,
            Commands::Install(args) => install::execute(args, &converter, self.format).await,
            Commands::Convert(args) => convert::execute(args, &converter, self.format).await,
            Commands::ConvertBase64(args) => {
                convert::execute_base64(args, &converter, self.format).await
            }
            Commands::Encode(args) => encode::execute(args, &converter, self.format).await,
        }
    }
}
