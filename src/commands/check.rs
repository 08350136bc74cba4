//! Tool availability check.

use serde::Serialize;

use convertify_core::{AppError, AppResult, ErrorKind};
use convertify_image::ImageConverter;

use crate::output::{self, OutputFormat};

#[derive(Debug, Serialize)]
struct CheckReport<'a> {
    tool: &'a str,
    installed: bool,
}

/// Report whether the tool runs. Absence is returned as an error so the
/// process exits non-zero.
pub async fn execute(converter: &ImageConverter, format: OutputFormat) -> AppResult<()> {
    let tool = converter.config().tool_path.as_str();
    let installed = converter.check_tool_installed().await;

    match format {
        OutputFormat::Json => output::print_json(&CheckReport { tool, installed }),
        OutputFormat::Text if installed => {
            output::print_success(&format!("'{}' is available", tool));
        }
        OutputFormat::Text => {
            output::print_warning(&format!("'{}' was not found", tool));
            output::print_kv("hint", "run `convertify install`");
        }
    }

    if installed {
        Ok(())
    } else {
        Err(AppError::new(
            ErrorKind::NotInstalled,
            format!("'{}' is not installed", tool),
        ))
    }
}
