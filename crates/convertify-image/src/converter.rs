//! The conversion orchestrator: detect, install, stage, invoke, read back.

use std::ffi::OsString;
use std::path::Path;
use std::sync::Arc;

use convertify_core::config::ConverterConfig;
use tracing::{debug, error, info, instrument, warn};
use validator::Validate;

use crate::data_uri;
use crate::error::ConversionError;
use crate::executor::{SystemToolRunner, ToolInvocation, ToolRunner, truncate_output};
use crate::filesystem::{StagingArea, TempFile};
use crate::formats::is_encodable_extension;
use crate::installer::{InstallPlan, Platform};
use crate::models::ConversionRequest;

/// ImageMagick-backed image converter.
///
/// Cheap to clone; clones share the runner and the temp directory state.
/// Any number of conversions may run concurrently on one instance.
#[derive(Debug, Clone)]
pub struct ImageConverter {
    /// Converter settings.
    config: ConverterConfig,
    /// Temp directory for the Base64 pipeline.
    staging: StagingArea,
    /// Process executor.
    runner: Arc<dyn ToolRunner>,
    /// Platform used to pick an installation plan.
    platform: Platform,
}

impl ImageConverter {
    /// Create a converter that runs real processes.
    pub fn new(config: ConverterConfig) -> Result<Self, ConversionError> {
        Self::with_runner(config, Arc::new(SystemToolRunner::new()))
    }

    /// Create a converter with a custom process runner.
    pub fn with_runner(
        config: ConverterConfig,
        runner: Arc<dyn ToolRunner>,
    ) -> Result<Self, ConversionError> {
        config
            .validate()
            .map_err(|e| ConversionError::InvalidConfig {
                reason: e.to_string(),
            })?;

        Ok(Self {
            staging: StagingArea::new(config.effective_temp_root()),
            config,
            runner,
            platform: Platform::current(),
        })
    }

    /// Override the platform used by [`install_tool`](Self::install_tool).
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// The converter settings.
    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// The temp directory used for staged files.
    pub fn temp_dir(&self) -> &Path {
        self.staging.root()
    }

    /// Check whether the external tool can be run.
    ///
    /// Absence is an expected outcome, reported as `false` rather than an
    /// error. The answer is recomputed on every call.
    #[instrument(skip(self), fields(tool = %self.config.tool_path))]
    pub async fn check_tool_installed(&self) -> bool {
        let invocation = ToolInvocation::new(&self.config.tool_path)
            .arg(&self.config.version_arg)
            .timeout(self.config.tool_timeout());

        match self.runner.run(&invocation).await {
            Ok(output) if output.success => match output.stdout.lines().next().map(str::trim) {
                Some(version) if !version.is_empty() => {
                    info!("ImageMagick detected: {}", version);
                    true
                }
                _ => {
                    warn!("ImageMagick is not installed: version check printed nothing");
                    false
                }
            },
            Ok(output) => {
                warn!(
                    exit_code = ?output.exit_code,
                    "ImageMagick is not installed: version check failed"
                );
                false
            }
            Err(e) => {
                warn!(error = %e, "ImageMagick is not installed");
                false
            }
        }
    }

    /// Install the external tool with the platform package manager.
    ///
    /// Never called implicitly by the conversion operations.
    #[instrument(skip(self), fields(platform = %self.platform))]
    pub async fn install_tool(&self) -> Result<(), ConversionError> {
        let plan = InstallPlan::for_platform(&self.platform).inspect_err(|e| {
            warn!("{}", e);
        })?;

        info!("Installing ImageMagick...");

        for step in &plan.steps {
            let command = step.display();
            let output = self.runner.run(step).await.map_err(|e| {
                error!(step = %command, error = %e, "Failed to install ImageMagick");
                ConversionError::Installation {
                    step: command.clone(),
                    stderr: e.to_string(),
                }
            })?;

            if !output.success {
                let stderr = truncate_output(&output.stderr, self.config.stderr_limit);
                error!(
                    step = %command,
                    exit_code = ?output.exit_code,
                    "Failed to install ImageMagick: {}",
                    stderr
                );
                return Err(ConversionError::Installation {
                    step: command,
                    stderr,
                });
            }
        }

        info!("ImageMagick installed successfully");
        Ok(())
    }

    /// Convert a Base64 image data URI to `target_format`.
    ///
    /// Returns `data:image/<target_format>;base64,<payload>`. Both staged
    /// files are removed before this returns, whatever the outcome.
    #[instrument(skip(self, data_uri))]
    pub async fn convert_from_base64(
        &self,
        data_uri: &str,
        target_format: &str,
    ) -> Result<String, ConversionError> {
        self.require_tool().await?;

        let request = ConversionRequest::from_data_uri(data_uri, target_format)?;

        let input = self
            .staging
            .write_new(
                "input",
                request.source_format().extension(),
                request.source_bytes(),
            )
            .await?;

        let output = match self
            .staging
            .reserve("output", request.target_format().extension())
            .await
        {
            Ok(output) => output,
            Err(e) => {
                input.remove().await;
                return Err(e);
            }
        };

        let result = self.convert_staged(&request, &input, &output).await;

        input.remove().await;
        output.remove().await;

        result
    }

    /// Convert `input_path` into `output_path`, letting the tool infer both
    /// formats from the paths.
    ///
    /// No format validation happens here; the tool decides what is legal.
    #[instrument(
        skip_all,
        fields(input = %input_path.as_ref().display(), output = %output_path.as_ref().display())
    )]
    pub async fn convert_file(
        &self,
        input_path: impl AsRef<Path>,
        output_path: impl AsRef<Path>,
    ) -> Result<(), ConversionError> {
        self.require_tool().await?;
        self.run_convert(
            guard_leading_dash(input_path.as_ref()),
            guard_leading_dash(output_path.as_ref()),
        )
        .await
    }

    /// Read an image file and return it as a data URI.
    ///
    /// The format is the file extension exactly as written; the bytes are
    /// not inspected.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub async fn file_to_base64(&self, path: impl AsRef<Path>) -> Result<String, ConversionError> {
        let path = path.as_ref();

        let bytes = tokio::fs::read(path).await.map_err(|source| {
            error!(error = %source, "Error reading image file");
            ConversionError::Read {
                path: path.to_path_buf(),
                source,
            }
        })?;

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if !is_encodable_extension(extension) {
            return Err(ConversionError::unsupported_format(extension));
        }

        Ok(data_uri::encode(extension, &bytes))
    }

    async fn require_tool(&self) -> Result<(), ConversionError> {
        if self.check_tool_installed().await {
            Ok(())
        } else {
            Err(ConversionError::NotInstalled {
                tool: self.config.tool_path.clone(),
            })
        }
    }

    async fn convert_staged(
        &self,
        request: &ConversionRequest,
        input: &TempFile,
        output: &TempFile,
    ) -> Result<String, ConversionError> {
        self.run_convert(input.path().into(), output.path().into())
            .await?;

        let bytes = tokio::fs::read(output.path()).await.map_err(|e| {
            error!(
                path = %output.path().display(),
                error = %e,
                "Converted image could not be read"
            );
            ConversionError::Conversion {
                message: "Converted image could not be read".to_string(),
                stderr: e.to_string(),
            }
        })?;

        Ok(data_uri::encode(request.target_format().extension(), &bytes))
    }

    async fn run_convert(&self, input: OsString, output: OsString) -> Result<(), ConversionError> {
        let invocation = ToolInvocation::new(&self.config.tool_path)
            .arg(input)
            .arg(output)
            .timeout(self.config.tool_timeout());

        let result = self.runner.run(&invocation).await.map_err(|e| {
            error!(command = %invocation.display(), error = %e, "Conversion error");
            ConversionError::Conversion {
                message: "Error converting image".to_string(),
                stderr: e.to_string(),
            }
        })?;

        if !result.success {
            let stderr = truncate_output(&result.stderr, self.config.stderr_limit);
            error!(
                command = %invocation.display(),
                exit_code = ?result.exit_code,
                "Conversion error: {}",
                stderr
            );
            return Err(ConversionError::Conversion {
                message: match result.exit_code {
                    Some(code) => format!("Error converting image (exit code {code})"),
                    None => "Error converting image (terminated by signal)".to_string(),
                },
                stderr,
            });
        }

        debug!(
            command = %invocation.display(),
            duration_ms = result.duration_ms,
            "Conversion finished"
        );
        Ok(())
    }
}

/// Prefix relative paths that start with `-` so the tool cannot read them
/// as options.
fn guard_leading_dash(path: &Path) -> OsString {
    if path.as_os_str().to_string_lossy().starts_with('-') {
        Path::new(".").join(path).into_os_string()
    } else {
        path.as_os_str().to_os_string()
    }
}
