//! Application configuration schemas.
//!
//! Configuration is deserialized from an optional TOML file via the
//! `config` crate and overridden by `CONVERTIFY__`-prefixed environment
//! variables. Each sub-module represents a logical configuration section.

pub mod converter;
pub mod logging;

use serde::{Deserialize, Serialize};

pub use self::converter::ConverterConfig;
pub use self::logging::LoggingConfig;

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Converter settings.
    pub converter: ConverterConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file and the environment.
    ///
    /// A missing file is not an error; every section falls back to its
    /// defaults. Environment variables use the `CONVERTIFY` prefix and `__`
    /// as the nesting separator, e.g. `CONVERTIFY__CONVERTER__TOOL_PATH`.
    pub fn load(path: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("CONVERTIFY")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}
