//! Configuration file support for insomnium.
//!
//! Loads configuration from `insomnium.toml` in the working directory.

use anyhow::{Context, Result};
use insomnium_logging::LogFormat;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration loaded from `insomnium.toml`
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Insomnia data directory holding the `insomnia.*.db` files
    pub data_dir: Option<PathBuf>,
    /// Default tracing level (e.g. "warn", "debug")
    pub log_level: Option<String>,
    /// Default log output format
    pub log_format: Option<LogFormat>,
}

/// The config file name
pub const CONFIG_FILE_NAME: &str = "insomnium.toml";

impl ProjectConfig {
    /// Load configuration from the working directory.
    ///
    /// Returns:
    /// - `Ok(Some(config))` if file exists and parses successfully
    /// - `Ok(None)` if file does not exist
    /// - `Err(...)` if file exists but fails to parse (hard error)
    pub fn load(working_dir: &Path) -> Result<Option<Self>> {
        let config_path = working_dir.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let mut config: ProjectConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        // Relative data directories are relative to the config file.
        if let Some(dir) = config.data_dir.take() {
            config.data_dir = Some(if dir.is_absolute() {
                dir
            } else {
                working_dir.join(dir)
            });
        }

        Ok(Some(config))
    }

    /// Get the effective data directory.
    /// Priority: CLI flag > config file > Insomnia's default directory
    pub fn data_dir(&self, cli_dir: Option<&Path>) -> Result<PathBuf> {
        if let Some(dir) = cli_dir {
            return Ok(dir.to_path_buf());
        }
        if let Some(ref dir) = self.data_dir {
            return Ok(dir.clone());
        }
        insomnium_store::default_data_dir()
            .with_context(|| "Could not determine Insomnia data directory; pass --dir")
    }

    /// Get the effective log level.
    /// Priority: CLI flag > config file > "warn"
    pub fn log_level(&self, cli_level: Option<&str>) -> String {
        cli_level
            .or(self.log_level.as_deref())
            .unwrap_or("warn")
            .to_string()
    }

    /// Get the effective log format.
    /// Priority: CLI flag > config file > pretty
    pub fn log_format(&self, cli_format: Option<LogFormat>) -> LogFormat {
        cli_format.or(self.log_format).unwrap_or_default()
    }
}
