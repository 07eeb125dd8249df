//! Configuration loading functionality.
//!
//! Resolves the configuration path, parses the TOML file and validates it.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use super::Config;
use super::validation::validate_config;
use crate::constants::*;

/// Configuration path given on the command line, set once at startup
static CONFIG_PATH: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Set the configuration file for the current process.
/// This can only be called once, typically at startup.
pub fn set_config_path(path: Option<String>) -> Result<()> {
    CONFIG_PATH
        .set(path.map(PathBuf::from))
        .map_err(|_| anyhow::anyhow!("Configuration path already set"))
}

/// Path of the configuration file, whether or not it exists.
pub fn get_config_path() -> Result<PathBuf> {
    if let Some(Some(path)) = CONFIG_PATH.get() {
        return Ok(path.clone());
    }

    let config_dir = dirs::config_dir().context("Could not determine config directory")?;
    Ok(config_dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Load configuration using automatic path detection.
pub fn load() -> Result<Config> {
    load_or_default(&get_config_path()?, is_explicit())
}

/// Whether the configuration path came from `--config`.
pub fn is_explicit() -> bool {
    matches!(CONFIG_PATH.get(), Some(Some(_)))
}

/// Load `path`, falling back to defaults only for an implicit path.
///
/// A missing file at the default location means "use the built-in content".
/// A missing file that was asked for explicitly is an error.
pub fn load_or_default(path: &Path, explicit: bool) -> Result<Config> {
    if !path.exists() {
        if explicit {
            anyhow::bail!("Configuration file not found at {}", path.display());
        }
        return Ok(Config::default());
    }

    load_from_path(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))
}

/// Load and validate configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;

    parse(&content).with_context(|| format!("Invalid config in {}", path.display()))
}

/// Parse and validate configuration text.
pub fn parse(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).context("Failed to parse TOML")?;
    validate_config(&config)?;
    Ok(config)
}
