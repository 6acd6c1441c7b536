//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::CheckConfig;
use std::path::{Path, PathBuf};

/// The configuration file name looked up in project directories.
pub const CONFIG_FILE_NAME: &str = "flakecheck.toml";

/// Loads and validates `flakecheck.toml` from a directory.
///
/// Reads `<dir>/flakecheck.toml`, parses it, and validates its values.
pub fn load_config(dir: &Path) -> Result<CheckConfig, ConfigError> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    let content = std::fs::read_to_string(&config_path)?;
    load_config_from_str(&content)
}

/// Parses and validates a `flakecheck.toml` configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<CheckConfig, ConfigError> {
    let config: CheckConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Walks up from `start` looking for the nearest directory containing `flakecheck.toml`.
///
/// Returns `None` when no ancestor has one; the defaults then apply.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(CONFIG_FILE_NAME).is_file() {
            return Some(current);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Validates that configured values are usable.
fn validate_config(config: &CheckConfig) -> Result<(), ConfigError> {
    if config.check.text_encoding().is_none() {
        return Err(ConfigError::ValidationError(format!(
            "unknown encoding '{}'",
            config.check.encoding
        )));
    }
    if config.analyzer.python.trim().is_empty() {
        return Err(ConfigError::MissingField("analyzer.python".to_string()));
    }
    Ok(())
}
