//! Configuration file support for gradle-buildinfo.
//!
//! Provides YAML-based configuration through `gradle-buildinfo.config.yml`
//! files, including data structures, file loading, and validation.

use anyhow::Context;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::shared::error::GradleBuildInfoError;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "gradle-buildinfo.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub gradle_executable: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
    pub include_test_dependencies: Option<bool>,
    pub publish_occurred: Option<bool>,
    pub gradle_args: Option<Vec<String>>,
    pub collection_timeout_secs: Option<u64>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.is_file() {
        return Ok(None);
    }

    tracing::debug!("Using config file {}", config_path.display());
    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

fn validate_config(config: &ConfigFile) -> Result<()> {
    if config.timeout_secs == Some(0) {
        return Err(GradleBuildInfoError::ConfigError {
            message: "timeout_secs must be greater than 0.\n\n\
                      💡 Hint: Omit the field to use the default of 600 seconds."
                .to_string(),
        }
        .into());
    }
    if let Some(args) = &config.gradle_args {
        if let Some(i) = args.iter().position(|arg| arg.trim().is_empty()) {
            return Err(GradleBuildInfoError::ConfigError {
                message: format!("gradle_args[{}] must not be empty.", i),
            }
            .into());
        }
    }
    Ok(())
}

fn warn_unknown_fields(config: &ConfigFile) {
    let mut keys: Vec<_> = config.unknown_fields.keys().collect();
    keys.sort();
    for key in keys {
        tracing::warn!("Unknown config field '{}' will be ignored", key);
    }
}
