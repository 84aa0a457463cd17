//! Configuration loading and resolution
//!
//! Resolution priority follows the same order everywhere in VINDEC:
//! 1. Explicit path supplied by the caller (highest priority)
//! 2. `VINDEC_CONFIG` environment variable
//! 3. Platform config directory (`~/.config/vindec/config.toml` on Linux)
//! 4. Compiled defaults (fallback)

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Which provider wins an equal-length field disagreement in the reconciler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TieBreakProvider {
    #[default]
    A,
    B,
}

/// Logging section of the TOML config
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoggingConfig {
    /// Log filter directive (e.g. "info", "vindec_fusion=debug")
    pub level: Option<String>,
}

/// TOML configuration file contents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Per-provider fetch timeout in milliseconds
    #[serde(default = "default_provider_timeout_ms")]
    pub provider_timeout_ms: u64,

    /// Provider preferred when two equal-length field values disagree
    #[serde(default)]
    pub tie_break_provider: TieBreakProvider,
}

fn default_provider_timeout_ms() -> u64 {
    5_000
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            provider_timeout_ms: default_provider_timeout_ms(),
            tie_break_provider: TieBreakProvider::default(),
        }
    }
}

/// Load configuration, falling back to compiled defaults when no file exists.
pub fn load_config(explicit_path: Option<&Path>) -> Result<TomlConfig> {
    // Priority 1: explicit path (missing file is an error the caller asked for)
    if let Some(path) = explicit_path {
        return read_toml_config(path);
    }

    // Priority 2: environment variable
    if let Ok(path) = std::env::var("VINDEC_CONFIG") {
        return read_toml_config(Path::new(&path));
    }

    // Priority 3: platform config directory
    if let Some(path) = default_config_path() {
        if path.exists() {
            return read_toml_config(&path);
        }
    }

    // Priority 4: compiled defaults
    Ok(TomlConfig::default())
}

/// Read and parse a TOML config file.
pub fn read_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: TomlConfig = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse TOML failed ({}): {}", path.display(), e)))?;
    info!(path = %path.display(), "configuration loaded");
    Ok(config)
}

/// Write a config file, creating parent directories as needed.
pub fn write_toml_config(config: &TomlConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)
        .map_err(|e| Error::Config(format!("Serialize TOML failed: {}", e)))?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Default configuration file path for the platform
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("vindec").join("config.toml"))
}
