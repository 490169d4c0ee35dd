//! Configuration loader for Hashery.
//!
//! Reads `config.toml` from the config directory (`~/.hashery/` by default)
//! and deserializes it into [`ServiceConfig`]. The default location falls
//! back to defaults when the file is missing or malformed; an explicitly
//! named file must parse.

use std::path::{Path, PathBuf};

use hashery_types::config::ServiceConfig;
use hashery_types::error::ConfigError;

/// File name looked up inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Resolve the config directory from environment or platform defaults.
///
/// Priority:
/// 1. `HASHERY_HOME` environment variable
/// 2. `~/.hashery`
/// 3. `.hashery` in the current directory
pub fn resolve_config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("HASHERY_HOME") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".hashery");
    }

    PathBuf::from(".hashery")
}

/// Load configuration from `{config_dir}/config.toml`.
///
/// - Missing file: [`ServiceConfig::default()`].
/// - Unreadable or unparsable file: logs a warning and returns the default.
pub async fn load_config(config_dir: &Path) -> ServiceConfig {
    let config_path = config_dir.join(CONFIG_FILE_NAME);

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return ServiceConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return ServiceConfig::default();
        }
    };

    match parse_config(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("Failed to load {}: {err}, using defaults", config_path.display());
            ServiceConfig::default()
        }
    }
}

/// Load configuration from an explicitly named file. Every failure is an error.
pub async fn load_config_file(path: &Path) -> Result<ServiceConfig, ConfigError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
    parse_config(&content)
}

/// Parse and validate TOML configuration text.
pub fn parse_config(content: &str) -> Result<ServiceConfig, ConfigError> {
    let config: ServiceConfig =
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
    config.validate()?;
    Ok(config)
}
