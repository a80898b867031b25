//! Config file loader and serialization.

use crate::config::DevopsConfig;
use crate::error::ConfigError;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the global settings path: ~/.config/yb-node-manager/application.toml
pub fn get_global_settings_path() -> Result<PathBuf, ConfigError> {
    let config_dir = dirs::config_dir().ok_or_else(|| {
        ConfigError::ValidationFailed("Cannot determine config directory".to_string())
    })?;

    Ok(config_dir.join("yb-node-manager").join("application.toml"))
}

/// Load config from TOML file.
pub fn load_config_from_file(path: &Path) -> Result<DevopsConfig, ConfigError> {
    validate_config_path(path)?;

    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ConfigError::FileNotFound(format!(
                "Configuration file not found at: {}",
                path.display()
            ))
        } else {
            ConfigError::IoError(e)
        }
    })?;

    let config: DevopsConfig = toml::from_str(&content)?;
    log::debug!("[Config] Loaded settings from {}", path.display());

    Ok(config)
}

/// Load the config at `path`, or the global settings file when `path` is `None`.
///
/// A missing global file yields the defaults; an explicitly requested file must exist.
pub fn load_config_or_default(path: Option<&Path>) -> Result<DevopsConfig, ConfigError> {
    match path {
        Some(p) => load_config_from_file(p),
        None => {
            let global = get_global_settings_path()?;
            if global.exists() {
                load_config_from_file(&global)
            } else {
                log::debug!(
                    "[Config] No settings at {}, using defaults",
                    global.display()
                );
                Ok(create_default_config())
            }
        }
    }
}

/// Save config to TOML file.
pub fn save_config_to_file(config: &DevopsConfig, path: &Path) -> Result<(), ConfigError> {
    validate_config_path(path)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;

    Ok(())
}

/// Create default config.
pub fn create_default_config() -> DevopsConfig {
    DevopsConfig::default()
}

/// Validate config path (.toml extension required).
pub fn validate_config_path(path: &Path) -> Result<(), ConfigError> {
    if path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationFailed(
            "Configuration path cannot be empty".to_string(),
        ));
    }

    match path.extension() {
        Some(ext) if ext == "toml" => {}
        Some(ext) => {
            return Err(ConfigError::ValidationFailed(format!(
                "Configuration file must have .toml extension, got .{}",
                ext.to_string_lossy()
            )))
        }
        None => {
            return Err(ConfigError::ValidationFailed(
                "Configuration file must have .toml extension".to_string(),
            ))
        }
    }

    if path.to_str().is_none() {
        return Err(ConfigError::ValidationFailed(
            "Configuration path contains invalid characters".to_string(),
        ));
    }

    Ok(())
}
