//! BroTech assistant configuration.
//!
//! TOML-based configuration with validation. All config sections use
//! sensible defaults so partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use brotech_config::load_config;
//!
//! let config = load_config().expect("failed to load config");
//! println!("model: {}", config.chat.model);
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{
    BrotechConfig, ChatConfig, LogLevel, LoggingConfig, StorageBackend, StorageConfig,
    DEFAULT_HISTORY_KEY, DEFAULT_MODEL, DEFAULT_SYSTEM_PROMPT,
};

use brotech_common::ConfigError;
use std::path::Path;

/// Load config from the platform default path and validate it.
///
/// Creates a default `config.toml` in the OS config directory if none exists.
pub fn load_config() -> Result<BrotechConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}

/// Load config from an explicit path and validate it.
pub fn load_config_from(path: &Path) -> Result<BrotechConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }
    let config = toml_loader::load_from_path(path)?;
    validation::validate(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_config_from_missing_path_is_file_not_found() {
        let err = load_config_from(Path::new("/tmp/brotech_missing_config.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn load_config_from_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[chat]\ntemperature = 9.0\n").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
        assert!(err.to_string().contains("chat.temperature"));
    }
}
