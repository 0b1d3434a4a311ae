//! Configuration schema types for the BroTech assistant.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod chat;
mod storage;
mod system;

pub use chat::*;
pub use storage::*;
pub use system::*;

use serde::{Deserialize, Serialize};

/// Root configuration.
///
/// Only override what you want to change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct BrotechConfig {
    pub chat: ChatConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_correct_chat_section() {
        let config = BrotechConfig::default();
        assert_eq!(config.chat.model, DEFAULT_MODEL);
        assert_eq!(config.chat.max_tokens, 4096);
        assert_eq!(config.chat.temperature, 0.7);
        assert_eq!(config.chat.response_timeout_secs, 60);
    }

    #[test]
    fn default_config_uses_file_storage() {
        let config = BrotechConfig::default();
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert!(config.storage.dir.is_empty());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: BrotechConfig = toml::from_str(
            r#"
[chat]
model = "gemini-2.0-flash"

[storage]
backend = "memory"
"#,
        )
        .unwrap();
        assert_eq!(config.chat.model, "gemini-2.0-flash");
        assert_eq!(config.chat.history_key, DEFAULT_HISTORY_KEY);
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn empty_toml_is_default() {
        let config: BrotechConfig = toml::from_str("").unwrap();
        assert_eq!(config.chat.model, DEFAULT_MODEL);
    }
}
