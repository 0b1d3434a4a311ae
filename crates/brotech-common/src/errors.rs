use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// Failures of the key-value store that backs chat history.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store read error for '{key}': {reason}")]
    ReadError { key: String, reason: String },

    #[error("store write error for '{key}': {reason}")]
    WriteError { key: String, reason: String },
}

#[derive(Debug, thiserror::Error)]
pub enum BrotechError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
