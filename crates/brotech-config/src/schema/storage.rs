//! History storage configuration types.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the chat transcript is persisted between runs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    File,
    Memory,
}

/// Storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Directory for the file backend. Empty uses the platform cache dir.
    pub dir: String,
}

impl StorageConfig {
    /// Resolve the directory used by the file backend.
    ///
    /// On macOS: `~/Library/Caches/brotech/session`
    /// On Linux: `~/.cache/brotech/session`
    pub fn resolve_dir(&self) -> Option<PathBuf> {
        if !self.dir.is_empty() {
            return Some(PathBuf::from(&self.dir));
        }
        dirs::cache_dir().map(|d| d.join("brotech").join("session"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_dir_wins() {
        let config = StorageConfig {
            backend: StorageBackend::File,
            dir: "/tmp/brotech-store".into(),
        };
        assert_eq!(config.resolve_dir(), Some(PathBuf::from("/tmp/brotech-store")));
    }

    #[test]
    fn default_dir_is_under_brotech() {
        if let Some(dir) = StorageConfig::default().resolve_dir() {
            assert!(dir.ends_with("brotech/session"));
        }
    }
}
