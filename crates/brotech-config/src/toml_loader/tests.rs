//! Tests for TOML config loading, creation, and path resolution.

use super::*;
use std::path::Path;

#[test]
fn load_from_nonexistent_returns_parse_error() {
    let result = load_from_path(Path::new("/tmp/nonexistent_brotech_config.toml"));
    assert!(result.is_err());
    let err = result.unwrap_err();
    assert!(matches!(err, brotech_common::ConfigError::ParseError(_)));
}

#[test]
fn load_valid_partial_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[chat]
model = "gemini-2.0-flash"
response_timeout_secs = 0

[logging]
level = "debug"
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.chat.model, "gemini-2.0-flash");
    assert!(config.chat.response_timeout().is_none());
    assert_eq!(config.logging.level, crate::schema::LogLevel::Debug);
    // Defaults preserved
    assert_eq!(config.chat.history_key, "chatHistory");
    assert_eq!(config.chat.max_tokens, 4096);
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "this is not valid toml {{{").unwrap();

    let result = load_from_path(&path);
    assert!(result.is_err());
    let err = result.unwrap_err();
    assert!(matches!(err, brotech_common::ConfigError::ParseError(_)));
}

#[test]
fn load_config_with_invalid_values_is_returned_as_parsed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[chat]\nmax_tokens = 0\n").unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.chat.max_tokens, 0);
}

#[test]
fn create_and_load_default_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("brotech").join("config.toml");

    create_default_config(&path).unwrap();
    assert!(path.exists());

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.chat.model, "gemini-2.5-flash");
}

#[test]
fn default_config_toml_is_valid() {
    use super::template::default_config_toml;
    use crate::schema::BrotechConfig;

    let content = default_config_toml();
    let config: BrotechConfig = toml::from_str(&content).unwrap();
    assert_eq!(config.chat.history_key, "chatHistory");
}

#[test]
fn default_config_path_is_reasonable() {
    if let Ok(path) = default_config_path() {
        let path_str = path.to_string_lossy();
        assert!(path_str.contains("brotech"));
        assert!(path_str.ends_with("config.toml"));
    }
}
