//! Tests for the validation pipeline.

use super::*;
use crate::schema::*;

#[test]
fn default_config_validates() {
    let config = BrotechConfig::default();
    assert!(validate(&config).is_ok());
}

#[test]
fn catches_blank_model() {
    let mut config = BrotechConfig::default();
    config.chat.model = "  ".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("chat.model must not be empty"));
}

#[test]
fn catches_blank_history_key() {
    let mut config = BrotechConfig::default();
    config.chat.history_key = String::new();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("chat.history_key"));
}

#[test]
fn catches_temperature_out_of_range() {
    let mut config = BrotechConfig::default();
    config.chat.temperature = 2.5;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("chat.temperature"));
}

#[test]
fn catches_nan_temperature() {
    let mut config = BrotechConfig::default();
    config.chat.temperature = f64::NAN;
    assert!(validate(&config).is_err());
}

#[test]
fn catches_zero_max_tokens() {
    let mut config = BrotechConfig::default();
    config.chat.max_tokens = 0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("chat.max_tokens = 0"));
}

#[test]
fn collects_multiple_errors() {
    let mut config = BrotechConfig::default();
    config.chat.model = String::new();
    config.chat.max_tokens = 0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("chat.model"));
    assert!(err.contains("chat.max_tokens"));
    assert!(err.contains("; "));
}
