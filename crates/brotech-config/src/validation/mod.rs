//! Full configuration validation.
//!
//! Collects every violation into a single `ConfigError`.

mod helpers;

#[cfg(test)]
mod tests;

use crate::schema::BrotechConfig;
use brotech_common::ConfigError;

use helpers::{validate_not_blank, validate_range, validate_range_f64};

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &BrotechConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_not_blank(&mut errors, "chat.model", &config.chat.model);
    validate_not_blank(&mut errors, "chat.history_key", &config.chat.history_key);
    validate_not_blank(&mut errors, "chat.system_prompt", &config.chat.system_prompt);
    validate_range(&mut errors, "chat.max_tokens", config.chat.max_tokens, 1, 65_536);
    validate_range_f64(
        &mut errors,
        "chat.temperature",
        config.chat.temperature,
        0.0,
        2.0,
    );

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
