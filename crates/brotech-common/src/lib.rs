//! Shared types for the BroTech assistant crates.

pub mod errors;

pub use errors::{BrotechError, ConfigError, StoreError};

pub type Result<T> = std::result::Result<T, BrotechError>;
