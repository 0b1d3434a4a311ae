//! Google Gemini API backend.
//!
//! Implements `ChatBackend` and `ChatSession` for Gemini models via the
//! Generative Language API.

mod api;
mod chat;
mod client;
mod config;

pub use chat::GeminiChat;
pub use client::GeminiBackend;
pub use config::GeminiConfig;
