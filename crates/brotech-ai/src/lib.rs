//! Conversational backend for the BroTech assistant.
//!
//! Provides the backend/session traits the chat engine talks to and a
//! Gemini implementation with:
//! - Server-sent-event streaming
//! - Multi-turn chat sessions that keep their own history
//! - A fixed system instruction per session

pub mod gemini;
pub mod streaming;

use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::Stream;

pub use gemini::{GeminiBackend, GeminiConfig};

/// Incremental text chunks of a single reply, in arrival order.
pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<String, AiError>> + Send>>;

/// Creates chat sessions against a remote conversational model.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn create_session(
        &self,
        config: &SessionConfig,
    ) -> Result<Arc<dyn ChatSession>, AiError>;
}

/// An open multi-turn conversation with the backend.
#[async_trait]
pub trait ChatSession: Send + Sync {
    /// Send a user message and stream the reply.
    ///
    /// Errors before the first chunk are returned directly; errors after
    /// that arrive as an `Err` item on the stream.
    async fn send_message_stream(&self, message: &str) -> Result<ChunkStream, AiError>;
}

/// Fixed per-session configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub model: String,
    pub system_prompt: String,
}

impl SessionConfig {
    pub fn new(model: impl Into<String>, system_prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            system_prompt: system_prompt.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("API error: {0}")]
    ApiError(String),
    #[error("Rate limited")]
    RateLimited,
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Backend unavailable: {0}")]
    Unavailable(String),
    #[error("Timeout")]
    Timeout,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_constructors_set_role() {
        assert_eq!(Message::user("hi").role, Role::User);
        assert_eq!(Message::assistant("hello").role, Role::Assistant);
    }

    #[test]
    fn ai_error_display() {
        assert_eq!(AiError::RateLimited.to_string(), "Rate limited");
        assert_eq!(
            AiError::Unavailable("missing API key".into()).to_string(),
            "Backend unavailable: missing API key"
        );
    }
}
