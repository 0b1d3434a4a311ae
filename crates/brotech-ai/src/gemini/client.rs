//! Gemini backend struct, request building, and chunk parsing.

use std::time::Duration;

use crate::{AiError, Message, Role, TokenUsage};

use super::config::GeminiConfig;

/// Gemini API backend. Cheap to clone; sessions share its HTTP pool.
#[derive(Clone)]
pub struct GeminiBackend {
    pub(crate) config: GeminiConfig,
    pub(crate) http: reqwest::Client,
}

/// Text and usage carried by one streamed Gemini response object.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct StreamChunk {
    pub text: String,
    pub usage: Option<TokenUsage>,
}

impl GeminiBackend {
    pub fn new(config: GeminiConfig) -> Result<Self, AiError> {
        // Streamed replies are bounded by the engine's idle timeout instead.
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| AiError::NetworkError(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }
}

/// SSE streaming endpoint for `model`.
pub(crate) fn stream_url(base_url: &str, model: &str) -> String {
    format!(
        "{}/{}:streamGenerateContent?alt=sse",
        base_url.trim_end_matches('/'),
        model
    )
}

/// Build the JSON request body for the Gemini API.
pub(crate) fn build_request_body(
    config: &GeminiConfig,
    system_prompt: &str,
    messages: &[Message],
) -> serde_json::Value {
    let contents: Vec<_> = messages
        .iter()
        .map(|msg| {
            let role = match msg.role {
                Role::User => "user",
                Role::Assistant => "model",
            };
            serde_json::json!({
                "role": role,
                "parts": [{ "text": msg.content }]
            })
        })
        .collect();

    let mut body = serde_json::json!({
        "contents": contents,
        "generationConfig": {
            "maxOutputTokens": config.max_tokens,
            "temperature": config.temperature,
        }
    });

    if !system_prompt.is_empty() {
        body["systemInstruction"] = serde_json::json!({
            "parts": [{ "text": system_prompt }]
        });
    }

    body
}

/// Parse one SSE `data:` payload from `streamGenerateContent`.
///
/// Returns `Ok(None)` for payloads that are not JSON; an `error` object
/// from the API becomes `AiError::ApiError`.
pub(crate) fn parse_stream_chunk(data: &str) -> Result<Option<StreamChunk>, AiError> {
    let Ok(json) = serde_json::from_str::<serde_json::Value>(data) else {
        return Ok(None);
    };

    if let Some(error) = json.get("error") {
        let message = error["message"]
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string());
        return Err(AiError::ApiError(message));
    }

    let mut chunk = StreamChunk::default();

    if let Some(candidates) = json["candidates"].as_array() {
        for candidate in candidates {
            if let Some(parts) = candidate["content"]["parts"].as_array() {
                for part in parts {
                    if let Some(t) = part["text"].as_str() {
                        chunk.text.push_str(t);
                    }
                }
            }
        }
    }

    if let Some(meta) = json.get("usageMetadata") {
        chunk.usage = Some(TokenUsage {
            input_tokens: meta["promptTokenCount"].as_u64().unwrap_or(0),
            output_tokens: meta["candidatesTokenCount"].as_u64().unwrap_or(0),
        });
    }

    Ok(Some(chunk))
}
