//! ChatBackend / ChatSession implementations for Gemini (streaming).

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::{pin_mut, StreamExt};
use tracing::{debug, warn};

use crate::streaming::{response_reader, sse_events};
use crate::{AiError, ChatBackend, ChatSession, ChunkStream, Message, SessionConfig};

use super::chat::{record_turn, GeminiChat};
use super::client::{build_request_body, parse_stream_chunk, stream_url, GeminiBackend};

#[async_trait]
impl ChatBackend for GeminiBackend {
    async fn create_session(
        &self,
        config: &SessionConfig,
    ) -> Result<Arc<dyn ChatSession>, AiError> {
        if self.config.api_key.trim().is_empty() {
            return Err(AiError::Unavailable("missing Gemini API key".into()));
        }
        if config.model.trim().is_empty() {
            return Err(AiError::Unavailable("no model configured".into()));
        }

        debug!(model = %config.model, "Gemini chat session created");
        Ok(Arc::new(GeminiChat::new(self.clone(), config.clone())))
    }
}

#[async_trait]
impl ChatSession for GeminiChat {
    async fn send_message_stream(&self, message: &str) -> Result<ChunkStream, AiError> {
        let user = Message::user(message);
        let mut contents = self.history();
        contents.push(user.clone());

        let config = &self.backend.config;
        let body = build_request_body(config, &self.session.system_prompt, &contents);
        let url = stream_url(&config.base_url, &self.session.model);

        debug!(model = %self.session.model, turns = contents.len(), "Gemini API streaming request");

        let response = self
            .backend
            .http
            .post(&url)
            .header("content-type", "application/json")
            .header("x-goog-api-key", &config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AiError::NetworkError(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(AiError::RateLimited);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AiError::ApiError(format!("HTTP {status}: {text}")));
        }

        let history = Arc::clone(&self.history);
        let events = sse_events(response_reader(response));

        let stream = async_stream::stream! {
            pin_mut!(events);
            let mut reply = String::new();

            while let Some(event) = events.next().await {
                let chunk = match event.and_then(|event| parse_stream_chunk(&event.data)) {
                    Ok(Some(chunk)) => chunk,
                    Ok(None) => {
                        warn!("skipping non-JSON SSE payload");
                        continue;
                    }
                    Err(e) => {
                        yield Err(e);
                        return;
                    }
                };
                if let Some(usage) = chunk.usage {
                    debug!(
                        input = usage.input_tokens,
                        output = usage.output_tokens,
                        "Gemini token usage"
                    );
                }
                if !chunk.text.is_empty() {
                    reply.push_str(&chunk.text);
                    yield Ok::<String, AiError>(chunk.text);
                }
            }

            record_turn(&history, user, reply);
        };

        Ok(Box::pin(stream))
    }
}
