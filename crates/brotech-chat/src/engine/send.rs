//! Sending messages and streaming replies into the transcript.

use std::future::Future;
use std::sync::Arc;

use brotech_ai::{AiError, ChatSession};
use futures_util::StreamExt;
use tracing::{debug, warn};

use crate::greeting::QUICK_REPLIES;
use crate::message::Message;

use super::guard::InFlightGuard;
use super::{ChatEngine, ERROR_MESSAGE};

impl ChatEngine {
    /// Send `text` and stream the reply into the transcript.
    ///
    /// Does nothing for blank text or while another send is running.
    /// Backend failures end up as a bot message, never as an error.
    pub async fn send(&self, text: &str) {
        let text = text.trim();
        if text.is_empty() || self.is_thinking() {
            return;
        }
        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            debug!("send ignored, another reply is in flight");
            return;
        };

        self.update(|state| state.show_quick_replies = false);
        let Some(session) = self.acquire_session().await else {
            return;
        };

        let mut epoch = 0;
        self.mutate_transcript(|state| {
            epoch = state.epoch;
            state.messages.push(Message::user(text));
            state.draft_input.clear();
            state.is_thinking = true;
            true
        });

        match self.stream_reply(&session, text, epoch).await {
            Ok(0) => warn!("reply stream ended without any chunks"),
            Ok(chunks) => debug!(chunks, "reply complete"),
            Err(e) => {
                warn!("error sending chat message: {e}");
                self.mutate_transcript(|state| {
                    if state.epoch != epoch {
                        return false;
                    }
                    state.is_thinking = false;
                    state.messages.push(Message::bot(ERROR_MESSAGE));
                    true
                });
            }
        }

        self.update(|state| state.is_thinking = false);
    }

    /// Send the current draft, like submitting the input form.
    pub async fn submit_draft(&self) {
        let draft = self.draft_input();
        self.send(&draft).await;
    }

    /// Send the quick reply at `index`. Out-of-range indices are ignored.
    pub async fn select_quick_reply(&self, index: usize) {
        match QUICK_REPLIES.get(index) {
            Some(prompt) => self.send(prompt).await,
            None => debug!(index, "no such quick reply"),
        }
    }

    /// Canned prompts offered while the conversation has only the greeting.
    pub fn quick_replies(&self) -> &'static [&'static str] {
        &QUICK_REPLIES
    }

    /// Update the uncommitted input. Typing hides the quick replies.
    pub fn set_draft_input(&self, text: impl Into<String>) {
        let text = text.into();
        self.update(|state| {
            if !text.is_empty() {
                state.show_quick_replies = false;
            }
            state.draft_input = text;
        });
    }

    /// Stream one reply, returning how many chunks arrived.
    ///
    /// The first chunk clears the thinking flag and adds an empty bot
    /// message; each chunk then rewrites that message with the text so
    /// far. Chunks for a transcript that was cleared meanwhile are dropped.
    async fn stream_reply(
        &self,
        session: &Arc<dyn ChatSession>,
        text: &str,
        epoch: u64,
    ) -> Result<usize, AiError> {
        let mut stream = self.within_timeout(session.send_message_stream(text)).await??;
        let mut reply = String::new();
        let mut chunks = 0;

        while let Some(chunk) = self.within_timeout(stream.next()).await? {
            let chunk = chunk?;
            let first = chunks == 0;
            chunks += 1;
            reply.push_str(&chunk);

            let applied = self.mutate_transcript(|state| {
                if state.epoch != epoch {
                    return false;
                }
                if first {
                    state.is_thinking = false;
                    state.messages.push(Message::bot(String::new()));
                }
                if let Some(last) = state.messages.last_mut() {
                    last.text.clone_from(&reply);
                }
                true
            });
            if !applied {
                debug!("dropping reply chunk after history was cleared");
                if first {
                    self.update(|state| state.is_thinking = false);
                }
            }
        }

        Ok(chunks)
    }

    async fn within_timeout<T>(&self, fut: impl Future<Output = T>) -> Result<T, AiError> {
        match self.settings.response_timeout {
            Some(limit) => tokio::time::timeout(limit, fut)
                .await
                .map_err(|_| AiError::Timeout),
            None => Ok(fut.await),
        }
    }
}
