//! Multi-turn Gemini chat session.

use std::sync::{Arc, Mutex};

use crate::{Message, SessionConfig};

use super::client::GeminiBackend;

/// A Gemini conversation. Keeps the turns exchanged so far and resends
/// them with every request, since the API itself is stateless.
pub struct GeminiChat {
    pub(crate) backend: GeminiBackend,
    pub(crate) session: SessionConfig,
    pub(crate) history: Arc<Mutex<Vec<Message>>>,
}

impl GeminiChat {
    pub(crate) fn new(backend: GeminiBackend, session: SessionConfig) -> Self {
        Self {
            backend,
            session,
            history: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Turns completed so far in this session.
    pub fn history(&self) -> Vec<Message> {
        self.history
            .lock()
            .map(|h| h.clone())
            .unwrap_or_default()
    }
}

/// Record a finished exchange. Empty replies keep only the user turn.
pub(crate) fn record_turn(history: &Mutex<Vec<Message>>, user: Message, reply: String) {
    let Ok(mut history) = history.lock() else {
        return;
    };
    history.push(user);
    if !reply.is_empty() {
        history.push(Message::assistant(reply));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GeminiConfig, Role};

    fn chat() -> GeminiChat {
        let backend = GeminiBackend::new(GeminiConfig::new("test-key")).unwrap();
        GeminiChat::new(backend, SessionConfig::new("gemini-2.5-flash", "prompt"))
    }

    #[test]
    fn new_chat_has_empty_history() {
        let chat = chat();
        assert!(chat.history().is_empty());
    }

    #[test]
    fn record_turn_appends_user_and_reply() {
        let chat = chat();
        record_turn(&chat.history, Message::user("hi"), "Hi there".into());
        let history = chat.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].role, Role::User);
        assert_eq!(history[1].content, "Hi there");
    }

    #[test]
    fn record_turn_skips_empty_reply() {
        let chat = chat();
        record_turn(&chat.history, Message::user("hi"), String::new());
        assert_eq!(chat.history(), vec![Message::user("hi")]);
    }
}
