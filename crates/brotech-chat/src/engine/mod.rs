//! The chat session engine.
//!
//! A `ChatEngine` holds the transcript and widget flags, opens a backend
//! session lazily the first time the widget is opened, and streams each
//! reply into the transcript chunk by chunk. Every transcript change past
//! the greeting is written to the history store.
//!
//! All methods take `&self`. The state lock is never held across an
//! await, so the front end can read a snapshot while a reply streams.

mod guard;
mod send;
mod session;
mod state;


use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use brotech_ai::{ChatBackend, ChatSession, SessionConfig};
use brotech_config::ChatConfig;

use crate::history;
use crate::message::Message;
use crate::route::RouteObserver;
use crate::store::KeyValueStore;

pub use state::ConversationState;

/// Shown when the backend session cannot be created.
pub const UNAVAILABLE_MESSAGE: &str = "Sorry, the AI assistant is currently unavailable.";

/// Shown when a send or its stream fails.
pub const ERROR_MESSAGE: &str = "Sorry, I encountered an error. Please try again.";

/// Called with a snapshot after every state change.
pub type TranscriptListener = Box<dyn Fn(&ConversationState) + Send + Sync>;

/// Fixed engine configuration.
#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub session: SessionConfig,
    pub history_key: String,
    /// Longest wait for the reply to start or for the next chunk.
    pub response_timeout: Option<Duration>,
}

impl EngineSettings {
    pub fn from_config(config: &ChatConfig) -> Self {
        Self {
            session: SessionConfig::new(&config.model, &config.system_prompt),
            history_key: config.history_key.clone(),
            response_timeout: config.response_timeout(),
        }
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self::from_config(&ChatConfig::default())
    }
}

/// Conversation engine behind the chat widget.
pub struct ChatEngine {
    backend: Arc<dyn ChatBackend>,
    store: Arc<dyn KeyValueStore>,
    route: Arc<dyn RouteObserver>,
    settings: EngineSettings,
    state: Mutex<ConversationState>,
    /// Lazily created; `None` until the widget opens or after a clear.
    session: tokio::sync::Mutex<Option<Arc<dyn ChatSession>>>,
    /// Mirrors whether `session` holds a handle, readable without the lock.
    session_ready: AtomicBool,
    in_flight: AtomicBool,
    initialized: AtomicBool,
    listener: Option<TranscriptListener>,
}

impl ChatEngine {
    pub fn new(
        backend: Arc<dyn ChatBackend>,
        store: Arc<dyn KeyValueStore>,
        route: Arc<dyn RouteObserver>,
    ) -> Self {
        Self {
            backend,
            store,
            route,
            settings: EngineSettings::default(),
            state: Mutex::new(ConversationState::default()),
            session: tokio::sync::Mutex::new(None),
            session_ready: AtomicBool::new(false),
            in_flight: AtomicBool::new(false),
            initialized: AtomicBool::new(false),
            listener: None,
        }
    }

    pub fn with_settings(mut self, settings: EngineSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_listener(mut self, listener: TranscriptListener) -> Self {
        self.listener = Some(listener);
        self
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Copy of the full conversation state.
    pub fn snapshot(&self) -> ConversationState {
        self.lock().clone()
    }

    pub fn messages(&self) -> Vec<Message> {
        self.lock().messages.clone()
    }

    pub fn is_open(&self) -> bool {
        self.lock().is_open
    }

    pub fn is_thinking(&self) -> bool {
        self.lock().is_thinking
    }

    pub fn show_quick_replies(&self) -> bool {
        self.lock().show_quick_replies
    }

    pub fn draft_input(&self) -> String {
        self.lock().draft_input.clone()
    }

    /// Whether a backend session is currently held.
    pub fn has_session(&self) -> bool {
        self.session_ready.load(Ordering::Acquire)
    }

    /// Whether the input form would accept a submit.
    pub fn can_submit(&self) -> bool {
        let state = self.lock();
        !state.is_thinking && !state.draft_input.trim().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, ConversationState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Change flags without touching the transcript, then notify.
    fn update<R>(&self, f: impl FnOnce(&mut ConversationState) -> R) -> R {
        let (result, snapshot) = {
            let mut state = self.lock();
            let result = f(&mut state);
            (result, state.clone())
        };
        self.notify(&snapshot);
        result
    }

    /// Mutate the transcript, refresh derived flags, persist and notify.
    ///
    /// `f` may return `false` to skip the change, in which case nothing is
    /// persisted or notified.
    fn mutate_transcript(&self, f: impl FnOnce(&mut ConversationState) -> bool) -> bool {
        let snapshot = {
            let mut state = self.lock();
            if !f(&mut state) {
                return false;
            }
            state.refresh_quick_replies();
            state.clone()
        };

        if snapshot.messages.len() > 1 {
            history::persist(
                self.store.as_ref(),
                &self.settings.history_key,
                &snapshot.messages,
            );
        }
        self.notify(&snapshot);
        true
    }

    fn push_bot_message(&self, text: &str) {
        self.mutate_transcript(|state| {
            state.messages.push(Message::bot(text));
            true
        });
    }

    fn notify(&self, snapshot: &ConversationState) {
        if let Some(listener) = &self.listener {
            listener(snapshot);
        }
    }
}
