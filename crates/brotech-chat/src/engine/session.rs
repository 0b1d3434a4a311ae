//! Mount, visibility, lazy session creation and history reset.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use brotech_ai::ChatSession;
use tracing::{debug, info, warn};

use crate::greeting::contextual_greeting;
use crate::history;

use super::{ChatEngine, UNAVAILABLE_MESSAGE};

impl ChatEngine {
    /// Restore the stored transcript, or greet for the current route.
    ///
    /// Runs once per engine; later calls do nothing. Only reads the store
    /// (a corrupt entry is removed).
    pub fn initialize(&self) {
        if self.initialized.swap(true, Ordering::AcqRel) {
            debug!("chat engine already initialized");
            return;
        }

        let restored = history::restore(self.store.as_ref(), &self.settings.history_key);
        let messages = match restored {
            Some(messages) => {
                info!(count = messages.len(), "restored chat history");
                messages
            }
            None => vec![contextual_greeting(&self.route.current_path())],
        };

        // Not a user-driven change: notify without writing back.
        self.update(|state| {
            state.messages = messages;
            state.refresh_quick_replies();
        });
    }

    /// Show the widget and make sure a backend session exists.
    pub async fn open(&self) {
        let was_open = self.update(|state| std::mem::replace(&mut state.is_open, true));
        if !was_open {
            self.ensure_session().await;
        }
    }

    /// Hide the widget. Session, history and any running reply are kept.
    pub fn close(&self) {
        self.update(|state| state.is_open = false);
    }

    /// Flip visibility, like the launcher button.
    pub async fn toggle(&self) {
        if self.is_open() {
            self.close();
        } else {
            self.open().await;
        }
    }

    /// Create the backend session if there is none yet.
    ///
    /// On failure an "unavailable" bot message is added and the slot stays
    /// empty so the next open or send retries. Returns whether a session
    /// is available.
    pub async fn ensure_session(&self) -> bool {
        self.acquire_session().await.is_some()
    }

    pub(super) async fn acquire_session(&self) -> Option<Arc<dyn ChatSession>> {
        let mut slot = self.session.lock().await;
        if let Some(session) = slot.as_ref() {
            return Some(Arc::clone(session));
        }

        match self.backend.create_session(&self.settings.session).await {
            Ok(session) => {
                info!(model = %self.settings.session.model, "chat session created");
                *slot = Some(Arc::clone(&session));
                self.session_ready.store(true, Ordering::Release);
                Some(session)
            }
            Err(e) => {
                drop(slot);
                warn!("failed to create chat session: {e}");
                self.push_bot_message(UNAVAILABLE_MESSAGE);
                None
            }
        }
    }

    /// Forget the conversation: erase stored history, drop the session and
    /// start over with a greeting for the current route.
    pub async fn clear_history(&self) {
        history::discard(self.store.as_ref(), &self.settings.history_key);
        {
            let mut slot = self.session.lock().await;
            slot.take();
            self.session_ready.store(false, Ordering::Release);
        }

        let greeting = contextual_greeting(&self.route.current_path());
        self.mutate_transcript(|state| {
            state.epoch += 1;
            state.messages = vec![greeting];
            true
        });
        info!("chat history cleared");

        if self.is_open() {
            self.ensure_session().await;
        }
    }

    /// Whether `initialize` has run.
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }
}
