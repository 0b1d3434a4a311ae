//! Reading and writing the persisted transcript.
//!
//! Storage faults never reach the caller: a bad read means "no history"
//! and a failed write is logged and dropped.

use tracing::warn;

use crate::message::Message;
use crate::store::KeyValueStore;

/// Load the transcript stored under `key`.
///
/// Returns `None` when nothing usable is stored. Entries that fail to
/// parse, or whose first message is not from the bot, are removed.
pub fn restore(store: &dyn KeyValueStore, key: &str) -> Option<Vec<Message>> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            warn!("failed to read chat history: {e}");
            return None;
        }
    };

    let messages: Vec<Message> = match serde_json::from_str(&raw) {
        Ok(messages) => messages,
        Err(e) => {
            warn!("failed to parse chat history, discarding it: {e}");
            discard(store, key);
            return None;
        }
    };

    match messages.first() {
        None => None,
        Some(first) if !first.is_bot() => {
            warn!("stored chat history does not start with a bot message, discarding it");
            discard(store, key);
            None
        }
        Some(_) => Some(messages),
    }
}

/// Write `messages` under `key`. Failures are logged only.
pub fn persist(store: &dyn KeyValueStore, key: &str, messages: &[Message]) {
    let json = match serde_json::to_string(messages) {
        Ok(json) => json,
        Err(e) => {
            warn!("failed to serialize chat history: {e}");
            return;
        }
    };
    if let Err(e) = store.set(key, &json) {
        warn!("failed to save chat history: {e}");
    }
}

/// Remove the entry under `key`. Failures are logged only.
pub fn discard(store: &dyn KeyValueStore, key: &str) {
    if let Err(e) = store.remove(key) {
        warn!("failed to remove chat history: {e}");
    }
}
