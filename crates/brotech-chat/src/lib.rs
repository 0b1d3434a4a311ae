//! Chat session engine for the BroTech assistant widget.
//!
//! Owns the visible transcript, persists it to a session-scoped key-value
//! store, picks a greeting for the current page, and streams replies from
//! a [`brotech_ai::ChatBackend`] into the last bot message as they arrive.

pub mod engine;
pub mod greeting;
pub mod history;
pub mod message;
pub mod route;
pub mod store;

pub use engine::{ChatEngine, ConversationState, EngineSettings, TranscriptListener};
pub use greeting::{contextual_greeting, select_greeting, QUICK_REPLIES};
pub use message::{Message, Sender};
pub use route::{CurrentRoute, RouteObserver};
pub use store::{FileStore, KeyValueStore, MemoryStore};
