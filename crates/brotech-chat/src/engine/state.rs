//! Conversation state and its derived flags.

use crate::message::Message;

/// Everything the widget renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationState {
    pub messages: Vec<Message>,
    pub is_open: bool,
    /// Set from send until the first chunk or an error.
    pub is_thinking: bool,
    pub show_quick_replies: bool,
    pub draft_input: String,
    /// Number of history clears so far. Replies started under an older
    /// value are dropped.
    pub epoch: u64,
}

impl ConversationState {
    /// Quick replies belong to a conversation that has only the greeting.
    pub(crate) fn refresh_quick_replies(&mut self) {
        self.show_quick_replies = matches!(self.messages.as_slice(), [only] if only.is_bot());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with(messages: Vec<Message>) -> ConversationState {
        let mut state = ConversationState {
            messages,
            ..Default::default()
        };
        state.refresh_quick_replies();
        state
    }

    #[test]
    fn quick_replies_only_for_lone_bot_message() {
        assert!(with(vec![Message::bot("hi")]).show_quick_replies);
        assert!(!with(vec![]).show_quick_replies);
        assert!(!with(vec![Message::user("hi")]).show_quick_replies);
        assert!(!with(vec![Message::bot("hi"), Message::user("yo")]).show_quick_replies);
    }
}
