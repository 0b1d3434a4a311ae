//! Incremental transcript printing for the terminal.

use std::io::Write;
use std::sync::{Mutex, PoisonError};

use brotech_chat::{ConversationState, Message, Sender};

/// How much of the transcript has reached the terminal.
#[derive(Debug, Default)]
struct Cursor {
    /// Messages started on screen.
    messages: usize,
    /// Bytes of the last started message already printed.
    last_len: usize,
    thinking_shown: bool,
    /// Epoch of the transcript on screen.
    epoch: u64,
}

/// Prints only what changed since the previous snapshot, so a streamed
/// reply appears to type itself out.
pub struct TranscriptPrinter<W: Write + Send> {
    inner: Mutex<(W, Cursor)>,
}

impl<W: Write + Send> TranscriptPrinter<W> {
    pub fn new(out: W) -> Self {
        Self {
            inner: Mutex::new((out, Cursor::default())),
        }
    }

    pub fn render(&self, state: &ConversationState) {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let (out, cursor) = &mut *guard;
        // Terminal write failures are not actionable here.
        let _ = render_into(out, cursor, state);
    }

    #[cfg(test)]
    fn into_output(self) -> W {
        self.inner.into_inner().unwrap_or_else(PoisonError::into_inner).0
    }
}

fn render_into(
    out: &mut impl Write,
    cursor: &mut Cursor,
    state: &ConversationState,
) -> std::io::Result<()> {
    if state.epoch != cursor.epoch {
        writeln!(out, "\n--- history cleared ---")?;
        *cursor = Cursor {
            epoch: state.epoch,
            ..Cursor::default()
        };
    }

    let last = cursor
        .messages
        .checked_sub(1)
        .and_then(|i| state.messages.get(i));
    if let Some(last) = last {
        if let Some(tail) = last.text.get(cursor.last_len..) {
            write!(out, "{tail}")?;
            cursor.last_len = last.text.len();
        }
    }

    for message in state.messages.get(cursor.messages..).unwrap_or_default() {
        if cursor.messages > 0 {
            writeln!(out)?;
        }
        write!(out, "{}{}", prefix(message), message.text)?;
        cursor.messages += 1;
        cursor.last_len = message.text.len();
    }

    if state.is_thinking && !cursor.thinking_shown {
        write!(out, "\n  (Tech Bro is typing...)")?;
    }
    cursor.thinking_shown = state.is_thinking;

    out.flush()
}

fn prefix(message: &Message) -> &'static str {
    match message.sender {
        Sender::Bot => "bot> ",
        Sender::User => "you> ",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brotech_chat::select_greeting;

    fn state(messages: Vec<Message>, is_thinking: bool) -> ConversationState {
        ConversationState {
            messages,
            is_thinking,
            ..Default::default()
        }
    }

    fn cleared(messages: Vec<Message>, epoch: u64) -> ConversationState {
        ConversationState {
            messages,
            epoch,
            ..Default::default()
        }
    }

    fn output(printer: TranscriptPrinter<Vec<u8>>) -> String {
        String::from_utf8(printer.into_output()).unwrap()
    }

    #[test]
    fn streams_only_new_text() {
        let printer = TranscriptPrinter::new(Vec::new());
        printer.render(&state(vec![Message::bot("Hello!")], false));
        printer.render(&state(vec![Message::bot("Hello!"), Message::user("hi")], true));
        printer.render(&state(
            vec![Message::bot("Hello!"), Message::user("hi"), Message::bot("Hi")],
            false,
        ));
        printer.render(&state(
            vec![Message::bot("Hello!"), Message::user("hi"), Message::bot("Hi there")],
            false,
        ));

        assert_eq!(
            output(printer),
            "bot> Hello!\nyou> hi\n  (Tech Bro is typing...)\nbot> Hi there"
        );
    }

    #[test]
    fn repeated_snapshot_prints_nothing() {
        let printer = TranscriptPrinter::new(Vec::new());
        let snapshot = state(vec![Message::bot("Hello!")], false);
        printer.render(&snapshot);
        printer.render(&snapshot);
        assert_eq!(output(printer), "bot> Hello!");
    }

    #[test]
    fn cleared_transcript_starts_over() {
        let printer = TranscriptPrinter::new(Vec::new());
        printer.render(&state(vec![Message::bot("a"), Message::user("b")], false));
        printer.render(&cleared(vec![Message::bot("fresh")], 1));
        assert_eq!(
            output(printer),
            "bot> a\nyou> b\n--- history cleared ---\nbot> fresh"
        );
    }

    #[test]
    fn clear_with_same_length_reprints_greeting() {
        let printer = TranscriptPrinter::new(Vec::new());
        printer.render(&cleared(vec![Message::bot(select_greeting("/pricing"))], 0));
        printer.render(&cleared(vec![Message::bot(select_greeting("/services"))], 1));
        assert_eq!(
            output(printer),
            format!(
                "bot> {}\n--- history cleared ---\nbot> {}",
                select_greeting("/pricing"),
                select_greeting("/services")
            )
        );
    }

    #[test]
    fn clear_with_identical_greeting_is_still_shown() {
        let printer = TranscriptPrinter::new(Vec::new());
        printer.render(&cleared(vec![Message::bot("Hello!")], 0));
        printer.render(&cleared(vec![Message::bot("Hello!")], 1));
        assert_eq!(
            output(printer),
            "bot> Hello!\n--- history cleared ---\nbot> Hello!"
        );
    }
}
