//! Server-Sent Events (SSE) streaming parser.
//!
//! Gemini streams `streamGenerateContent?alt=sse` replies as SSE. This
//! module turns any buffered byte reader into a stream of parsed events,
//! and adapts a reqwest response into such a reader.

use futures_util::{Stream, StreamExt};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio_util::io::StreamReader;

use crate::AiError;

/// A single SSE event parsed from the stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseEvent {
    /// The event type, if the server sent one.
    pub event: Option<String>,
    /// The event data (JSON string for Gemini).
    pub data: String,
}

/// Wrap a reqwest response body in a buffered async reader.
pub fn response_reader(response: reqwest::Response) -> impl AsyncBufRead + Unpin + Send {
    let byte_stream = response
        .bytes_stream()
        .map(|result| result.map_err(std::io::Error::other));
    tokio::io::BufReader::new(StreamReader::new(byte_stream))
}

/// Parse SSE events from `reader`, yielding them in order.
///
/// Multiple `data:` lines of one event are joined with `\n`. A trailing
/// event without a terminating blank line is still delivered.
pub fn sse_events<R>(reader: R) -> impl Stream<Item = Result<SseEvent, AiError>> + Send
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    async_stream::stream! {
        let mut lines = reader.lines();
        let mut current_event: Option<String> = None;
        let mut current_data = String::new();

        loop {
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(e) => {
                    yield Err(AiError::NetworkError(e.to_string()));
                    return;
                }
            };
            let line = line.strip_suffix('\r').unwrap_or(&line);

            if line.is_empty() {
                if !current_data.is_empty() {
                    yield Ok(SseEvent {
                        event: current_event.take(),
                        data: std::mem::take(&mut current_data),
                    });
                }
                current_event = None;
                continue;
            }

            if let Some(event_type) = field(line, "event") {
                current_event = Some(event_type.to_string());
            } else if let Some(data) = field(line, "data") {
                if !current_data.is_empty() {
                    current_data.push('\n');
                }
                current_data.push_str(data);
            }
            // id:, retry: and comments are ignored
        }

        if !current_data.is_empty() {
            yield Ok(SseEvent {
                event: current_event,
                data: current_data,
            });
        }
    }
}

/// Value of `name:` on an SSE line, with the optional single space removed.
fn field<'a>(line: &'a str, name: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(name)?.strip_prefix(':')?;
    Some(rest.strip_prefix(' ').unwrap_or(rest))
}
