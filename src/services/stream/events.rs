//! Server-sent-event framing.
//!
//! Turns a raw byte stream into one item per SSE event, carrying the
//! event's data payload. Framing follows the text/event-stream format:
//! events end at a blank line, `data:` lines contribute to the payload
//! (joined with newlines when repeated), and comment, `event:`, `id:`,
//! and `retry:` lines are ignored. CRLF line endings are tolerated.

use crate::error::CatchResult;
use crate::transport::ByteStream;
use futures::Stream;
use pin_project_lite::pin_project;
use std::pin::Pin;
use std::task::{Context, Poll};

pin_project! {
    /// Stream of SSE event payloads.
    ///
    /// Yields one `String` per event; an event without data lines yields
    /// an empty string (keep-alive comments produce these).
    pub struct EventStream {
        #[pin]
        inner: ByteStream,
        buffer: String,
        is_done: bool,
    }
}

impl EventStream {
    /// Wrap a raw byte stream
    pub fn new(inner: ByteStream) -> Self {
        Self {
            inner,
            buffer: String::new(),
            is_done: false,
        }
    }
}

impl Stream for EventStream {
    type Item = CatchResult<String>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        loop {
            if let Some(payload) = next_event(this.buffer) {
                return Poll::Ready(Some(Ok(payload)));
            }

            if *this.is_done {
                return Poll::Ready(flush_remainder(this.buffer).map(Ok));
            }

            match this.inner.as_mut().poll_next(cx) {
                Poll::Ready(Some(Ok(bytes))) => {
                    this.buffer.push_str(&String::from_utf8_lossy(&bytes));
                }
                Poll::Ready(Some(Err(e))) => {
                    *this.is_done = true;
                    this.buffer.clear();
                    return Poll::Ready(Some(Err(e)));
                }
                Poll::Ready(None) => {
                    *this.is_done = true;
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

/// Extract the next complete event from the buffer, if a blank-line
/// separator has arrived.
fn next_event(buffer: &mut String) -> Option<String> {
    let bytes = buffer.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'\n' {
            let mut j = i + 1;
            if j < bytes.len() && bytes[j] == b'\r' {
                j += 1;
            }
            if j < bytes.len() && bytes[j] == b'\n' {
                let block = buffer[..i].to_string();
                buffer.replace_range(..=j, "");
                return Some(parse_event(&block));
            }
        }
        i += 1;
    }

    None
}

/// Parse any trailing partial event once the stream has ended.
fn flush_remainder(buffer: &mut String) -> Option<String> {
    if buffer.trim().is_empty() {
        buffer.clear();
        return None;
    }

    let block = std::mem::take(buffer);
    let payload = parse_event(&block);
    if payload.is_empty() {
        None
    } else {
        Some(payload)
    }
}

/// Collect the data payload of a single event block.
fn parse_event(block: &str) -> String {
    let mut data_lines: Vec<&str> = Vec::new();

    for line in block.split('\n') {
        let line = line.strip_suffix('\r').unwrap_or(line);

        if let Some(rest) = line.strip_prefix("data:") {
            data_lines.push(rest.strip_prefix(' ').unwrap_or(rest));
        }
        // comments (":"), "event:", "id:", and "retry:" lines are ignored
    }

    data_lines.join("\n")
}
