//! Line parser for the streaming side of the chat-completions endpoint.
//!
//! The wire format is newline-delimited server-sent events. Only `data:`
//! lines matter here: the payload is either a JSON chunk carrying a delta
//! fragment or the literal `[DONE]` sentinel. Bytes arrive in arbitrary
//! chunk boundaries, so partial lines are buffered across reads.

use bytes::Bytes;
use futures::{Stream, StreamExt, stream};

use crate::{Error, client::ReplyStream, messages::StreamChunk};

const DONE_SENTINEL: &str = "[DONE]";

/// Turn a response byte stream into an ordered stream of text fragments.
///
/// Lines without a `data:` prefix are ignored. `[DONE]` ends the stream and
/// any bytes after it are never read. A malformed chunk payload is skipped;
/// a transport or encoding failure surfaces one error and ends the stream.
pub(crate) fn fragments<S>(byte_stream: S) -> ReplyStream
where
    S: Stream<Item = Result<Bytes, reqwest::Error>> + Send + Unpin + 'static,
{
    let parsed = stream::unfold(
        (byte_stream, String::new(), false),
        |(mut byte_stream, mut buffer, done)| async move {
            if done {
                return None;
            }

            match byte_stream.next().await? {
                Ok(bytes) => {
                    if let Err(e) = std::str::from_utf8(&bytes).map(|text| buffer.push_str(text)) {
                        log::error!("Invalid UTF-8 in event stream: {e}");

                        let error = Error::Server(format!("invalid UTF-8 in stream: {e}"));
                        return Some((vec![Err(error)], (byte_stream, buffer, true)));
                    }

                    let (fragments, finished) = drain_lines(&mut buffer);
                    Some((fragments, (byte_stream, buffer, finished)))
                }
                Err(e) => {
                    log::error!("Stream read error: {e}");

                    let error = Error::Server(format!("stream error: {e}"));
                    Some((vec![Err(error)], (byte_stream, buffer, true)))
                }
            }
        },
    );

    Box::pin(parsed.flat_map(stream::iter))
}

/// Consume complete lines from the buffer, returning the fragments they
/// carry and whether the `[DONE]` sentinel was seen.
fn drain_lines(buffer: &mut String) -> (Vec<crate::Result<String>>, bool) {
    let mut fragments = Vec::new();

    while let Some(newline_pos) = buffer.find('\n') {
        let line: String = buffer.drain(..=newline_pos).collect();

        let Some(payload) = line.trim().strip_prefix("data:") else {
            continue;
        };

        let payload = payload.trim_start();

        if payload == DONE_SENTINEL {
            return (fragments, true);
        }

        match sonic_rs::from_str::<StreamChunk>(payload) {
            Ok(chunk) => {
                if let Some(content) = chunk.into_content()
                    && !content.is_empty()
                {
                    fragments.push(Ok(content));
                }
            }
            Err(e) => {
                log::warn!("Skipping malformed stream chunk: {e}");
            }
        }
    }

    (fragments, false)
}
