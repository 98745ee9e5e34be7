//! Server-initiated notifications.

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::dispatch::Notification;
use crate::transport::{FrameError, FrameWriter};

const EVENTS_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::events");

/// Errors raised while sending an event.
#[derive(Debug, Error)]
pub enum EventError {
    /// The event parameters could not be serialised.
    #[error("failed to serialise event '{method}': {source}")]
    Serialize {
        /// Event name.
        method: String,
        /// Underlying serialisation error.
        #[source]
        source: serde_json::Error,
    },

    /// Writing the event frame failed.
    #[error("failed to write event '{method}': {source}")]
    Write {
        /// Event name.
        method: String,
        /// Underlying transport error.
        #[source]
        source: FrameError,
    },
}

/// Writes unsolicited notifications through the shared frame writer.
///
/// Delivery is fire and forget: nothing acknowledges an event. Clones share
/// the writer, so background workers can hold their own emitter.
#[derive(Debug, Clone)]
pub struct EventEmitter {
    writer: FrameWriter,
}

impl EventEmitter {
    /// Creates an emitter that writes through `writer`.
    #[must_use]
    pub fn new(writer: FrameWriter) -> Self {
        Self { writer }
    }

    /// Sends `{"jsonrpc":"2.0","method":method,"params":params}`.
    ///
    /// # Errors
    ///
    /// Returns `EventError::Serialize` if `params` cannot be serialised and
    /// `EventError::Write` if the frame cannot be written.
    pub fn send_event<P: Serialize>(&self, method: &str, params: &P) -> Result<(), EventError> {
        let body = serde_json::to_string(&Notification::new(method, params)).map_err(|source| {
            EventError::Serialize {
                method: method.to_owned(),
                source,
            }
        })?;
        debug!(target: EVENTS_TARGET, method, "sending event");
        self.writer
            .write_frame(&body)
            .map_err(|source| EventError::Write {
                method: method.to_owned(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use pgtools_config::FrameTerminator;
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::*;
    use crate::transport::{FrameReader, SharedSink};

    #[rstest]
    fn sends_framed_notification() {
        let sink = SharedSink::new();
        let emitter = EventEmitter::new(FrameWriter::new(sink.clone(), FrameTerminator::Crlf));

        emitter
            .send_event("connection/complete", &json!({"ownerUri": "file:///q.sql"}))
            .expect("send");

        let mut reader = FrameReader::new(Cursor::new(sink.contents()), usize::MAX);
        let frame = reader.read_frame().expect("read").expect("frame");
        let event: Value = serde_json::from_slice(frame.body()).expect("json");
        assert_eq!(
            event,
            json!({
                "jsonrpc": "2.0",
                "method": "connection/complete",
                "params": {"ownerUri": "file:///q.sql"}
            })
        );
        assert!(event.get("id").is_none());
    }
}
