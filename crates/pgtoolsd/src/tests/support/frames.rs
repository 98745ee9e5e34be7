//! Helpers for building and reading framed byte streams.

use std::io::Cursor;

use serde_json::Value;

use crate::transport::FrameReader;

/// Encodes `body` as one CRLF-terminated frame.
pub(crate) fn encode_frame(body: &str) -> Vec<u8> {
    let mut bytes = format!("Content-Length: {}\r\n\r\n", body.len()).into_bytes();
    bytes.extend_from_slice(body.as_bytes());
    bytes
}

/// Encodes each message as a CRLF-terminated frame.
pub(crate) fn encode_frames(messages: &[Value]) -> Vec<u8> {
    messages
        .iter()
        .flat_map(|message| encode_frame(&message.to_string()))
        .collect()
}

/// Decodes every frame in `bytes` as JSON.
pub(crate) fn decode_frames(bytes: &[u8]) -> Vec<Value> {
    let mut reader = FrameReader::new(Cursor::new(bytes.to_vec()), usize::MAX);
    let mut messages = Vec::new();
    while let Some(frame) = reader.read_frame().expect("well-formed output") {
        messages.push(serde_json::from_slice(frame.body()).expect("json body"));
    }
    messages
}
