use std::io;

use thiserror::Error;

/// Framing failures. Any of these leaves the stream offset untrustworthy, so
/// the server loop treats them as fatal.
#[derive(Debug, Error)]
pub enum FrameError {
    /// I/O error during read or write, including a stream that closed
    /// part-way through a frame.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The header block ended without a `Content-Length` header.
    #[error("missing Content-Length header")]
    MissingContentLength,

    /// A header line did not have the `Name: value` shape.
    #[error("invalid header line: {line:?}")]
    InvalidHeader {
        /// The offending line, without its line ending.
        line: String,
    },

    /// The `Content-Length` value was not a decimal byte count.
    #[error("invalid Content-Length value: {value:?}")]
    InvalidContentLength {
        /// The raw header value.
        value: String,
    },

    /// The declared body is larger than the configured ceiling.
    #[error("content length {length} exceeds the {max} byte limit")]
    ContentTooLarge {
        /// Declared body length.
        length: usize,
        /// Configured maximum.
        max: usize,
    },
}

impl FrameError {
    pub(crate) fn invalid_header(line: impl Into<String>) -> Self {
        Self::InvalidHeader { line: line.into() }
    }

    pub(crate) fn invalid_content_length(value: impl Into<String>) -> Self {
        Self::InvalidContentLength {
            value: value.into(),
        }
    }

    pub(crate) fn truncated(context: &'static str) -> Self {
        Self::Io(io::Error::new(io::ErrorKind::UnexpectedEof, context))
    }
}
