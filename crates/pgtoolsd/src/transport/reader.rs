//! Frame decoding.

use std::collections::BTreeMap;
use std::fmt;
use std::io::{BufRead, Read};

use tracing::trace;

use super::{FrameError, TRANSPORT_TARGET};

/// Name of the header that carries the body length.
pub const CONTENT_LENGTH: &str = "Content-Length";

/// One decoded message: its headers and exactly `Content-Length` body bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    headers: BTreeMap<String, String>,
    body: Vec<u8>,
}

impl Frame {
    /// Header value by name, compared case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// All headers in the frame.
    #[must_use]
    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// Body bytes.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Consumes the frame, returning the body.
    #[must_use]
    pub fn into_body(self) -> Vec<u8> {
        self.body
    }
}

/// Reads frames from a buffered byte stream.
///
/// Each call to [`FrameReader::read_frame`] starts a fresh header scan.
pub struct FrameReader<R> {
    reader: R,
    max_content_length: usize,
}

impl<R: BufRead> FrameReader<R> {
    /// Wraps `reader`, rejecting bodies larger than `max_content_length`.
    pub fn new(reader: R, max_content_length: usize) -> Self {
        Self {
            reader,
            max_content_length,
        }
    }

    /// Reads the next frame (blocks until complete).
    ///
    /// Returns `Ok(None)` when the stream is closed before the first byte of
    /// a new frame.
    ///
    /// # Errors
    ///
    /// Returns `FrameError::MissingContentLength`,
    /// `FrameError::InvalidContentLength` or `FrameError::InvalidHeader` for
    /// malformed headers, `FrameError::ContentTooLarge` when the declared
    /// length exceeds the limit, and `FrameError::Io` when reading fails or
    /// the stream ends mid-frame.
    pub fn read_frame(&mut self) -> Result<Option<Frame>, FrameError> {
        let Some(headers) = self.read_headers()? else {
            return Ok(None);
        };
        let length = content_length(&headers)?;
        if length > self.max_content_length {
            return Err(FrameError::ContentTooLarge {
                length,
                max: self.max_content_length,
            });
        }

        let mut body = vec![0_u8; length];
        self.reader.read_exact(&mut body)?;
        trace!(target: TRANSPORT_TARGET, length, "read frame");
        Ok(Some(Frame { headers, body }))
    }

    fn read_headers(&mut self) -> Result<Option<BTreeMap<String, String>>, FrameError> {
        let mut headers = BTreeMap::new();
        let mut first_line = true;

        loop {
            let mut line = String::new();
            let bytes_read = self.reader.read_line(&mut line)?;
            if bytes_read == 0 {
                if first_line {
                    return Ok(None);
                }
                return Err(FrameError::truncated("stream closed while reading headers"));
            }
            first_line = false;

            let trimmed = line.trim();
            if trimmed.is_empty() {
                return Ok(Some(headers));
            }

            let (name, value) = trimmed
                .split_once(": ")
                .ok_or_else(|| FrameError::invalid_header(trimmed))?;
            headers.insert(name.to_owned(), value.to_owned());
        }
    }
}

impl<R> fmt::Debug for FrameReader<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameReader")
            .field("max_content_length", &self.max_content_length)
            .finish_non_exhaustive()
    }
}

fn content_length(headers: &BTreeMap<String, String>) -> Result<usize, FrameError> {
    let value = headers
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(CONTENT_LENGTH))
        .map(|(_, value)| value)
        .ok_or(FrameError::MissingContentLength)?;
    value
        .trim()
        .parse()
        .map_err(|_| FrameError::invalid_content_length(value.as_str()))
}
