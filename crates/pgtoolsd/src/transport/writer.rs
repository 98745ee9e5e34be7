//! Frame encoding onto a shared output stream.

use std::fmt;
use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use pgtools_config::FrameTerminator;
use tracing::trace;

use super::{CONTENT_LENGTH, FrameError, TRANSPORT_TARGET};

type SharedOutput = Arc<Mutex<Box<dyn Write + Send>>>;

/// Writes framed messages to the service output.
///
/// Clones share one stream. Each write holds the stream lock for the whole
/// header and body and flushes before releasing it, so concurrent writers
/// never interleave within a frame and the peer never sees a partial frame.
#[derive(Clone)]
pub struct FrameWriter {
    output: SharedOutput,
    terminator: FrameTerminator,
}

impl FrameWriter {
    /// Wraps `output`, closing each header with `terminator`.
    pub fn new(output: impl Write + Send + 'static, terminator: FrameTerminator) -> Self {
        Self {
            output: Arc::new(Mutex::new(Box::new(output))),
            terminator,
        }
    }

    /// Terminator written after the `Content-Length` header.
    #[must_use]
    pub fn terminator(&self) -> FrameTerminator {
        self.terminator
    }

    /// Encodes `body` as one frame, then flushes.
    ///
    /// # Errors
    ///
    /// Returns `FrameError::Io` if writing or flushing fails.
    pub fn write_frame(&self, body: &str) -> Result<(), FrameError> {
        let mut frame = format!(
            "{CONTENT_LENGTH}: {}{}",
            body.len(),
            self.terminator.as_str()
        );
        frame.push_str(body);
        trace!(target: TRANSPORT_TARGET, length = body.len(), "writing frame");
        self.write_locked(frame.as_bytes())
    }

    /// Writes `bytes` without framing, then flushes.
    ///
    /// # Errors
    ///
    /// Returns `FrameError::Io` if writing or flushing fails.
    pub fn write_raw(&self, bytes: &[u8]) -> Result<(), FrameError> {
        self.write_locked(bytes)
    }

    fn write_locked(&self, bytes: &[u8]) -> Result<(), FrameError> {
        let mut output = self.lock();
        output.write_all(bytes)?;
        output.flush()?;
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, Box<dyn Write + Send>> {
        // A writer that panicked mid-frame has already corrupted the stream;
        // later writers still get the lock.
        self.output.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for FrameWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameWriter")
            .field("terminator", &self.terminator)
            .finish_non_exhaustive()
    }
}
