//! The single-threaded request loop.

use std::io::{BufRead, Write};

use pgtools_config::Config;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::connection::ConnectionFactory;
use crate::context::ServerContext;
use crate::dispatch::process_body;
use crate::lifecycle::ExitStatus;
use crate::transport::{FrameError, FrameReader, FrameWriter};

const SERVER_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::server");

/// Why [`Server::serve`] stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServeOutcome {
    /// `exit` was handled.
    Exit(ExitStatus),
    /// The input stream closed between frames without an `exit`.
    InputClosed,
}

impl ServeOutcome {
    /// Process exit code for this outcome.
    #[must_use]
    pub const fn exit_code(self) -> u8 {
        match self {
            Self::Exit(status) => status.code(),
            Self::InputClosed => 1,
        }
    }
}

/// Fatal loop failures.
#[derive(Debug, Error)]
pub enum ServeError {
    /// The input stream could not be decoded into frames.
    #[error("failed to read frame: {0}")]
    Read(#[source] FrameError),

    /// A response could not be written.
    #[error("failed to write response: {0}")]
    Write(#[source] FrameError),

    /// A response could not be encoded.
    #[error("failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ServeError {
    /// Process exit code reported for a loop failure.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        1
    }
}

/// Reads framed requests from `R` and answers them in order.
#[derive(Debug)]
pub struct Server<R> {
    reader: FrameReader<R>,
    context: ServerContext,
}

impl<R: BufRead> Server<R> {
    /// Builds a server reading from `input` and writing to `output`.
    pub fn new(
        input: R,
        output: impl Write + Send + 'static,
        config: &Config,
        factory: impl ConnectionFactory + 'static,
    ) -> Self {
        let writer = FrameWriter::new(output, config.frame_terminator());
        Self {
            reader: FrameReader::new(input, config.max_content_length()),
            context: ServerContext::new(writer, factory),
        }
    }

    /// State shared with the handlers.
    #[must_use]
    pub fn context(&self) -> &ServerContext {
        &self.context
    }

    /// Runs until `exit` is handled or the input closes.
    ///
    /// Each frame is handled to completion before the next is read. The
    /// response to `exit` is never written. Workers still running when the
    /// loop stops are joined before this returns, so their events reach the
    /// output, and any connection they opened is then closed.
    ///
    /// # Errors
    ///
    /// Returns [`ServeError`] when the input cannot be framed or a response
    /// cannot be written.
    pub fn serve(&mut self) -> Result<ServeOutcome, ServeError> {
        info!(target: SERVER_TARGET, "serving requests");
        loop {
            let Some(frame) = self.reader.read_frame().map_err(ServeError::Read)? else {
                warn!(target: SERVER_TARGET, "input closed before exit");
                return Ok(self.finish(ServeOutcome::InputClosed));
            };

            let response = process_body(&self.context, frame.body());

            if let Some(status) = self.context.lifecycle().exit_status() {
                info!(target: SERVER_TARGET, code = status.code(), "exiting");
                return Ok(self.finish(ServeOutcome::Exit(status)));
            }

            if let Some(response) = response {
                let body = serde_json::to_string(&response)?;
                self.context
                    .output()
                    .write_frame(&body)
                    .map_err(ServeError::Write)?;
            } else {
                debug!(target: SERVER_TARGET, "no response for frame");
            }
        }
    }

    fn finish(&self, outcome: ServeOutcome) -> ServeOutcome {
        match self.context.workers().wait() {
            Ok(0) => {}
            Ok(joined) => {
                info!(target: SERVER_TARGET, joined, "joined workers after the loop");
            }
            Err(error) => {
                warn!(target: SERVER_TARGET, %error, "workers failed after the loop");
            }
        }
        let closed = self.context.connections().close_all();
        if closed > 0 {
            info!(target: SERVER_TARGET, closed, "closed connections left open");
        }
        outcome
    }
}
