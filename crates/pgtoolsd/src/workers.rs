//! Tracking for background workers started by handlers.
//!
//! Handlers that start long-running work (for example a connection attempt)
//! register the thread here so the `wait` method can block until all of it
//! has finished. Registration and draining share one mutex: `wait` takes the
//! current set under the lock and joins it outside the lock, repeating until
//! no handles remain, so a worker registered during a `wait` is joined by the
//! same call rather than racing with it.

use std::io;
use std::mem;
use std::sync::{Mutex, PoisonError};
use std::thread::{self, JoinHandle};

use thiserror::Error;
use tracing::{debug, warn};

const WORKERS_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::workers");

/// Errors raised while starting or joining workers.
#[derive(Debug, Error)]
pub enum WorkerError {
    /// The operating system refused to start the thread.
    #[error("failed to spawn worker '{name}': {source}")]
    Spawn {
        /// Name given to the worker.
        name: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// One or more workers panicked before finishing.
    #[error("{count} worker(s) panicked")]
    Panicked {
        /// Number of workers that panicked.
        count: usize,
    },
}

/// Set of tracked worker threads.
#[derive(Debug, Default)]
pub struct WorkerRegistry {
    handles: Mutex<Vec<JoinHandle<()>>>,
}

impl WorkerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an already running thread to the tracked set.
    pub fn register(&self, handle: JoinHandle<()>) {
        self.handles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(handle);
    }

    /// Starts `job` on a named thread and tracks it.
    ///
    /// # Errors
    ///
    /// Returns `WorkerError::Spawn` if the thread could not be created.
    pub fn spawn<F>(&self, name: impl Into<String>, job: F) -> Result<(), WorkerError>
    where
        F: FnOnce() + Send + 'static,
    {
        let name = name.into();
        let handle = thread::Builder::new()
            .name(name.clone())
            .spawn(job)
            .map_err(|source| WorkerError::Spawn {
                name: name.clone(),
                source,
            })?;
        debug!(target: WORKERS_TARGET, worker = %name, "worker started");
        self.register(handle);
        Ok(())
    }

    /// Number of workers not yet joined.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.handles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Blocks until every tracked worker has finished.
    ///
    /// Returns the number of workers joined.
    ///
    /// # Errors
    ///
    /// Returns `WorkerError::Panicked` after joining everything if any worker
    /// panicked.
    pub fn wait(&self) -> Result<usize, WorkerError> {
        let mut joined = 0;
        let mut panicked = 0;
        loop {
            let batch = mem::take(
                &mut *self
                    .handles
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner),
            );
            if batch.is_empty() {
                break;
            }
            for handle in batch {
                joined += 1;
                if handle.join().is_err() {
                    panicked += 1;
                }
            }
        }

        debug!(target: WORKERS_TARGET, joined, panicked, "workers drained");
        if panicked > 0 {
            warn!(target: WORKERS_TARGET, panicked, "workers panicked");
            return Err(WorkerError::Panicked { count: panicked });
        }
        Ok(joined)
    }
}
