//! Shared state threaded through every handler.

use crate::connection::{ConnectionFactory, ConnectionService};
use crate::dispatch::DispatchTable;
use crate::events::EventEmitter;
use crate::lifecycle::Lifecycle;
use crate::methods;
use crate::transport::FrameWriter;
use crate::workers::WorkerRegistry;

/// State owned by one server instance.
///
/// A fresh context has only `initialize` bound; the rest of the method set
/// is registered when `initialize` runs.
#[derive(Debug)]
pub struct ServerContext {
    dispatch: DispatchTable,
    lifecycle: Lifecycle,
    workers: WorkerRegistry,
    output: FrameWriter,
    events: EventEmitter,
    connections: ConnectionService,
}

impl ServerContext {
    /// Builds a context writing to `output` and opening connections through
    /// `factory`.
    pub fn new(output: FrameWriter, factory: impl ConnectionFactory + 'static) -> Self {
        let dispatch = DispatchTable::new();
        methods::register_handshake(&dispatch);
        Self {
            dispatch,
            lifecycle: Lifecycle::new(),
            workers: WorkerRegistry::new(),
            events: EventEmitter::new(output.clone()),
            output,
            connections: ConnectionService::new(factory),
        }
    }

    #[must_use]
    pub fn dispatch(&self) -> &DispatchTable {
        &self.dispatch
    }

    #[must_use]
    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    #[must_use]
    pub fn workers(&self) -> &WorkerRegistry {
        &self.workers
    }

    /// Writer shared by responses, events, and `echo`.
    #[must_use]
    pub fn output(&self) -> &FrameWriter {
        &self.output
    }

    #[must_use]
    pub fn events(&self) -> &EventEmitter {
        &self.events
    }

    #[must_use]
    pub fn connections(&self) -> &ConnectionService {
        &self.connections
    }
}
