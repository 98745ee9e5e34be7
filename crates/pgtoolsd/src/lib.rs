//! A PostgreSQL tools service speaking JSON-RPC over stdio.
//!
//! Clients exchange LSP-style framed messages with the service: a
//! `Content-Length` header, a blank line, then a UTF-8 JSON-RPC 2.0 body. The
//! [`Server`] reads one frame at a time, routes the request through a
//! dispatch table, and writes the response before reading the next frame.
//!
//! Only `initialize` is callable until the handshake has run; it then binds
//! the rest of the method set (`shutdown`, `exit`, `echo`, `version`,
//! `capabilities/list`, `wait`, `connection/connect` and
//! `connection/disconnect`). The loop stops after `exit` and reports a clean
//! exit only when `shutdown` came first.
//!
//! Connection attempts run on tracked background workers and report their
//! outcome as `connection/complete` events through the same output stream.
//! The database driver sits behind the [`ConnectionFactory`] trait.

mod bootstrap;
pub mod capabilities;
pub mod connection;
mod context;
pub mod dispatch;
mod events;
mod health;
mod lifecycle;
pub mod methods;
mod server;
mod telemetry;
pub mod transport;
mod workers;

pub use bootstrap::{
    BootstrapError, ConfigLoader, Service, StaticConfigLoader, SystemConfigLoader, bootstrap_with,
};
pub use connection::{
    ConnectionError, ConnectionFactory, ConnectionService, ServerConnection, UnconfiguredFactory,
};
pub use context::ServerContext;
pub use events::{EventEmitter, EventError};
pub use health::{HealthReporter, StructuredHealthReporter};
pub use lifecycle::{ExitStatus, Lifecycle, LifecycleState};
pub use server::{ServeError, ServeOutcome, Server};
pub use telemetry::{TelemetryError, TelemetryHandle};
pub use workers::{WorkerError, WorkerRegistry};

#[cfg(test)]
mod tests;
