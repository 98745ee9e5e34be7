//! Database connection management.
//!
//! `connection/connect` schedules an attempt on a tracked worker and answers
//! at once; the worker opens the connection through a [`ConnectionFactory`]
//! and reports the outcome as a `connection/complete` event. No concrete
//! driver ships with the service: the binary installs
//! [`UnconfiguredFactory`], which validates options and then reports that no
//! driver is available.

mod contracts;
mod driver;
mod errors;
mod service;

pub use self::contracts::{
    CONNECT_METHOD, CONNECTION_COMPLETE_EVENT, ConnectParams, ConnectionCompleteParams,
    ConnectionDetails, ConnectionSummary, DISCONNECT_METHOD, DisconnectParams, ServerInfo,
};
pub use self::driver::{
    ConnectionFactory, DictResult, Fetch, REQUIRED_OPTIONS, ServerConnection, ServerVersion,
    UnconfiguredFactory, require_options,
};
pub use self::errors::ConnectionError;
pub use self::service::ConnectionService;

/// Tracing target for connection operations.
pub(crate) const CONNECTION_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::connection");
