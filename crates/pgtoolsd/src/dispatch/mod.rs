//! JSON-RPC dispatch for framed request bodies.
//!
//! A frame body is decoded as a single request or a batch, each request is
//! validated, looked up in the [`DispatchTable`], and its handler invoked
//! with a [`Params`] bag. Results and failures are correlated with the
//! request `id` into [`Response`] values:
//!
//! ```json
//! {"jsonrpc":"2.0","id":1,"method":"version"}
//! {"jsonrpc":"2.0","id":1,"result":"0"}
//! ```
//!
//! Unknown methods, malformed requests, and handler failures all surface as
//! JSON-RPC error responses; none of them stops the server loop.

mod errors;
mod message;
mod params;
mod processor;
mod table;

pub use self::errors::{
    HandlerError, INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST, METHOD_NOT_FOUND, PARSE_ERROR,
    RpcError, SERVER_ERROR,
};
pub use self::message::{JSONRPC_VERSION, Notification, Outcome, Request, RequestId, Response};
pub use self::params::Params;
pub use self::processor::process_body;
pub use self::table::{DispatchTable, MethodHandler, SharedHandler};

/// Tracing target for dispatch operations.
pub(crate) const DISPATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch");
