//! Error types for JSON-RPC dispatch.
//!
//! [`RpcError`] is the wire-level error object placed in a response.
//! [`HandlerError`] is what method handlers return; it converts into an
//! [`RpcError`] so a failing handler never takes the server loop down.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::connection::ConnectionError;
use crate::events::EventError;
use crate::transport::FrameError;
use crate::workers::WorkerError;

/// Invalid JSON was received.
pub const PARSE_ERROR: i64 = -32700;
/// The JSON sent is not a valid request object.
pub const INVALID_REQUEST: i64 = -32600;
/// The method does not exist or is not available yet.
pub const METHOD_NOT_FOUND: i64 = -32601;
/// Invalid method parameters.
pub const INVALID_PARAMS: i64 = -32602;
/// Internal JSON-RPC error.
pub const INTERNAL_ERROR: i64 = -32603;
/// Handler raised an application error.
pub const SERVER_ERROR: i64 = -32000;

/// A JSON-RPC 2.0 error object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
#[error("{message} (code: {code})")]
pub struct RpcError {
    /// Error code.
    pub code: i64,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl RpcError {
    /// Creates an error with the given code and message.
    #[must_use]
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    /// Attaches additional data to the error.
    #[must_use]
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// The request body was not valid JSON.
    #[must_use]
    pub fn parse_error(detail: impl Into<String>) -> Self {
        Self::new(PARSE_ERROR, "Parse error").with_data(Value::String(detail.into()))
    }

    /// The body was JSON but not a valid request.
    #[must_use]
    pub fn invalid_request(detail: impl Into<String>) -> Self {
        Self::new(INVALID_REQUEST, "Invalid Request").with_data(Value::String(detail.into()))
    }

    /// No handler is bound to `method`.
    #[must_use]
    pub fn method_not_found(method: &str) -> Self {
        Self::new(METHOD_NOT_FOUND, "Method not found").with_data(Value::String(method.to_owned()))
    }

    /// Parameters did not match the method's declared fields.
    #[must_use]
    pub fn invalid_params(detail: impl Into<String>) -> Self {
        Self::new(INVALID_PARAMS, "Invalid params").with_data(Value::String(detail.into()))
    }

    /// The server failed while handling the request.
    #[must_use]
    pub fn internal(detail: impl Into<String>) -> Self {
        Self::new(INTERNAL_ERROR, "Internal error").with_data(Value::String(detail.into()))
    }
}

/// Failures raised by method handlers.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// Parameters were missing, surplus, or of the wrong type.
    #[error("invalid params: {message}")]
    InvalidParams {
        /// Description of the mismatch.
        message: String,
    },

    /// The handler ran but could not complete the operation.
    #[error("{message}")]
    Failed {
        /// Description of the failure.
        message: String,
        /// Optional structured detail.
        data: Option<Value>,
    },

    /// A tracked background worker failed.
    #[error(transparent)]
    Worker(#[from] WorkerError),

    /// Writing to the output stream failed.
    #[error("failed to write output: {0}")]
    Output(#[from] FrameError),

    /// Sending an event failed.
    #[error(transparent)]
    Event(#[from] EventError),

    /// The connection service rejected the request.
    #[error(transparent)]
    Connection(#[from] ConnectionError),

    /// A result could not be serialised.
    #[error("failed to serialise result: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl HandlerError {
    /// Creates an invalid params error.
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::InvalidParams {
            message: message.into(),
        }
    }

    /// Creates an application failure without extra data.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
            data: None,
        }
    }
}

impl From<HandlerError> for RpcError {
    fn from(error: HandlerError) -> Self {
        match error {
            HandlerError::InvalidParams { message } => Self::invalid_params(message),
            HandlerError::Failed { message, data } => {
                let base = Self::new(SERVER_ERROR, message);
                match data {
                    Some(data) => base.with_data(data),
                    None => base,
                }
            }
            HandlerError::Connection(error) => Self::new(SERVER_ERROR, error.to_string()),
            other @ (HandlerError::Worker(_)
            | HandlerError::Output(_)
            | HandlerError::Event(_)
            | HandlerError::Serialize(_)) => Self::internal(other.to_string()),
        }
    }
}
