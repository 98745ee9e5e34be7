//! JSON-RPC 2.0 message types.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};

use super::errors::RpcError;
use super::params::Params;

/// Protocol version tag carried by every message.
pub const JSONRPC_VERSION: &str = "2.0";

/// Identifier correlating a response with its request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestId {
    /// Numeric identifier.
    Number(Number),
    /// String identifier.
    String(String),
    /// Explicit `null`, also used when the request id could not be read.
    Null,
}

impl From<i64> for RequestId {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<&str> for RequestId {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

/// A validated request or notification.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    /// `None` for notifications.
    pub id: Option<RequestId>,
    /// Method to invoke.
    pub method: String,
    /// Parameter bag.
    pub params: Params,
}

impl Request {
    /// Returns `true` when no response is expected.
    #[must_use]
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }

    /// Validates one decoded JSON value as a request.
    ///
    /// On failure the error is paired with the request id when it could be
    /// recovered, so the error response can still be correlated.
    ///
    /// # Errors
    ///
    /// Returns an invalid request error when the value is not an object, the
    /// `jsonrpc` tag is not `"2.0"`, `method` is not a string, `params` is a
    /// scalar, or `id` is not a string, number or `null`.
    pub fn from_value(value: Value) -> Result<Self, (RequestId, RpcError)> {
        if !value.is_object() {
            return Err((
                RequestId::Null,
                RpcError::invalid_request("request must be a JSON object"),
            ));
        }
        let raw: RawRequest = serde_json::from_value(value)
            .map_err(|error| (RequestId::Null, RpcError::invalid_request(error.to_string())))?;

        let id = match raw.id {
            None => None,
            Some(value) => Some(
                serde_json::from_value::<RequestId>(value).map_err(|_| {
                    (
                        RequestId::Null,
                        RpcError::invalid_request("id must be a string, number or null"),
                    )
                })?,
            ),
        };
        let error_id = id.clone().unwrap_or(RequestId::Null);

        if raw.jsonrpc.as_deref() != Some(JSONRPC_VERSION) {
            return Err((
                error_id,
                RpcError::invalid_request("jsonrpc must be \"2.0\""),
            ));
        }
        let Some(Value::String(method)) = raw.method else {
            return Err((error_id, RpcError::invalid_request("method must be a string")));
        };
        let params = Params::from_value(raw.params).map_err(|error| (error_id, error))?;

        Ok(Self { id, method, params })
    }
}

/// Request envelope before validation; `id` distinguishes absent from `null`.
#[derive(Debug, Deserialize)]
struct RawRequest {
    #[serde(default)]
    jsonrpc: Option<String>,
    #[serde(default, deserialize_with = "present")]
    id: Option<Value>,
    #[serde(default)]
    method: Option<Value>,
    #[serde(default)]
    params: Option<Value>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// A JSON-RPC 2.0 response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    /// Protocol version, always "2.0".
    pub jsonrpc: &'static str,
    /// Identifier copied from the request.
    pub id: RequestId,
    /// Exactly one of `result` or `error`.
    #[serde(flatten)]
    pub outcome: Outcome,
}

/// Payload of a [`Response`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// The handler's return value.
    Result(Value),
    /// The failure reported to the client.
    Error(RpcError),
}

impl Response {
    /// Creates a success response.
    #[must_use]
    pub fn success(id: RequestId, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            outcome: Outcome::Result(result),
        }
    }

    /// Creates an error response.
    #[must_use]
    pub fn failure(id: RequestId, error: RpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            outcome: Outcome::Error(error),
        }
    }
}

/// A server-initiated notification (no response expected).
#[derive(Debug, Clone, Serialize)]
pub struct Notification<'a, P> {
    /// Protocol version, always "2.0".
    pub jsonrpc: &'static str,
    /// Event name.
    pub method: &'a str,
    /// Event payload.
    pub params: &'a P,
}

impl<'a, P: Serialize> Notification<'a, P> {
    /// Creates a notification for `method` carrying `params`.
    #[must_use]
    pub fn new(method: &'a str, params: &'a P) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            method,
            params,
        }
    }
}
