//! Request/response correlation for one frame body.

use std::panic::{self, AssertUnwindSafe};

use serde_json::Value;
use tracing::{debug, warn};

use crate::context::ServerContext;

use super::DISPATCH_TARGET;
use super::errors::{HandlerError, RpcError};
use super::message::{Request, RequestId, Response};

/// Handles one frame body and returns the response to write, if any.
///
/// The body may hold a single request or a batch. Notifications never
/// produce output, even when they fail; a batch made only of notifications
/// produces nothing at all.
pub fn process_body(context: &ServerContext, body: &[u8]) -> Option<Value> {
    let value = match serde_json::from_slice::<Value>(body) {
        Ok(value) => value,
        Err(error) => {
            warn!(target: DISPATCH_TARGET, %error, "unparseable request body");
            return Some(encode(Response::failure(
                RequestId::Null,
                RpcError::parse_error(error.to_string()),
            )));
        }
    };

    match value {
        Value::Array(entries) if entries.is_empty() => Some(encode(Response::failure(
            RequestId::Null,
            RpcError::invalid_request("empty batch"),
        ))),
        Value::Array(entries) => {
            let responses: Vec<Value> = entries
                .into_iter()
                .filter_map(|entry| process_entry(context, entry))
                .map(encode)
                .collect();
            (!responses.is_empty()).then_some(Value::Array(responses))
        }
        single => process_entry(context, single).map(encode),
    }
}

fn process_entry(context: &ServerContext, value: Value) -> Option<Response> {
    let request = match Request::from_value(value) {
        Ok(request) => request,
        Err((id, error)) => {
            warn!(target: DISPATCH_TARGET, %error, "invalid request");
            return Some(Response::failure(id, error));
        }
    };

    debug!(
        target: DISPATCH_TARGET,
        method = %request.method,
        notification = request.is_notification(),
        "dispatching request"
    );

    let Request { id, method, params } = request;
    let outcome = context
        .dispatch()
        .lookup(&method)
        .and_then(|handler| invoke(&method, || handler.call(context, params)));

    if let Err(error) = &outcome {
        warn!(target: DISPATCH_TARGET, method = %method, %error, "request failed");
    }

    let id = id?;
    Some(match outcome {
        Ok(result) => Response::success(id, result),
        Err(error) => Response::failure(id, error),
    })
}

fn invoke<F>(method: &str, call: F) -> Result<Value, RpcError>
where
    F: FnOnce() -> Result<Value, HandlerError>,
{
    match panic::catch_unwind(AssertUnwindSafe(call)) {
        Ok(result) => result.map_err(RpcError::from),
        Err(_) => Err(RpcError::internal(format!("handler for '{method}' panicked"))),
    }
}

fn encode(response: Response) -> Value {
    serde_json::to_value(&response).unwrap_or_else(|error| {
        serde_json::json!({
            "jsonrpc": super::JSONRPC_VERSION,
            "id": null,
            "error": RpcError::internal(error.to_string()),
        })
    })
}
