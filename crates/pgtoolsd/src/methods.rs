//! Built-in method handlers and their registration.
//!
//! Registration happens in two phases. [`register_handshake`] binds only
//! `initialize`; running `initialize` calls [`register_service_methods`],
//! which binds everything else. Registering again overwrites the same
//! bindings, so a repeated `initialize` is harmless.

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::capabilities::{CapabilitiesResult, InitializeResult};
use crate::connection::{CONNECT_METHOD, ConnectParams, DISCONNECT_METHOD, DisconnectParams};
use crate::context::ServerContext;
use crate::dispatch::{DispatchTable, HandlerError, Params};

const METHODS_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::methods");

pub const INITIALIZE: &str = "initialize";
pub const SHUTDOWN: &str = "shutdown";
pub const EXIT: &str = "exit";
pub const ECHO: &str = "echo";
pub const VERSION: &str = "version";
pub const CAPABILITIES_LIST: &str = "capabilities/list";
pub const WAIT: &str = "wait";

/// Value returned by `version`.
pub const PROTOCOL_VERSION: &str = "0";

/// Binds the methods available before the handshake.
pub fn register_handshake(dispatch: &DispatchTable) {
    dispatch.register(INITIALIZE, initialize);
}

/// Binds the methods available after `initialize`.
pub fn register_service_methods(dispatch: &DispatchTable) {
    dispatch.register(CONNECT_METHOD, connect);
    dispatch.register(DISCONNECT_METHOD, disconnect);
    dispatch.register(SHUTDOWN, shutdown);
    dispatch.register(EXIT, exit);
    dispatch.register(ECHO, echo);
    dispatch.register(VERSION, version);
    dispatch.register(CAPABILITIES_LIST, capabilities_list);
    dispatch.register(WAIT, wait);
}

/// Parameters a client may send with `initialize`. All are optional and
/// none changes the service's behaviour.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
#[expect(dead_code, reason = "accepted for protocol compatibility and only logged")]
struct InitializeParams {
    process_id: Option<i64>,
    root_path: Option<String>,
    root_uri: Option<String>,
    initialization_options: Option<Value>,
    capabilities: Option<Value>,
    trace: Option<String>,
    client_info: Option<Value>,
    workspace_folders: Option<Value>,
    locale: Option<String>,
}

impl InitializeParams {
    const FIELDS: &'static [&'static str] = &[
        "processId",
        "rootPath",
        "rootUri",
        "initializationOptions",
        "capabilities",
        "trace",
        "clientInfo",
        "workspaceFolders",
        "locale",
    ];
}

fn initialize(context: &ServerContext, params: Params) -> Result<Value, HandlerError> {
    let params: InitializeParams = params.bind(InitializeParams::FIELDS)?;
    debug!(target: METHODS_TARGET, ?params, "initialize received");
    register_service_methods(context.dispatch());
    context.lifecycle().mark_initialized();
    Ok(serde_json::to_value(InitializeResult::service())?)
}

fn shutdown(context: &ServerContext, params: Params) -> Result<Value, HandlerError> {
    params.expect_none()?;
    context.lifecycle().request_shutdown();
    // Connection attempts still in flight would otherwise land after the close.
    if let Err(error) = context.workers().wait() {
        warn!(target: METHODS_TARGET, %error, "workers failed before shutdown");
    }
    let closed = context.connections().close_all();
    if closed > 0 {
        info!(target: METHODS_TARGET, closed, "closed connections on shutdown");
    }
    Ok(Value::Null)
}

fn exit(context: &ServerContext, params: Params) -> Result<Value, HandlerError> {
    params.expect_none()?;
    context.lifecycle().request_exit();
    Ok(Value::Null)
}

#[derive(Debug, Deserialize)]
struct EchoParams {
    arg: String,
}

/// Writes `arg` to the output stream unframed, then answers `null`.
fn echo(context: &ServerContext, params: Params) -> Result<Value, HandlerError> {
    let EchoParams { arg } = params.bind(&["arg"])?;
    context.output().write_raw(arg.as_bytes())?;
    Ok(Value::Null)
}

fn version(_: &ServerContext, params: Params) -> Result<Value, HandlerError> {
    params.expect_none()?;
    Ok(Value::String(PROTOCOL_VERSION.to_owned()))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CapabilitiesParams {
    host_name: String,
    host_version: String,
}

fn capabilities_list(_: &ServerContext, params: Params) -> Result<Value, HandlerError> {
    let CapabilitiesParams {
        host_name,
        host_version,
    } = params.bind(&["hostName", "hostVersion"])?;
    info!(target: METHODS_TARGET, %host_name, %host_version, "capabilities requested");
    Ok(serde_json::to_value(CapabilitiesResult::postgres())?)
}

fn wait(context: &ServerContext, params: Params) -> Result<Value, HandlerError> {
    params.expect_none()?;
    context.workers().wait()?;
    Ok(Value::Null)
}

fn connect(context: &ServerContext, params: Params) -> Result<Value, HandlerError> {
    let params: ConnectParams = params.bind(ConnectParams::FIELDS)?;
    context
        .connections()
        .connect(params, context.workers(), context.events())?;
    Ok(Value::Bool(true))
}

fn disconnect(context: &ServerContext, params: Params) -> Result<Value, HandlerError> {
    let DisconnectParams { owner_uri } = params.bind(DisconnectParams::FIELDS)?;
    Ok(Value::Bool(context.connections().disconnect(&owner_uri)))
}
