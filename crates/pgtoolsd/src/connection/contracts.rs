//! Request parameters and event payloads for the connection methods.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Method name of the connect request.
pub const CONNECT_METHOD: &str = "connection/connect";
/// Method name of the disconnect request.
pub const DISCONNECT_METHOD: &str = "connection/disconnect";
/// Event sent when a connection attempt finishes.
pub const CONNECTION_COMPLETE_EVENT: &str = "connection/complete";

/// Parameters of `connection/connect`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectParams {
    /// Client-side resource the connection belongs to.
    pub owner_uri: String,
    /// Connection options keyed by the names from `capabilities/list`.
    pub connection: ConnectionDetails,
}

impl ConnectParams {
    /// Declared parameter names, in positional order.
    pub const FIELDS: &'static [&'static str] = &["ownerUri", "connection"];
}

/// Option values supplied by the client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConnectionDetails {
    /// Raw option map.
    #[serde(default)]
    pub options: Map<String, Value>,
}

impl ConnectionDetails {
    /// Returns the option `name` when it is a non-empty string.
    #[must_use]
    pub fn option(&self, name: &str) -> Option<&str> {
        self.options
            .get(name)
            .and_then(Value::as_str)
            .filter(|value| !value.is_empty())
    }

    /// The `server` option.
    #[must_use]
    pub fn server_name(&self) -> Option<&str> {
        self.option("server")
    }

    /// The `database` option.
    #[must_use]
    pub fn database_name(&self) -> Option<&str> {
        self.option("database")
    }

    /// The `user` option.
    #[must_use]
    pub fn user_name(&self) -> Option<&str> {
        self.option("user")
    }
}

/// Parameters of `connection/disconnect`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisconnectParams {
    /// Resource whose connection should be closed.
    pub owner_uri: String,
}

impl DisconnectParams {
    /// Declared parameter names, in positional order.
    pub const FIELDS: &'static [&'static str] = &["ownerUri"];
}

/// Where a connection landed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionSummary {
    pub server_name: Option<String>,
    pub database_name: Option<String>,
    pub user_name: Option<String>,
}

impl ConnectionSummary {
    /// Summary built from the options the client requested.
    #[must_use]
    pub fn requested(details: &ConnectionDetails) -> Self {
        Self {
            server_name: details.server_name().map(str::to_owned),
            database_name: details.database_name().map(str::to_owned),
            user_name: details.user_name().map(str::to_owned),
        }
    }
}

/// Facts about the server reached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerInfo {
    pub server_version: Option<String>,
}

/// Payload of the `connection/complete` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionCompleteParams {
    pub owner_uri: String,
    /// Identifier of the new connection; `null` when the attempt failed.
    pub connection_id: Option<Uuid>,
    pub messages: Option<String>,
    pub error_message: Option<String>,
    pub connection_summary: ConnectionSummary,
    pub server_info: ServerInfo,
}

impl ConnectionCompleteParams {
    /// Payload for a successful attempt.
    #[must_use]
    pub fn succeeded(
        owner_uri: impl Into<String>,
        connection_id: Uuid,
        summary: ConnectionSummary,
        server_info: ServerInfo,
    ) -> Self {
        Self {
            owner_uri: owner_uri.into(),
            connection_id: Some(connection_id),
            messages: None,
            error_message: None,
            connection_summary: summary,
            server_info,
        }
    }

    /// Payload for a failed attempt.
    #[must_use]
    pub fn failed(
        owner_uri: impl Into<String>,
        summary: ConnectionSummary,
        error_message: impl Into<String>,
    ) -> Self {
        Self {
            owner_uri: owner_uri.into(),
            connection_id: None,
            messages: None,
            error_message: Some(error_message.into()),
            connection_summary: summary,
            server_info: ServerInfo::default(),
        }
    }
}
