//! Tracks open connections per owner URI.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{info, warn};
use uuid::Uuid;

use super::CONNECTION_TARGET;
use super::contracts::{
    CONNECTION_COMPLETE_EVENT, ConnectParams, ConnectionCompleteParams, ConnectionDetails,
    ConnectionSummary, ServerInfo,
};
use super::driver::{ConnectionFactory, ServerConnection};
use super::errors::ConnectionError;
use crate::events::EventEmitter;
use crate::workers::WorkerRegistry;

struct OpenConnection {
    id: Uuid,
    connection: Box<dyn ServerConnection>,
}

type ConnectionMap = HashMap<String, OpenConnection>;

/// Opens connections on background workers and keeps them by owner URI.
///
/// Clones share the same connection map and factory.
#[derive(Clone)]
pub struct ConnectionService {
    factory: Arc<dyn ConnectionFactory>,
    connections: Arc<Mutex<ConnectionMap>>,
}

impl ConnectionService {
    /// Creates a service that opens connections through `factory`.
    pub fn new(factory: impl ConnectionFactory + 'static) -> Self {
        Self {
            factory: Arc::new(factory),
            connections: Arc::default(),
        }
    }

    /// Starts a connection attempt on a tracked worker.
    ///
    /// The outcome is reported through a `connection/complete` event. A
    /// successful attempt replaces, and closes, any connection already held
    /// for the same owner URI.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::Worker`] when the worker cannot be started.
    pub fn connect(
        &self,
        params: ConnectParams,
        workers: &WorkerRegistry,
        events: &EventEmitter,
    ) -> Result<(), ConnectionError> {
        let ConnectParams {
            owner_uri,
            connection,
        } = params;
        info!(target: CONNECTION_TARGET, owner_uri = %owner_uri, "connection requested");

        let service = self.clone();
        let events = events.clone();
        workers.spawn(format!("connect {owner_uri}"), move || {
            let payload = service.open(&owner_uri, &connection);
            if let Err(error) = events.send_event(CONNECTION_COMPLETE_EVENT, &payload) {
                warn!(target: CONNECTION_TARGET, %error, "failed to report connection result");
            }
        })?;
        Ok(())
    }

    /// Closes the connection held for `owner_uri`.
    ///
    /// Returns `true` when a connection existed.
    pub fn disconnect(&self, owner_uri: &str) -> bool {
        let removed = self.lock().remove(owner_uri);
        match removed {
            Some(open) => {
                close(owner_uri, open);
                true
            }
            None => {
                info!(target: CONNECTION_TARGET, owner_uri, "no connection to close");
                false
            }
        }
    }

    /// Closes every open connection.
    ///
    /// Returns the number of connections closed.
    pub fn close_all(&self) -> usize {
        let drained: Vec<_> = self.lock().drain().collect();
        let count = drained.len();
        for (owner_uri, open) in drained {
            close(&owner_uri, open);
        }
        count
    }

    /// Runs `operation` against the connection held for `owner_uri`.
    ///
    /// The connection map stays locked while `operation` runs, so calls on
    /// the same service are serialised.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::NotConnected`] when nothing is open for
    /// `owner_uri`, or whatever `operation` returns.
    pub fn with_connection<T, F>(&self, owner_uri: &str, operation: F) -> Result<T, ConnectionError>
    where
        F: FnOnce(&mut dyn ServerConnection) -> Result<T, ConnectionError>,
    {
        let mut connections = self.lock();
        let open = connections
            .get_mut(owner_uri)
            .ok_or_else(|| ConnectionError::NotConnected {
                owner_uri: owner_uri.to_owned(),
            })?;
        operation(open.connection.as_mut())
    }

    /// Identifier of the connection held for `owner_uri`.
    #[must_use]
    pub fn connection_id(&self, owner_uri: &str) -> Option<Uuid> {
        self.lock().get(owner_uri).map(|open| open.id)
    }

    /// Number of open connections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether no connections are open.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn open(&self, owner_uri: &str, details: &ConnectionDetails) -> ConnectionCompleteParams {
        let connection = match self.factory.open(details) {
            Ok(connection) => connection,
            Err(error) => {
                warn!(target: CONNECTION_TARGET, owner_uri, %error, "connection failed");
                return ConnectionCompleteParams::failed(
                    owner_uri,
                    ConnectionSummary::requested(details),
                    error.to_string(),
                );
            }
        };

        let id = Uuid::new_v4();
        let summary = ConnectionSummary {
            server_name: Some(connection.host_name().to_owned()),
            database_name: Some(connection.database_name().to_owned()),
            user_name: Some(connection.user_name().to_owned()),
        };
        let server_info = ServerInfo {
            server_version: Some(connection.server_version().to_string()),
        };

        let previous = self
            .lock()
            .insert(owner_uri.to_owned(), OpenConnection { id, connection });
        if let Some(previous) = previous {
            close(owner_uri, previous);
        }
        info!(target: CONNECTION_TARGET, owner_uri, connection_id = %id, "connection opened");
        ConnectionCompleteParams::succeeded(owner_uri, id, summary, server_info)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ConnectionMap> {
        self.connections
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

fn close(owner_uri: &str, mut open: OpenConnection) {
    match open.connection.close() {
        Ok(()) => info!(
            target: CONNECTION_TARGET,
            owner_uri,
            connection_id = %open.id,
            "connection closed"
        ),
        Err(error) => warn!(
            target: CONNECTION_TARGET,
            owner_uri,
            connection_id = %open.id,
            %error,
            "failed to close connection cleanly"
        ),
    }
}

impl fmt::Debug for ConnectionService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionService")
            .field("open", &self.len())
            .finish_non_exhaustive()
    }
}
