//! In-memory database driver for connection tests.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use std::time::Duration;

use serde_json::{Map, Value, json};

use crate::connection::{
    ConnectParams, ConnectionDetails, ConnectionError, ConnectionFactory, DictResult, Fetch,
    ServerConnection, ServerVersion, require_options,
};

/// Builds `connection/connect` parameters from an option object.
pub(crate) fn connect_params(owner_uri: &str, options: Value) -> ConnectParams {
    serde_json::from_value(json!({
        "ownerUri": owner_uri,
        "connection": {"options": options},
    }))
    .expect("connect params")
}

/// Factory that opens [`FakeConnection`]s and counts closures.
#[derive(Debug, Clone, Default)]
pub(crate) struct FakeFactory {
    closed: Arc<AtomicUsize>,
    refusal: Arc<Mutex<Option<String>>>,
    open_delay_ms: Arc<AtomicU64>,
}

impl FakeFactory {
    /// Number of connections closed so far.
    pub(crate) fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }

    /// Makes every later attempt fail with `message`.
    pub(crate) fn refuse(&self, message: &str) {
        *self.refusal.lock().unwrap_or_else(PoisonError::into_inner) = Some(message.to_owned());
    }

    /// Makes every later attempt block for `delay` before answering.
    pub(crate) fn delay_opens(&self, delay: Duration) {
        let millis = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self.open_delay_ms.store(millis, Ordering::SeqCst);
    }
}

impl ConnectionFactory for FakeFactory {
    fn open(
        &self,
        details: &ConnectionDetails,
    ) -> Result<Box<dyn ServerConnection>, ConnectionError> {
        let delay = self.open_delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            thread::sleep(Duration::from_millis(delay));
        }
        require_options(details)?;
        if let Some(message) = self
            .refusal
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
        {
            return Err(ConnectionError::database(message));
        }
        Ok(Box::new(FakeConnection {
            host: details.server_name().unwrap_or_default().to_owned(),
            user: details.user_name().unwrap_or_default().to_owned(),
            database: details.database_name().unwrap_or("postgres").to_owned(),
            autocommit: true,
            closed: Arc::clone(&self.closed),
        }))
    }
}

/// Connection that answers every query from fixed data.
#[derive(Debug)]
pub(crate) struct FakeConnection {
    host: String,
    user: String,
    database: String,
    autocommit: bool,
    closed: Arc<AtomicUsize>,
}

impl ServerConnection for FakeConnection {
    fn autocommit(&self) -> bool {
        self.autocommit
    }

    fn set_autocommit(&mut self, enabled: bool) -> Result<(), ConnectionError> {
        self.autocommit = enabled;
        Ok(())
    }

    fn host_name(&self) -> &str {
        &self.host
    }

    fn port_num(&self) -> u16 {
        5432
    }

    fn user_name(&self) -> &str {
        &self.user
    }

    fn database_name(&self) -> &str {
        &self.database
    }

    fn server_version(&self) -> ServerVersion {
        ServerVersion::new(16, 2, 0)
    }

    fn transaction_in_error(&self) -> bool {
        false
    }

    fn cancellation_query(&self) -> String {
        "SELECT pg_cancel_backend(4242)".to_owned()
    }

    fn execute_query(
        &mut self,
        _query: &str,
        fetch: Fetch,
    ) -> Result<Vec<Vec<Value>>, ConnectionError> {
        let rows = vec![vec![json!(1)], vec![json!(2)]];
        Ok(match fetch {
            Fetch::All => rows,
            Fetch::One => rows.into_iter().take(1).collect(),
        })
    }

    fn execute_dict(
        &mut self,
        _query: &str,
        _params: &[Value],
    ) -> Result<DictResult, ConnectionError> {
        let mut row = Map::new();
        row.insert("datname".to_owned(), json!(self.database));
        Ok(DictResult {
            columns: vec!["datname".to_owned()],
            rows: vec![row],
        })
    }

    fn list_databases(&mut self) -> Result<Vec<String>, ConnectionError> {
        Ok(vec!["postgres".to_owned(), self.database.clone()])
    }

    fn get_database_owner(&mut self) -> Result<String, ConnectionError> {
        Ok(self.user.clone())
    }

    fn close(&mut self) -> Result<(), ConnectionError> {
        self.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
