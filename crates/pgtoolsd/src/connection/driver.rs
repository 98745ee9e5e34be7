//! Abstractions over concrete database drivers.

use std::error::Error;
use std::fmt;

use serde_json::{Map, Value};

use super::contracts::ConnectionDetails;
use super::errors::ConnectionError;

/// Server version split into its numeric components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ServerVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl ServerVersion {
    #[must_use]
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl fmt::Display for ServerVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Rows returned by [`ServerConnection::execute_dict`], keyed by column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DictResult {
    /// Column names in result order.
    pub columns: Vec<String>,
    /// One map per row.
    pub rows: Vec<Map<String, Value>>,
}

/// How many rows [`ServerConnection::execute_query`] returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Fetch {
    /// Every row of the result set.
    #[default]
    All,
    /// The first row only, or none when the result set is empty.
    One,
}

/// Behaviour required from an open database connection.
pub trait ServerConnection: Send {
    /// Whether each statement commits on its own.
    fn autocommit(&self) -> bool;

    /// Switches autocommit on or off.
    fn set_autocommit(&mut self, enabled: bool) -> Result<(), ConnectionError>;

    fn host_name(&self) -> &str;

    fn port_num(&self) -> u16;

    fn user_name(&self) -> &str;

    fn database_name(&self) -> &str;

    fn server_version(&self) -> ServerVersion;

    /// Whether the current transaction has failed and must be rolled back.
    fn transaction_in_error(&self) -> bool;

    /// SQL that cancels the statement running on this connection.
    fn cancellation_query(&self) -> String;

    /// Runs `query` without arguments and returns the rows selected by
    /// `fetch`.
    fn execute_query(&mut self, query: &str, fetch: Fetch)
    -> Result<Vec<Vec<Value>>, ConnectionError>;

    /// Runs `query` with positional `params` and returns rows keyed by column.
    fn execute_dict(&mut self, query: &str, params: &[Value])
    -> Result<DictResult, ConnectionError>;

    /// Databases visible to this connection.
    fn list_databases(&mut self) -> Result<Vec<String>, ConnectionError>;

    /// Owner of the current database.
    fn get_database_owner(&mut self) -> Result<String, ConnectionError>;

    /// Closes the connection. Further calls are undefined.
    fn close(&mut self) -> Result<(), ConnectionError>;

    /// Classifies a raw driver failure as a [`ConnectionError`].
    ///
    /// Drivers override this to pull the server's message out of their own
    /// error type; the default keeps the error's display text.
    fn database_error(&self, error: Box<dyn Error + Send + Sync>) -> ConnectionError {
        ConnectionError::database_with_source(error.to_string(), error)
    }
}

impl fmt::Debug for dyn ServerConnection {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("ServerConnection")
    }
}

/// Opens connections from client-supplied options.
pub trait ConnectionFactory: Send + Sync {
    /// Opens a connection described by `details`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConnectionError`] when the options are incomplete or the
    /// server refuses the connection.
    fn open(&self, details: &ConnectionDetails)
    -> Result<Box<dyn ServerConnection>, ConnectionError>;
}

impl fmt::Debug for dyn ConnectionFactory {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("ConnectionFactory")
    }
}

/// Factory used when no driver has been linked in.
///
/// Every attempt fails with [`ConnectionError::NoDriver`] after the required
/// options have been checked, so clients still see option errors first.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredFactory;

/// Options a client must supply before any driver is consulted.
pub const REQUIRED_OPTIONS: &[&str] = &["server", "user"];

/// Checks that every option in [`REQUIRED_OPTIONS`] is present.
///
/// # Errors
///
/// Returns [`ConnectionError::MissingOption`] naming the first absent option.
pub fn require_options(details: &ConnectionDetails) -> Result<(), ConnectionError> {
    match REQUIRED_OPTIONS
        .iter()
        .find(|name| details.option(name).is_none())
    {
        Some(name) => Err(ConnectionError::missing_option(*name)),
        None => Ok(()),
    }
}

impl ConnectionFactory for UnconfiguredFactory {
    fn open(
        &self,
        details: &ConnectionDetails,
    ) -> Result<Box<dyn ServerConnection>, ConnectionError> {
        require_options(details)?;
        Err(ConnectionError::NoDriver)
    }
}
