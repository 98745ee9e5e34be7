//! Error types for the connection service.

use std::error::Error;

use thiserror::Error;

use crate::workers::WorkerError;

/// Failures raised while opening, using, or closing database connections.
#[derive(Debug, Error)]
pub enum ConnectionError {
    /// No driver has been installed in the connection factory.
    #[error("no database driver is configured")]
    NoDriver,

    /// A required connection option was absent or empty.
    #[error("missing required connection option '{name}'")]
    MissingOption {
        /// Option name as listed by `capabilities/list`.
        name: String,
    },

    /// No connection is held for the owner URI.
    #[error("no connection is open for '{owner_uri}'")]
    NotConnected {
        /// Resource the caller asked about.
        owner_uri: String,
    },

    /// The driver or database rejected an operation.
    #[error("{message}")]
    Database {
        /// Human-readable description.
        message: String,
        /// Underlying driver error, when one is available.
        #[source]
        source: Option<Box<dyn Error + Send + Sync>>,
    },

    /// The background worker for a connection attempt could not start.
    #[error(transparent)]
    Worker(#[from] WorkerError),
}

impl ConnectionError {
    /// Builds a missing option error.
    pub fn missing_option(name: impl Into<String>) -> Self {
        Self::MissingOption { name: name.into() }
    }

    /// Builds a database error without an underlying source.
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
            source: None,
        }
    }

    /// Builds a database error that wraps a driver error.
    pub fn database_with_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn Error + Send + Sync>>,
    ) -> Self {
        Self::Database {
            message: message.into(),
            source: Some(source.into()),
        }
    }
}
