//! Service bootstrap orchestration.

use std::io::{BufRead, Write};
use std::sync::Arc;

use ortho_config::{OrthoConfig, OrthoError};
use pgtools_config::Config;
use thiserror::Error;

use crate::connection::ConnectionFactory;
use crate::health::HealthReporter;
use crate::server::{ServeError, ServeOutcome, Server};
use crate::telemetry::{self, TelemetryError, TelemetryHandle};

/// Trait abstracting configuration loading for testability.
pub trait ConfigLoader: Send + Sync {
    /// Loads the service configuration.
    fn load(&self) -> Result<Config, Arc<OrthoError>>;
}

/// Loader that delegates to [`Config::load`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemConfigLoader;

impl ConfigLoader for SystemConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Config::load()
    }
}

/// Loader that hands out a configuration resolved elsewhere.
#[derive(Debug, Clone)]
pub struct StaticConfigLoader {
    config: Config,
}

impl StaticConfigLoader {
    /// Wraps an already resolved configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Ok(self.config.clone())
    }
}

/// Errors surfaced during bootstrap.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Configuration failed to load.
    #[error("failed to load configuration: {source}")]
    Configuration {
        /// Underlying loader error.
        #[source]
        source: Arc<OrthoError>,
    },
    /// Telemetry initialisation failed.
    #[error("failed to initialise telemetry: {source}")]
    Telemetry {
        /// Underlying telemetry error.
        #[source]
        source: TelemetryError,
    },
}

impl BootstrapError {
    /// Process exit code reported for a bootstrap failure.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        1
    }
}

/// Result of a successful bootstrap invocation.
pub struct Service {
    config: Config,
    telemetry: TelemetryHandle,
    reporter: Arc<dyn HealthReporter>,
}

impl Service {
    /// Accessor for the resolved configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Accessor for the telemetry handle, primarily useful for testing.
    #[must_use]
    pub fn telemetry(&self) -> TelemetryHandle {
        self.telemetry
    }

    /// Serves framed requests from `input` until `exit` or end of input.
    ///
    /// # Errors
    ///
    /// Returns [`ServeError`] when the loop stops on a framing or write
    /// failure.
    pub fn serve<R>(
        &self,
        input: R,
        output: impl Write + Send + 'static,
        factory: impl ConnectionFactory + 'static,
    ) -> Result<ServeOutcome, ServeError>
    where
        R: BufRead,
    {
        let mut server = Server::new(input, output, &self.config, factory);
        match server.serve() {
            Ok(outcome) => {
                self.reporter.serve_finished(outcome);
                Ok(outcome)
            }
            Err(error) => {
                self.reporter.serve_failed(&error);
                Err(error)
            }
        }
    }
}

impl std::fmt::Debug for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Service")
            .field("config", &self.config)
            .field("telemetry", &self.telemetry)
            .finish_non_exhaustive()
    }
}

/// Bootstraps the service using the supplied collaborators.
///
/// # Errors
///
/// Returns [`BootstrapError`] when configuration cannot be loaded or
/// telemetry cannot be installed. The reporter sees the failure first.
pub fn bootstrap_with(
    loader: &dyn ConfigLoader,
    reporter: Arc<dyn HealthReporter>,
) -> Result<Service, BootstrapError> {
    reporter.bootstrap_starting();

    let config = match loader.load() {
        Ok(config) => config,
        Err(source) => {
            let error = BootstrapError::Configuration { source };
            reporter.bootstrap_failed(&error);
            return Err(error);
        }
    };

    let telemetry = match telemetry::initialise(&config) {
        Ok(handle) => handle,
        Err(source) => {
            let error = BootstrapError::Telemetry { source };
            reporter.bootstrap_failed(&error);
            return Err(error);
        }
    };

    reporter.bootstrap_succeeded(&config);
    Ok(Service {
        config,
        telemetry,
        reporter,
    })
}
