//! Structured health reporting for service lifecycle events.

use std::sync::Arc;

use pgtools_config::Config;

use crate::bootstrap::BootstrapError;
use crate::server::{ServeError, ServeOutcome};

/// Observer trait used to surface lifecycle events to telemetry sinks.
pub trait HealthReporter: Send + Sync {
    /// Invoked before configuration loading begins.
    fn bootstrap_starting(&self);

    /// Invoked after bootstrap completes successfully.
    fn bootstrap_succeeded(&self, config: &Config);

    /// Invoked when bootstrap fails.
    fn bootstrap_failed(&self, error: &BootstrapError);

    /// Invoked when the request loop stops normally.
    fn serve_finished(&self, outcome: ServeOutcome);

    /// Invoked when the request loop stops on a fatal error.
    fn serve_failed(&self, error: &ServeError);
}

impl<T> HealthReporter for Arc<T>
where
    T: HealthReporter,
{
    fn bootstrap_starting(&self) {
        (**self).bootstrap_starting();
    }

    fn bootstrap_succeeded(&self, config: &Config) {
        (**self).bootstrap_succeeded(config);
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        (**self).bootstrap_failed(error);
    }

    fn serve_finished(&self, outcome: ServeOutcome) {
        (**self).serve_finished(outcome);
    }

    fn serve_failed(&self, error: &ServeError) {
        (**self).serve_failed(error);
    }
}

/// Default reporter that records lifecycle events using `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StructuredHealthReporter;

impl StructuredHealthReporter {
    /// Builds a new reporter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl HealthReporter for StructuredHealthReporter {
    fn bootstrap_starting(&self) {
        tracing::info!(
            target: "pgtoolsd::health",
            event = "bootstrap_starting",
            "starting service bootstrap"
        );
    }

    fn bootstrap_succeeded(&self, config: &Config) {
        tracing::info!(
            target: "pgtoolsd::health",
            event = "bootstrap_succeeded",
            log_filter = %config.log_filter(),
            log_format = %config.log_format(),
            frame_terminator = %config.frame_terminator(),
            max_content_length = config.max_content_length(),
            "service bootstrap completed"
        );
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        tracing::error!(
            target: "pgtoolsd::health",
            event = "bootstrap_failed",
            error = %error,
            "service bootstrap failed"
        );
    }

    fn serve_finished(&self, outcome: ServeOutcome) {
        tracing::info!(
            target: "pgtoolsd::health",
            event = "serve_finished",
            outcome = ?outcome,
            exit_code = outcome.exit_code(),
            "request loop finished"
        );
    }

    fn serve_failed(&self, error: &ServeError) {
        tracing::error!(
            target: "pgtoolsd::health",
            event = "serve_failed",
            error = %error,
            "request loop failed"
        );
    }
}
