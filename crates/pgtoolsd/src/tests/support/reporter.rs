//! Test double for [`HealthReporter`] that records structured events for assertions.

use std::sync::Mutex;

use pgtools_config::Config;

use crate::bootstrap::BootstrapError;
use crate::health::HealthReporter;
use crate::server::{ServeError, ServeOutcome};

/// Structured health events tracked during scenarios.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum HealthEvent {
    BootstrapStarting,
    BootstrapSucceeded,
    BootstrapFailed(String),
    ServeFinished(ServeOutcome),
    ServeFailed(String),
}

/// Records health events for assertions.
#[derive(Debug, Default)]
pub(crate) struct RecordingHealthReporter {
    events: Mutex<Vec<HealthEvent>>,
}

impl RecordingHealthReporter {
    /// Captures a copy of the recorded events.
    pub(crate) fn events(&self) -> Vec<HealthEvent> {
        self.events
            .lock()
            .expect("health reporter mutex poisoned")
            .clone()
    }

    fn record(&self, event: HealthEvent) {
        self.events
            .lock()
            .expect("health reporter mutex poisoned")
            .push(event);
    }
}

impl HealthReporter for RecordingHealthReporter {
    fn bootstrap_starting(&self) {
        self.record(HealthEvent::BootstrapStarting);
    }

    fn bootstrap_succeeded(&self, _config: &Config) {
        self.record(HealthEvent::BootstrapSucceeded);
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        self.record(HealthEvent::BootstrapFailed(error.to_string()));
    }

    fn serve_finished(&self, outcome: ServeOutcome) {
        self.record(HealthEvent::ServeFinished(outcome));
    }

    fn serve_failed(&self, error: &ServeError) {
        self.record(HealthEvent::ServeFailed(error.to_string()));
    }
}
