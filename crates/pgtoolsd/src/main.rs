use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use pgtoolsd::{StructuredHealthReporter, SystemConfigLoader, UnconfiguredFactory, bootstrap_with};

fn main() -> ExitCode {
    let reporter = Arc::new(StructuredHealthReporter::new());
    let service = match bootstrap_with(&SystemConfigLoader, reporter) {
        Ok(service) => service,
        Err(error) => {
            // Telemetry may not be installed yet, so stderr is the only sink.
            eprintln!("pgtoolsd: {error}");
            return ExitCode::from(error.exit_code());
        }
    };

    match service.serve(io::stdin().lock(), io::stdout(), UnconfiguredFactory) {
        Ok(outcome) => ExitCode::from(outcome.exit_code()),
        Err(error) => ExitCode::from(error.exit_code()),
    }
}
