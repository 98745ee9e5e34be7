//! Shared configuration for the pgtools service.
//!
//! Values are layered by `ortho_config`: built-in defaults, then an optional
//! configuration file (`--config-path` or `PGTOOLS_CONFIG_PATH`), then
//! `PGTOOLS_*` environment variables, and finally command-line flags. The
//! service binary reads this once during bootstrap; nothing else in the
//! workspace touches the environment directly.

mod defaults;
mod framing;
mod logging;

use camino::Utf8PathBuf;
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

pub use defaults::{
    DEFAULT_LOG_FILTER, DEFAULT_MAX_CONTENT_LENGTH, default_frame_terminator, default_log_filter,
    default_log_filter_string, default_log_format, default_max_content_length,
};
pub use framing::{FrameTerminator, FrameTerminatorParseError};
pub use logging::{LogFormat, LogFormatParseError};

/// Resolved service configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "PGTOOLS")]
pub struct Config {
    /// `tracing` filter expression applied to the log subscriber.
    #[ortho_config(default = default_log_filter_string())]
    pub log_filter: String,
    /// Output format for log records.
    #[ortho_config(default = default_log_format())]
    pub log_format: LogFormat,
    /// File that receives log records instead of stderr.
    pub log_file: Option<Utf8PathBuf>,
    /// Blank-line terminator written after the `Content-Length` header.
    #[ortho_config(default = default_frame_terminator())]
    pub frame_terminator: FrameTerminator,
    /// Largest `Content-Length` the transport accepts, in bytes.
    #[ortho_config(default = default_max_content_length())]
    pub max_content_length: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            log_file: None,
            frame_terminator: default_frame_terminator(),
            max_content_length: default_max_content_length(),
        }
    }
}

impl Config {
    /// Filter expression for the log subscriber.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Output format for log records.
    #[must_use]
    pub fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Optional log file destination.
    #[must_use]
    pub fn log_file(&self) -> Option<&Utf8PathBuf> {
        self.log_file.as_ref()
    }

    /// Terminator used when encoding frames.
    #[must_use]
    pub fn frame_terminator(&self) -> FrameTerminator {
        self.frame_terminator
    }

    /// Upper bound on accepted frame bodies.
    #[must_use]
    pub fn max_content_length(&self) -> usize {
        self.max_content_length
    }
}
