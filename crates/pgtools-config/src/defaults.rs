use crate::framing::FrameTerminator;
use crate::logging::LogFormat;

/// Default log filter expression used by the service.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default ceiling for a single frame body (64 MiB).
pub const DEFAULT_MAX_CONTENT_LENGTH: usize = 64 * 1024 * 1024;

/// Default log filter expression used by the service.
#[must_use]
pub fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format.
#[must_use]
pub fn default_log_format() -> LogFormat {
    LogFormat::Json
}

/// Default frame header terminator.
#[must_use]
pub fn default_frame_terminator() -> FrameTerminator {
    FrameTerminator::Crlf
}

/// Default ceiling for a single frame body.
#[must_use]
pub fn default_max_content_length() -> usize {
    DEFAULT_MAX_CONTENT_LENGTH
}
