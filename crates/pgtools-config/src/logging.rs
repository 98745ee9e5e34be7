//! Log output selection.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Formats the service can emit log records in.
///
/// Records always go to stderr or the configured log file; stdout carries
/// protocol frames only.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogFormat {
    /// One JSON object per record.
    #[default]
    Json,
    /// Single human-readable line per record.
    Compact,
}

/// Errors encountered while parsing a [`LogFormat`] from text.
pub type LogFormatParseError = strum::ParseError;
