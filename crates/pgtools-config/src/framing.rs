use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Line-ending convention for the blank line that closes a frame header.
///
/// Decoders accept either convention; this only selects what the service
/// writes.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum FrameTerminator {
    /// `\r\n\r\n`, as LSP clients expect.
    #[default]
    Crlf,
    /// `\n\n`.
    Lf,
}

impl FrameTerminator {
    /// Bytes written between the header and the body.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Crlf => "\r\n\r\n",
            Self::Lf => "\n\n",
        }
    }
}

/// Errors encountered while parsing a [`FrameTerminator`] from text.
pub type FrameTerminatorParseError = strum::ParseError;
