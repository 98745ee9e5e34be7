//! Header-framed message transport.
//!
//! Every message travels as an LSP-style frame:
//! ```text
//! Content-Length: <length>\r\n
//! \r\n
//! <payload>
//! ```
//!
//! [`FrameReader`] decodes frames from any buffered byte stream and
//! [`FrameWriter`] encodes them onto a shared output stream. Both line-ending
//! conventions are accepted on input; the writer uses the configured
//! [`FrameTerminator`](pgtools_config::FrameTerminator).

mod errors;
mod reader;
#[cfg(test)]
mod test_utils;
mod writer;

pub use self::errors::FrameError;
pub use self::reader::{CONTENT_LENGTH, Frame, FrameReader};
pub use self::writer::FrameWriter;
#[cfg(test)]
pub(crate) use self::test_utils::SharedSink;

pub(crate) const TRANSPORT_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::transport");
