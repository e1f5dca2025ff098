//! IRC protocol errors using `thiserror`.
//!
//! Parsing a line never fails. The only errors in this crate come from framing and re-encoding
//! lines on the wire.

use thiserror::Error;

/// A `Result` type for IRC `ProtocolErrors`.
pub type Result<T, E = ProtocolError> = ::std::result::Result<T, E>;

/// An IRC protocol error.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// An internal I/O error.
    #[error("an io error occurred")]
    Io(#[source] std::io::Error),

    /// The requested text encoding is not known.
    #[error("unknown codec: {}", codec)]
    UnknownCodec {
        /// The label of the unknown encoding.
        codec: String,
    },

    /// Text could not be represented in the connection's encoding.
    #[error("codec {} failed: {}", codec, data)]
    CodecFailed {
        /// The name of the encoding.
        codec: &'static str,
        /// The data that failed to encode or decode.
        data: String,
    },
}

impl From<std::io::Error> for ProtocolError {
    fn from(e: std::io::Error) -> ProtocolError {
        ProtocolError::Io(e)
    }
}
