//! Errors for the `ircwire` client.
//!
//! Message parsing never fails, so everything here concerns the connection and its
//! configuration.

use std::io::Error as IoError;

use thiserror::Error;

use crate::proto::error::ProtocolError;

/// A specialized `Result` type for the `ircwire` crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The main crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// An internal I/O error.
    #[error("an io error occurred")]
    Io(#[source] IoError),

    /// An internal TLS error.
    #[cfg(feature = "tls-native")]
    #[error("a TLS error occurred")]
    Tls(#[source] native_tls::Error),

    /// The configuration asks for TLS but the crate was built without a TLS backend.
    #[cfg(not(feature = "tls-native"))]
    #[error("TLS requested but no TLS backend was compiled in")]
    TlsDisabled,

    /// An error from the line codec.
    #[error("a protocol error occurred")]
    Proto(#[source] ProtocolError),

    /// The configuration could not be loaded or is missing a required value.
    #[error("invalid config: {}", path)]
    InvalidConfig {
        /// The path to the configuration, or "<none>" if none specified.
        path: String,
        /// The detailed configuration error.
        #[source]
        cause: ConfigError,
    },

    /// `connect` was called on a client that is already connected.
    #[error("already connected")]
    AlreadyConnected,

    /// `close` was called on a client that is not connected.
    #[error("already disconnected")]
    AlreadyDisconnected,

    /// A message was sent, or the read loop started, without a connection.
    #[error("not connected")]
    NotConnected,

    /// The socket accepted only part of a line. The connection has been closed.
    #[error("short write: {} of {} bytes", written, expected)]
    ShortWrite {
        /// Bytes actually written.
        written: usize,
        /// Bytes in the encoded line.
        expected: usize,
    },
}

/// Errors that occur with configurations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse as TOML.
    #[cfg(feature = "toml_config")]
    #[error("invalid toml")]
    InvalidToml(#[source] TomlError),

    /// Failed to parse as JSON.
    #[cfg(feature = "json_config")]
    #[error("invalid json")]
    InvalidJson(#[source] serde_json::Error),

    /// Failed to parse as YAML.
    #[cfg(feature = "yaml_config")]
    #[error("invalid yaml")]
    InvalidYaml(#[source] serde_yaml::Error),

    /// Failed to parse the given format because it was disabled at compile-time.
    #[error("config format disabled: {}", format)]
    ConfigFormatDisabled {
        /// The disabled file format.
        format: &'static str,
    },

    /// Could not identify the given file format.
    #[error("config format unknown: {}", format)]
    UnknownConfigFormat {
        /// The unknown file extension.
        format: String,
    },

    /// File was missing an extension to identify file format.
    #[error("missing format extension")]
    MissingExtension,

    /// Configuration does not specify a nickname.
    #[error("nickname not specified")]
    NicknameNotSpecified,

    /// Configuration does not specify a server.
    #[error("server not specified")]
    ServerNotSpecified,
}

/// A wrapper that combines toml's serialization and deserialization errors.
#[cfg(feature = "toml_config")]
#[derive(Debug, Error)]
pub enum TomlError {
    /// A TOML deserialization error.
    #[error("deserialization failed")]
    Read(#[source] toml::de::Error),
    /// A TOML serialization error.
    #[error("serialization failed")]
    Write(#[source] toml::ser::Error),
}

impl From<ProtocolError> for Error {
    fn from(e: ProtocolError) -> Error {
        match e {
            ProtocolError::Io(e) => Error::Io(e),
            e => Error::Proto(e),
        }
    }
}

impl From<IoError> for Error {
    fn from(e: IoError) -> Error {
        Error::Io(e)
    }
}

#[cfg(feature = "tls-native")]
impl From<native_tls::Error> for Error {
    fn from(e: native_tls::Error) -> Error {
        Error::Tls(e)
    }
}
