//! Error types surfaced by the export path and client construction.

use std::{io, path::PathBuf};

use thiserror::Error;

/// The batch could not be encoded. Raised before any socket is opened.
#[derive(Debug, Error)]
#[error("failed to serialize export data: {0}")]
pub struct SerializationError(#[from] pub rmp_serde::encode::Error);

/// Connecting to or writing into the collector socket failed.
///
/// Connect, write and timeout failures share this type; the underlying
/// [`io::ErrorKind`] remains available through [`TransportError::kind`].
/// The stream has already been closed when this error is returned.
#[derive(Debug, Error)]
#[error("failed to write export data into UDS socket {}: {source}", .endpoint.display())]
pub struct TransportError {
    pub endpoint: PathBuf,
    #[source]
    pub source: io::Error,
}

impl TransportError {
    pub fn new(endpoint: impl Into<PathBuf>, source: io::Error) -> Self {
        Self {
            endpoint: endpoint.into(),
            source,
        }
    }

    pub fn kind(&self) -> io::ErrorKind {
        self.source.kind()
    }
}

/// Typed outcome of a failed export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Bad data: the payload is not representable in MessagePack.
    #[error(transparent)]
    Serialization(#[from] SerializationError),
    /// Bad connection: the collector socket could not be reached or written.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl ExportError {
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization(_))
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

/// Errors that may occur while building a client.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Invalid user supplied configuration.
    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),
    /// An environment variable held a value that could not be parsed.
    #[error("invalid value {value:?} for environment variable {var}")]
    InvalidEnv { var: &'static str, value: String },
}
