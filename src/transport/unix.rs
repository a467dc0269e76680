//! Unix domain socket transport.

use std::{
    io,
    path::{Path, PathBuf},
    time::Duration,
};

#[cfg(unix)]
use std::{io::Write, os::unix::net::UnixStream};

use parking_lot::Mutex;

use crate::error::TransportError;

use super::{EndpointSet, Transport};

/// Opens a fresh stream per send: connect, write, close.
///
/// Only one send is in flight per instance. The guard is held across
/// endpoint selection and the whole connection lifetime.
#[derive(Debug)]
pub struct UdsTransport {
    endpoints: EndpointSet,
    write_timeout: Option<Duration>,
    send_guard: Mutex<()>,
}

impl UdsTransport {
    pub fn new(endpoints: EndpointSet) -> Self {
        Self {
            endpoints,
            write_timeout: None,
            send_guard: Mutex::new(()),
        }
    }

    /// Convenience constructor from a base path and replica count.
    pub fn for_path(base: impl Into<PathBuf>, replicas: usize) -> Self {
        Self::new(EndpointSet::new(base, replicas))
    }

    /// Bound each write. `None` or a zero duration keeps the operating
    /// system default.
    pub fn with_write_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.write_timeout = timeout.filter(|t| !t.is_zero());
        self
    }

    pub fn endpoints(&self) -> &EndpointSet {
        &self.endpoints
    }

    pub fn write_timeout(&self) -> Option<Duration> {
        self.write_timeout
    }
}

impl Transport for UdsTransport {
    fn send(&self, payload: &[u8]) -> Result<(), TransportError> {
        let _guard = self.send_guard.lock();
        let endpoint = self.endpoints.select();
        write_once(&endpoint, payload, self.write_timeout)
            .map_err(|source| TransportError::new(endpoint, source))
    }
}

#[cfg(unix)]
fn write_once(endpoint: &Path, payload: &[u8], timeout: Option<Duration>) -> io::Result<()> {
    let mut stream = UnixStream::connect(endpoint)?;
    let result = stream
        .set_write_timeout(timeout)
        .and_then(|()| stream.write_all(payload))
        .and_then(|()| stream.flush());
    // Closing happens on every path, before the outcome is reported.
    drop(stream);
    result
}

#[cfg(not(unix))]
fn write_once(endpoint: &Path, payload: &[u8], timeout: Option<Duration>) -> io::Result<()> {
    let _ = (endpoint, payload, timeout);
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "unix domain sockets are not supported on this platform",
    ))
}

impl From<EndpointSet> for UdsTransport {
    fn from(endpoints: EndpointSet) -> Self {
        Self::new(endpoints)
    }
}
