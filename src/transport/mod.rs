//! Delivery of encoded envelopes to the collector agent.
//!
//! [`UdsTransport`] owns the replica rotation cursor and the send guard, so
//! every physical send is serialised within one transport instance while
//! separate clients stay independent of each other.

mod endpoints;
mod unix;


pub use endpoints::EndpointSet;
pub use unix::UdsTransport;

use crate::error::TransportError;

/// Sink accepting fully encoded envelopes.
///
/// Implementations must deliver the whole buffer or report a
/// [`TransportError`]; partial writes are not retried by the caller.
pub trait Transport: Send + Sync {
    /// Deliver `payload` in a single attempt.
    fn send(&self, payload: &[u8]) -> Result<(), TransportError>;
}

impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    fn send(&self, payload: &[u8]) -> Result<(), TransportError> {
        (**self).send(payload)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&self, payload: &[u8]) -> Result<(), TransportError> {
        (**self).send(payload)
    }
}
