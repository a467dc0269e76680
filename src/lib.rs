//! Client for exporting telemetry batches to a local collector agent.
//!
//! Records are wrapped into a fluentd-style forward message, encoded as
//! MessagePack and written over a Unix domain socket to one of the agent's
//! replicas. The agent takes over delivery from there, so exporting never
//! waits on a remote service.
//!
//! ```no_run
//! use mona_uds_client::{ExportRecord, Payload, UdsClient};
//!
//! let client = UdsClient::builder()
//!     .with_user_id("user@example.com")
//!     .with_server_address("/uds/mona/mona.sock")
//!     .build()?;
//!
//! let mut message = Payload::new();
//! message.insert("latency_ms".into(), 42.into());
//! let sent = client.export(&[ExportRecord::stamped_now("ctx-1", message, "REQUESTS")])?;
//! assert!(sent);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod client;
pub mod envelope;
pub mod error;
pub mod level;
pub mod record;
pub mod transport;

pub use client::{ClientBuilder, ClientConfig, ErrorMode, LoggingConfig, UdsClient};
pub use error::{ConfigError, ExportError, SerializationError, TransportError};
pub use level::LogLevel;
pub use record::{ExportRecord, Payload};
pub use transport::{EndpointSet, Transport, UdsTransport};
