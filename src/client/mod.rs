//! Thread-safe export client.
//!
//! [`UdsClient`] encodes a batch into a MessagePack envelope and hands it to
//! its [`Transport`]. Failures are logged through the client's logging gate
//! and then reported according to the configured [`ErrorMode`]: either as
//! `Ok(false)` (the default) or as a typed [`ExportError`].

mod builder;
mod config;
mod report;


pub use builder::ClientBuilder;
pub use config::{
    ClientConfig, DEFAULT_AGENT_TAG, DEFAULT_SERVER_ADDRESS, DEFAULT_SERVER_REPLICAS,
    ENV_AGENT_TAG, ENV_LOGGING_LEVEL, ENV_SERVER_ADDRESS, ENV_SERVER_REPLICAS,
    ENV_SHOULD_AVOID_LOGGING, ENV_SHOULD_RAISE_EXCEPTIONS, ENV_USER_ID, LoggingConfig,
};
pub use report::{ErrorMode, LOG_TARGET};

use serde::Serialize;

use crate::{
    envelope,
    error::{ConfigError, ExportError},
    record::ExportRecord,
    transport::{EndpointSet, Transport, UdsTransport},
};

use report::ExportLog;

/// Client exporting record batches to the local collector agent.
///
/// The client is `Send + Sync`; share it behind an `Arc` to export from
/// several threads. Sends are serialised by the transport.
pub struct UdsClient<T = UdsTransport> {
    user_id: Option<String>,
    agent_tag: String,
    error_mode: ErrorMode,
    log: ExportLog,
    transport: T,
}

impl UdsClient {
    /// Construct a client from a configuration object.
    pub fn new(config: ClientConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let transport = UdsTransport::new(EndpointSet::new(
            config.server_address.clone(),
            config.server_replicas,
        ))
        .with_write_timeout(config.write_timeout);
        Ok(Self::from_parts(config, transport))
    }

    /// Construct a client from the legacy `MONA_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }
}

impl<T: Transport> UdsClient<T> {
    /// Construct a client delivering through `transport`.
    ///
    /// The address, replica and timeout settings in `config` are neither
    /// used nor validated; the transport owns delivery.
    pub fn with_transport(config: ClientConfig, transport: T) -> Result<Self, ConfigError> {
        config.validate_client()?;
        Ok(Self::from_parts(config, transport))
    }

    fn from_parts(config: ClientConfig, transport: T) -> Self {
        Self {
            user_id: config.user_id,
            agent_tag: config.agent_tag,
            error_mode: config.error_mode,
            log: ExportLog::new(config.logging),
            transport,
        }
    }

    /// Export a batch in a single attempt.
    ///
    /// Returns `Ok(true)` on delivery. On failure, returns `Ok(false)` in
    /// [`ErrorMode::Suppress`] or the typed error in [`ErrorMode::Raise`].
    pub fn export<M: Serialize>(&self, records: &[ExportRecord<M>]) -> Result<bool, ExportError> {
        self.error_mode.report(self.try_export(records))
    }

    /// Export a batch and return the typed outcome regardless of the
    /// configured error mode. Failures are still logged.
    pub fn try_export<M: Serialize>(&self, records: &[ExportRecord<M>]) -> Result<(), ExportError> {
        let payload = envelope::encode(&self.agent_tag, self.user_id.as_deref(), records)
            .inspect_err(|err| self.log.warn(format_args!("UdsClient: {err}")))?;

        self.transport
            .send(&payload)
            .inspect_err(|err| self.log.warn(format_args!("UdsClient: {err}")))?;

        self.log
            .info(format_args!("Exported {} items successfully", records.len()));
        Ok(())
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn agent_tag(&self) -> &str {
        &self.agent_tag
    }

    pub fn error_mode(&self) -> ErrorMode {
        self.error_mode
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

impl<T> std::fmt::Debug for UdsClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UdsClient")
            .field("user_id", &self.user_id)
            .field("agent_tag", &self.agent_tag)
            .field("error_mode", &self.error_mode)
            .finish()
    }
}
