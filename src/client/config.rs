//! Configuration consumed by [`UdsClient`](super::UdsClient).
//!
//! Values are read once when the client is constructed. The legacy
//! `MONA_*` environment variables can seed a configuration through
//! [`ClientConfig::from_env`], which keeps existing agent deployments working
//! without code changes.

use std::{path::PathBuf, time::Duration};

use crate::{error::ConfigError, level::LogLevel};

use super::report::ErrorMode;

/// Designated user identifier.
pub const ENV_USER_ID: &str = "MONA_USER_ID";
/// Base socket path. Must match the agent deployment.
pub const ENV_SERVER_ADDRESS: &str = "MONA_UDS_SERVER_ADDRESS";
/// Number of agent replicas. Must match the agent deployment.
pub const ENV_SERVER_REPLICAS: &str = "MONA_UDS_SERVER_REPLICAS";
/// Tag identifying the client to the agent.
pub const ENV_AGENT_TAG: &str = "MONA_AGENT_TAG";
pub const ENV_SHOULD_RAISE_EXCEPTIONS: &str = "MONA_SHOULD_RAISE_EXCEPTIONS";
pub const ENV_SHOULD_AVOID_LOGGING: &str = "MONA_SHOULD_AVOID_LOGGING";
pub const ENV_LOGGING_LEVEL: &str = "MONA_LOGGING_LEVEL";

/// Default base socket path.
pub const DEFAULT_SERVER_ADDRESS: &str = "/uds/mona/mona.sock";
/// Default replica count.
pub const DEFAULT_SERVER_REPLICAS: usize = 3;
/// Default agent tag.
pub const DEFAULT_AGENT_TAG: &str = "mona.client";

/// Gate applied to the client's own log messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Emit nothing when false.
    pub enabled: bool,
    /// Minimum level emitted when enabled.
    pub level: LogLevel,
}

/// Logging is off unless explicitly enabled, matching
/// `MONA_SHOULD_AVOID_LOGGING=true`.
impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: LogLevel::Warning,
        }
    }
}

/// Configuration object describing how to construct a [`UdsClient`](super::UdsClient).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Sent as `userId`; encoded as nil when unset.
    pub user_id: Option<String>,
    pub server_address: PathBuf,
    pub server_replicas: usize,
    pub agent_tag: String,
    pub error_mode: ErrorMode,
    pub logging: LoggingConfig,
    /// `None` keeps the operating system default.
    pub write_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_id: None,
            server_address: PathBuf::from(DEFAULT_SERVER_ADDRESS),
            server_replicas: DEFAULT_SERVER_REPLICAS,
            agent_tag: DEFAULT_AGENT_TAG.into(),
            error_mode: ErrorMode::default(),
            logging: LoggingConfig::default(),
            write_timeout: None,
        }
    }
}

impl ClientConfig {
    /// Read the legacy `MONA_*` variables from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    ///
    /// Unset variables keep their defaults. Boolean variables accept
    /// `True`/`true`/`False`/`false` and fall back to the default for any
    /// other value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(user_id) = lookup(ENV_USER_ID) {
            config.user_id = Some(user_id);
        }
        if let Some(address) = lookup(ENV_SERVER_ADDRESS) {
            config.server_address = PathBuf::from(address);
        }
        if let Some(raw) = lookup(ENV_SERVER_REPLICAS) {
            config.server_replicas = raw.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                var: ENV_SERVER_REPLICAS,
                value: raw.clone(),
            })?;
        }
        if let Some(tag) = lookup(ENV_AGENT_TAG) {
            config.agent_tag = tag;
        }
        let raise = parse_flag(lookup(ENV_SHOULD_RAISE_EXCEPTIONS).as_deref(), false);
        config.error_mode = ErrorMode::from_raise_flag(raise);
        let avoid_logging = parse_flag(lookup(ENV_SHOULD_AVOID_LOGGING).as_deref(), true);
        config.logging.enabled = !avoid_logging;
        if let Some(raw) = lookup(ENV_LOGGING_LEVEL) {
            config.logging.level = raw.parse().map_err(|_| ConfigError::InvalidEnv {
                var: ENV_LOGGING_LEVEL,
                value: raw.clone(),
            })?;
        }
        Ok(config)
    }

    /// Reject values the client or its socket transport cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_client()?;
        self.validate_transport()
    }

    /// Check only the fields the client itself consumes.
    pub fn validate_client(&self) -> Result<(), ConfigError> {
        if self.agent_tag.is_empty() {
            return Err(ConfigError::InvalidConfig(
                "agent_tag must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Check the address, replica and timeout settings used by
    /// [`UdsTransport`](crate::transport::UdsTransport).
    pub fn validate_transport(&self) -> Result<(), ConfigError> {
        if self.server_address.as_os_str().is_empty() {
            return Err(ConfigError::InvalidConfig(
                "server_address must not be empty".into(),
            ));
        }
        if self.server_replicas == 0 {
            return Err(ConfigError::InvalidConfig(
                "server_replicas must be greater than zero".into(),
            ));
        }
        if self.write_timeout.is_some_and(|t| t.is_zero()) {
            return Err(ConfigError::InvalidConfig(
                "write_timeout must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

fn parse_flag(value: Option<&str>, default: bool) -> bool {
    match value {
        Some("True" | "true") => true,
        Some("False" | "false") => false,
        _ => default,
    }
}
