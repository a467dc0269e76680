//! Builder for [`UdsClient`](super::UdsClient).
//!
//! Starts from [`ClientConfig::default`] (or the environment via
//! [`ClientBuilder::from_env`]) and layers explicit overrides on top before
//! validating the result.

use std::{path::PathBuf, time::Duration};

use crate::{error::ConfigError, level::LogLevel, transport::Transport};

use super::{ClientConfig, ErrorMode, UdsClient};

macro_rules! ensure_positive {
    ($value:expr, $field:expr) => {{
        if $value == 0 {
            Err(ConfigError::InvalidConfig(format!(
                "{} must be greater than zero",
                $field
            )))
        } else {
            Ok($value)
        }
    }};
}

macro_rules! option_setter {
    ($(#[$meta:meta])* $fn_name:ident, $field:ident, $ty:ty) => {
        $(#[$meta])*
        pub fn $fn_name(mut self, value: $ty) -> Self {
            self.$field = Some(value);
            self
        }
    };
}

/// Builder for constructing [`UdsClient`] instances.
#[derive(Clone, Debug, Default)]
pub struct ClientBuilder {
    base: Option<ClientConfig>,
    user_id: Option<String>,
    server_address: Option<PathBuf>,
    server_replicas: Option<usize>,
    agent_tag: Option<String>,
    error_mode: Option<ErrorMode>,
    logging_enabled: Option<bool>,
    log_level: Option<LogLevel>,
    write_timeout_ms: Option<u64>,
}

impl ClientBuilder {
    /// Create a builder seeded with the built-in defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder seeded from the legacy `MONA_*` variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::from_config(ClientConfig::from_env()?))
    }

    /// Create a builder seeded with an existing configuration.
    pub fn from_config(config: ClientConfig) -> Self {
        Self {
            base: Some(config),
            ..Self::default()
        }
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Base socket path; replicas append their index to it.
    pub fn with_server_address(mut self, address: impl Into<PathBuf>) -> Self {
        self.server_address = Some(address.into());
        self
    }

    pub fn with_agent_tag(mut self, tag: impl Into<String>) -> Self {
        self.agent_tag = Some(tag.into());
        self
    }

    /// Shorthand for [`ErrorMode::Raise`] or [`ErrorMode::Suppress`].
    pub fn with_raise_errors(self, raise: bool) -> Self {
        self.with_error_mode(ErrorMode::from_raise_flag(raise))
    }

    option_setter!(
        #[doc = "Set the number of agent replicas."]
        with_server_replicas,
        server_replicas,
        usize
    );
    option_setter!(with_error_mode, error_mode, ErrorMode);
    option_setter!(
        #[doc = "Switch the client's own logging on or off."]
        with_logging_enabled,
        logging_enabled,
        bool
    );
    option_setter!(with_log_level, log_level, LogLevel);
    option_setter!(with_write_timeout_ms, write_timeout_ms, u64);

    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(replicas) = self.server_replicas {
            ensure_positive!(replicas, "server_replicas")?;
        }
        if let Some(timeout) = self.write_timeout_ms {
            ensure_positive!(timeout, "write_timeout_ms")?;
        }
        Ok(())
    }

    /// Resolve the final configuration without constructing a client.
    pub fn build_config(&self) -> Result<ClientConfig, ConfigError> {
        self.validate()?;
        let mut config = self.base.clone().unwrap_or_default();
        self.apply_optional_fields(&mut config);
        config.validate()?;
        Ok(config)
    }

    fn apply_optional_fields(&self, config: &mut ClientConfig) {
        if let Some(user_id) = &self.user_id {
            config.user_id = Some(user_id.clone());
        }
        if let Some(address) = &self.server_address {
            config.server_address = address.clone();
        }
        if let Some(replicas) = self.server_replicas {
            config.server_replicas = replicas;
        }
        if let Some(tag) = &self.agent_tag {
            config.agent_tag = tag.clone();
        }
        if let Some(mode) = self.error_mode {
            config.error_mode = mode;
        }
        if let Some(enabled) = self.logging_enabled {
            config.logging.enabled = enabled;
        }
        if let Some(level) = self.log_level {
            config.logging.level = level;
        }
        if let Some(ms) = self.write_timeout_ms {
            config.write_timeout = Some(Duration::from_millis(ms));
        }
    }

    /// Build a client talking to the configured Unix socket replicas.
    pub fn build(&self) -> Result<UdsClient, ConfigError> {
        UdsClient::new(self.build_config()?)
    }

    /// Build a client delivering through a caller supplied transport.
    pub fn build_with_transport<T: Transport>(
        &self,
        transport: T,
    ) -> Result<UdsClient<T>, ConfigError> {
        UdsClient::with_transport(self.build_config()?, transport)
    }
}
