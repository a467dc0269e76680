//! Outcome reporting for the export boundary.

use std::fmt;

use crate::{error::ExportError, level::LogLevel};

use super::config::LoggingConfig;

/// Target used for every message the client logs.
pub const LOG_TARGET: &str = "mona_uds_client";

/// How export failures reach the caller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ErrorMode {
    /// Failures are logged and reported as `Ok(false)`.
    #[default]
    Suppress,
    /// Failures are logged and returned as typed errors.
    Raise,
}

impl ErrorMode {
    pub fn from_raise_flag(raise: bool) -> Self {
        if raise { Self::Raise } else { Self::Suppress }
    }

    /// Convert a typed outcome into the caller-facing result.
    ///
    /// Each failure produces exactly one of `Ok(false)` or `Err(_)`.
    pub fn report(self, outcome: Result<(), ExportError>) -> Result<bool, ExportError> {
        match (outcome, self) {
            (Ok(()), _) => Ok(true),
            (Err(err), ErrorMode::Raise) => Err(err),
            (Err(_), ErrorMode::Suppress) => Ok(false),
        }
    }
}

/// Applies the client's suppression switch and threshold before handing
/// messages to the `log` facade.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ExportLog {
    config: LoggingConfig,
}

impl ExportLog {
    pub(crate) fn new(config: LoggingConfig) -> Self {
        Self { config }
    }

    pub(crate) fn enabled(&self, level: LogLevel) -> bool {
        self.config.enabled && self.config.level.admits(level)
    }

    pub(crate) fn emit(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        if self.enabled(level) {
            log::log!(target: LOG_TARGET, level.as_log_level(), "{args}");
        }
    }

    pub(crate) fn warn(&self, args: fmt::Arguments<'_>) {
        self.emit(LogLevel::Warning, args);
    }

    pub(crate) fn info(&self, args: fmt::Arguments<'_>) {
        self.emit(LogLevel::Info, args);
    }
}
