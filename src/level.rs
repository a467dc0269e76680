//! Verbosity levels accepted by the client's logging gate.
//!
//! Level names follow the spelling used by `MONA_LOGGING_LEVEL` so existing
//! deployments keep working: `DEBUG`, `INFO`, `WARNING`, `ERROR` and
//! `CRITICAL`, plus the numeric equivalents `10` to `50`.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl Default for LogLevel {
    fn default() -> Self {
        Self::Warning
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Critical => "CRITICAL",
        };
        f.write_str(s)
    }
}

/// Returned when a level name cannot be recognised.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown logging level: {0}")]
pub struct ParseLevelError(pub String);

impl FromStr for LogLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TRACE" | "5" => Ok(Self::Trace),
            "DEBUG" | "10" => Ok(Self::Debug),
            "INFO" | "20" => Ok(Self::Info),
            "WARN" | "WARNING" | "30" => Ok(Self::Warning),
            "ERROR" | "40" => Ok(Self::Error),
            "CRITICAL" | "FATAL" | "50" => Ok(Self::Critical),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Map onto the `log` facade. `log` has no critical level, so
    /// `Critical` shares `Error`.
    pub fn as_log_level(self) -> log::Level {
        match self {
            LogLevel::Trace => log::Level::Trace,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Info => log::Level::Info,
            LogLevel::Warning => log::Level::Warn,
            LogLevel::Error | LogLevel::Critical => log::Level::Error,
        }
    }

    /// Whether a message at `level` passes a threshold of `self`.
    pub fn admits(self, level: LogLevel) -> bool {
        level >= self
    }
}
