//! Severity levels for the logging subsystem.
//!
//! A totally ordered threshold: a message is emitted iff its level is at
//! least the logger's level. `Off` sits above everything and is only ever
//! used as a threshold, never as a message level.

use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Ordered severity level.
///
/// The lowercase string form (`"trace"` .. `"off"`) is the external
/// representation used in log lines and in the settings file; `as_str` and
/// `FromStr` round-trip for every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Critical,
    /// Suppresses all output when used as a threshold
    Off,
}

impl Level {
    /// All levels, in ascending severity order
    pub const ALL: [Level; 7] = [
        Level::Trace,
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::Critical,
        Level::Off,
    ];

    /// The lowercase string form used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Critical => "critical",
            Level::Off => "off",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = CoreError;

    /// Parse the string form, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Ok(Level::Trace),
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warn" => Ok(Level::Warn),
            "error" => Ok(Level::Error),
            "critical" => Ok(Level::Critical),
            "off" => Ok(Level::Off),
            other => Err(CoreError::InvalidArgument(format!(
                "unknown log level: {}",
                other
            ))),
        }
    }
}
