//! Configuration errors
//!
//! Shared by the tuning and settings loaders. The simulation itself has no
//! fatal errors; refused throws use `sim::InvalidThrow`.

use std::fmt;

/// Why a configuration file was rejected
#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read
    Io(std::io::Error),
    /// The file is not valid JSON for the expected type
    Parse(serde_json::Error),
    /// A tuning field holds a value the simulation cannot run with
    OutOfRange {
        field: &'static str,
        value: f32,
    },
    /// A settings field (rink size) is unusable
    InvalidSetting {
        field: &'static str,
        value: f32,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "failed to read config: {e}"),
            ConfigError::Parse(e) => write!(f, "failed to parse config: {e}"),
            ConfigError::OutOfRange { field, value } => {
                write!(f, "tuning field `{field}` out of range: {value}")
            }
            ConfigError::InvalidSetting { field, value } => {
                write!(f, "setting `{field}` must be positive and finite, got {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::OutOfRange { .. } | ConfigError::InvalidSetting { .. } => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}
