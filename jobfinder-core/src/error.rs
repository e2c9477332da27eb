/// Structured error types for jobfinder-core.
///
/// Library consumers get `thiserror` enums; the `jobfinder` binary wraps
/// them in `anyhow` for reporting.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for jobfinder-core operations
#[derive(Error, Debug)]
pub enum JobfinderError {
    /// I/O operation failed
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    /// JSON parsing or serialization failed
    #[error("JSON error at {context}: {source}")]
    Json {
        context: String,
        source: serde_json::Error,
    },

    /// Config file could not be parsed
    #[error("Invalid config file {path:?}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// Config value was present but unusable
    #[error("Configuration error: {reason}")]
    Config { reason: String },

    /// Stored or supplied student level is not one of the known values
    #[error("Unknown student level '{value}'")]
    UnknownStudentLevel { value: String },
}

/// Result type alias for jobfinder-core operations
pub type Result<T> = std::result::Result<T, JobfinderError>;

impl JobfinderError {
    /// Create a JSON error with context
    pub fn json(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            context: context.into(),
            source,
        }
    }

    /// Create a config parse error
    pub fn config_parse(path: impl Into<PathBuf>, source: toml::de::Error) -> Self {
        Self::ConfigParse {
            path: path.into(),
            source,
        }
    }

    /// Create a config error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }

    /// Create an unknown student level error
    pub fn unknown_student_level(value: impl Into<String>) -> Self {
        Self::UnknownStudentLevel {
            value: value.into(),
        }
    }
}
