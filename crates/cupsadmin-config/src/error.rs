//! Error types for configuration document operations.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Primary error type for configuration document operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Field key did not name an editable field.
    #[error("unknown configuration field '{key}'")]
    UnknownField {
        /// Key supplied by the caller.
        key: String,
    },
    /// Field value could not be converted to the field's type.
    #[error("invalid value '{value}' for '{field}': {reason}")]
    InvalidValue {
        /// Key of the field being edited.
        field: String,
        /// Offending value.
        value: String,
        /// Machine-readable reason for the failure.
        reason: &'static str,
    },
    /// A `KEY=VALUE` assignment was missing its separator.
    #[error("malformed assignment '{input}': expected KEY=VALUE")]
    MalformedAssignment {
        /// Raw assignment text.
        input: String,
    },
    /// Serialising a value to JSON failed.
    #[error("failed to serialise {what}")]
    Serialize {
        /// Description of the value being serialised.
        what: &'static str,
        /// Source serde error.
        source: serde_json::Error,
    },
    /// File system operation failed.
    #[error("filesystem operation '{operation}' failed for {}", .path.display())]
    Io {
        /// Operation identifier.
        operation: &'static str,
        /// Path involved in the operation.
        path: PathBuf,
        /// Source IO error.
        source: io::Error,
    },
}

impl ConfigError {
    /// Whether the error stems from caller input rather than the environment.
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownField { .. } | Self::InvalidValue { .. } | Self::MalformedAssignment { .. }
        )
    }
}

/// Convenience alias for configuration results.
pub type ConfigResult<T> = Result<T, ConfigError>;
