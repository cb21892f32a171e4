//! Error types for shacklog.
//!
//! This module defines all error types used throughout the shacklog crate.
//! Field validation errors are reported to the operator and are never fatal;
//! they block a single submission, not the process.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for shacklog operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Log File Errors ===
    /// Failed to create the log file.
    #[error("failed to create log file {path}: {source}")]
    LogCreate {
        /// Path to the log file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to append a record to the log file.
    #[error("failed to append to log file {path}: {source}")]
    LogAppend {
        /// Path to the log file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Entry Errors ===
    /// A field value failed validation.
    #[error("invalid {field}: {message}")]
    InvalidField {
        /// ADIF name of the offending field.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// A required field was left empty at submission.
    #[error("missing required field {field}")]
    MissingField {
        /// ADIF name of the missing field.
        field: String,
    },

    /// A field name not present on the entry form.
    #[error("unknown field {field}")]
    UnknownField {
        /// The unrecognized field name.
        field: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for shacklog operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a field validation error.
    #[must_use]
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a missing required field error.
    #[must_use]
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create an unknown field error.
    #[must_use]
    pub fn unknown_field(field: impl Into<String>) -> Self {
        Self::UnknownField {
            field: field.into(),
        }
    }

    /// Check if this error is an entry validation problem.
    ///
    /// Validation problems are reported to the operator and block a single
    /// submission; they never terminate the session.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidField { .. } | Self::MissingField { .. } | Self::UnknownField { .. }
        )
    }
}
