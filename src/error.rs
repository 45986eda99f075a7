//! Error types for tfjunos.
//!
//! Each layer has its own error enum; [`Error`] is what the lifecycle driver
//! and the command-line front end deal with.

use crate::session::SessionError;
use crate::transcoder::TranscodeError;
use thiserror::Error;

/// Result type alias for tfjunos operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for tfjunos.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Configuration Tree Errors
    // ========================================================================
    /// Validation, encode or decode failure.
    #[error(transparent)]
    Transcode(#[from] TranscodeError),

    // ========================================================================
    // Device Errors
    // ========================================================================
    /// Device session failure.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// The resource is absent from the device configuration.
    #[error("{resource_type} {id} {message}")]
    NotFound {
        /// Resource type name
        resource_type: String,
        /// Resource identifier
        id: String,
        /// What was expected
        message: String,
    },

    /// The resource is already present in the device configuration.
    #[error("{resource_type} {id} already exists")]
    AlreadyExists {
        /// Resource type name
        resource_type: String,
        /// Resource identifier
        id: String,
    },

    /// The qualifying routing instance does not exist.
    #[error("routing instance {0} doesn't exist")]
    RoutingInstanceNotFound(String),

    // ========================================================================
    // Input Errors
    // ========================================================================
    /// Malformed resource identifier.
    #[error("invalid id '{id}': {message}")]
    InvalidId {
        /// The rejected identifier
        id: String,
        /// Error message
        message: String,
    },

    /// Invalid tool configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// State file (de)serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Creates a new not found error.
    pub fn not_found(
        resource_type: impl Into<String>,
        id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::NotFound {
            resource_type: resource_type.into(),
            id: id.into(),
            message: message.into(),
        }
    }

    /// Creates a new already exists error.
    pub fn already_exists(resource_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::AlreadyExists {
            resource_type: resource_type.into(),
            id: id.into(),
        }
    }

    /// Creates a new invalid id error.
    pub fn invalid_id(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidId {
            id: id.into(),
            message: message.into(),
        }
    }

    /// The transcoder error, when this is one.
    pub fn as_transcode(&self) -> Option<&TranscodeError> {
        match self {
            Error::Transcode(e) => Some(e),
            _ => None,
        }
    }

    /// Returns the error code for CLI exit status.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Transcode(e) if e.is_validation() => 2,
            Error::Session(_) => 3,
            Error::NotFound { .. } | Error::AlreadyExists { .. } => 4,
            Error::RoutingInstanceNotFound(_) => 4,
            Error::Config(_) => 5,
            _ => 1,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(e: serde_yaml::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
