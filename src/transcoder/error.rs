//! Transcoder error types.

use super::path::AttributePath;
use thiserror::Error;

/// Errors raised while validating, encoding or decoding an attribute tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranscodeError {
    /// Two sibling blocks share an identifier.
    #[error("multiple blocks {block} with the same identifier \"{identifier}\"")]
    Duplicate {
        /// Path to the identifier attribute of the later occurrence
        path: AttributePath,
        /// Block keyword (e.g. `flow-server`)
        block: String,
        /// The repeated identifier
        identifier: String,
    },

    /// An attribute is set without another one it depends on.
    #[error("{attribute} must be specified with {requires}")]
    MissingDependency {
        path: AttributePath,
        attribute: String,
        requires: String,
    },

    /// Two mutually exclusive attributes are both set.
    #[error("{attribute} and {conflicts_with} cannot be configured together")]
    Conflict {
        path: AttributePath,
        attribute: String,
        conflicts_with: String,
    },

    /// A block is declared but nothing inside it is set.
    #[error("{block} block is empty")]
    EmptyBlock { path: AttributePath, block: String },

    /// A value is not acceptable for its attribute.
    #[error("{attribute}: {message}")]
    InvalidValue {
        path: AttributePath,
        attribute: String,
        message: String,
    },

    /// A value read back from the device could not be parsed.
    #[error("failed to parse line '{line}': {message}")]
    Parse { line: String, message: String },
}

impl TranscodeError {
    /// Attribute path of the offending attribute, for field-level diagnostics.
    pub fn path(&self) -> Option<&AttributePath> {
        match self {
            TranscodeError::Duplicate { path, .. }
            | TranscodeError::MissingDependency { path, .. }
            | TranscodeError::Conflict { path, .. }
            | TranscodeError::EmptyBlock { path, .. }
            | TranscodeError::InvalidValue { path, .. } => Some(path),
            TranscodeError::Parse { .. } => None,
        }
    }

    /// True for structural configuration errors (as opposed to read failures).
    pub fn is_validation(&self) -> bool {
        !matches!(self, TranscodeError::Parse { .. })
    }

    /// Short summary used as diagnostic title.
    pub fn summary(&self) -> &'static str {
        match self {
            TranscodeError::Duplicate { .. } => "Duplicate Configuration Error",
            TranscodeError::MissingDependency { .. } => "Missing Configuration Error",
            TranscodeError::Conflict { .. } => "Conflict Configuration Error",
            TranscodeError::EmptyBlock { .. } => "Empty Block Configuration Error",
            TranscodeError::InvalidValue { .. } => "Bad Value Configuration Error",
            TranscodeError::Parse { .. } => "Read Error",
        }
    }

    pub(crate) fn parse(value: &str, message: impl Into<String>) -> Self {
        TranscodeError::Parse {
            line: value.to_string(),
            message: message.into(),
        }
    }

    /// Replace the line carried by a parse error with the full source line.
    pub(crate) fn in_line(self, full_line: &str) -> Self {
        match self {
            TranscodeError::Parse { message, .. } => TranscodeError::Parse {
                line: full_line.to_string(),
                message,
            },
            other => other,
        }
    }
}

/// Result type for transcoder operations.
pub type TranscodeResult<T> = Result<T, TranscodeError>;
