//! User-facing diagnostics.
//!
//! Validation violations and operation failures are reported as diagnostics
//! attached to an attribute path when one is known.

use crate::error::Error;
use crate::transcoder::{AttributePath, TranscodeError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// One reported problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Short title.
    pub summary: String,
    /// Full message.
    pub detail: String,
    /// Offending attribute, for field-level reporting.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute: Option<AttributePath>,
}

impl Diagnostic {
    pub fn error(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            summary: summary.into(),
            detail: detail.into(),
            attribute: None,
        }
    }

    pub fn warning(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(summary, detail)
        }
    }

    pub fn with_attribute(mut self, path: AttributePath) -> Self {
        self.attribute = Some(path);
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.severity, self.summary, self.detail)?;
        if let Some(path) = &self.attribute {
            write!(f, " (at {})", path)?;
        }
        Ok(())
    }
}

impl From<&TranscodeError> for Diagnostic {
    fn from(e: &TranscodeError) -> Self {
        let diagnostic = Diagnostic::error(e.summary(), e.to_string());
        match e.path() {
            Some(path) => diagnostic.with_attribute(path.clone()),
            None => diagnostic,
        }
    }
}

impl From<&Error> for Diagnostic {
    fn from(e: &Error) -> Self {
        match e {
            Error::Transcode(t) => t.into(),
            Error::Session(_) => Diagnostic::error("Device Session Error", e.to_string()),
            Error::NotFound { .. } => Diagnostic::error("Not Found Error", e.to_string()),
            Error::AlreadyExists { .. } | Error::RoutingInstanceNotFound(_) => {
                Diagnostic::error("Pre Check Error", e.to_string())
            }
            Error::InvalidId { .. } => Diagnostic::error("Bad Import Id Error", e.to_string()),
            _ => Diagnostic::error("Error", e.to_string()),
        }
    }
}

/// Ordered diagnostic list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.items.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.items.iter().any(|d| d.severity == Severity::Error)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.items.iter()
    }
}

impl FromIterator<Diagnostic> for Diagnostics {
    fn from_iter<I: IntoIterator<Item = Diagnostic>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<&'a TranscodeError> for Diagnostics {
    fn from_iter<I: IntoIterator<Item = &'a TranscodeError>>(iter: I) -> Self {
        iter.into_iter().map(Diagnostic::from).collect()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
