//! Structural paths to attributes inside a resource tree.
//!
//! Paths are attached to every validation error so the caller can surface a
//! diagnostic on the precise attribute, e.g. `flow_server[1].hostname`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One step of an [`AttributePath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathStep {
    /// A named attribute or block.
    Name(String),
    /// Position inside a list of blocks.
    Index(usize),
}

/// Path from the resource root to an attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributePath {
    steps: Vec<PathStep>,
}

impl AttributePath {
    /// The resource root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Path starting at a top-level attribute.
    pub fn name(name: impl Into<String>) -> Self {
        Self::root().at_name(name)
    }

    pub fn at_name(&self, name: impl Into<String>) -> Self {
        let mut steps = self.steps.clone();
        steps.push(PathStep::Name(name.into()));
        Self { steps }
    }

    pub fn at_index(&self, index: usize) -> Self {
        let mut steps = self.steps.clone();
        steps.push(PathStep::Index(index));
        Self { steps }
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    /// The last named step, if any.
    pub fn last_name(&self) -> Option<&str> {
        self.steps.iter().rev().find_map(|s| match s {
            PathStep::Name(n) => Some(n.as_str()),
            PathStep::Index(_) => None,
        })
    }
}

impl fmt::Display for AttributePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.steps.is_empty() {
            return write!(f, "<root>");
        }
        for (i, step) in self.steps.iter().enumerate() {
            match step {
                PathStep::Name(name) if i == 0 => write!(f, "{}", name)?,
                PathStep::Name(name) => write!(f, ".{}", name)?,
                PathStep::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}
