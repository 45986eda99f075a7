//! Per-parent duplicate detection for nested block identifiers.

use super::error::{TranscodeError, TranscodeResult};
use super::path::AttributePath;
use indexmap::{IndexMap, IndexSet};

/// Identifiers seen so far under one parent, per block type.
///
/// A registry is created for a single encode or validate pass over one parent
/// and dropped afterwards. Sibling parents each get their own registry.
#[derive(Debug, Default)]
pub struct IdentifierRegistry {
    seen: IndexMap<String, IndexSet<String>>,
}

impl IdentifierRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `identifier` for `block_type`.
    ///
    /// Fails with [`TranscodeError::Duplicate`] carrying `path` when the same
    /// identifier was already registered for this block type.
    pub fn register(
        &mut self,
        block_type: &str,
        identifier: &str,
        path: &AttributePath,
    ) -> TranscodeResult<()> {
        let ids = self.seen.entry(block_type.to_string()).or_default();
        if !ids.insert(identifier.to_string()) {
            return Err(TranscodeError::Duplicate {
                path: path.clone(),
                block: block_type.to_string(),
                identifier: identifier.to_string(),
            });
        }
        Ok(())
    }
}
