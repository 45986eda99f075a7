//! Identifier-keyed repeatable nested blocks.

use super::checks::Checks;
use super::error::TranscodeResult;
use super::line::{split_identifier, SetWriter};
use super::path::AttributePath;
use super::registry::IdentifierRegistry;
use super::Transcode;
use serde::{Deserialize, Serialize};

/// A repeatable sub-tree identified by one field.
pub trait Block: Transcode + Default {
    /// Configuration keyword introducing the block (e.g. `flow-server`).
    const KEYWORD: &'static str;
    /// Schema name of the identifier attribute (e.g. `hostname`).
    const ID_ATTR: &'static str;

    fn identifier(&self) -> &str;

    fn with_identifier(identifier: &str) -> Self;
}

/// Ordered collection of nested blocks.
///
/// Order is insertion order, both when encoding and when decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Blocks<B> {
    items: Vec<B>,
}

impl<B> Default for Blocks<B> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<B> From<Vec<B>> for Blocks<B> {
    fn from(items: Vec<B>) -> Self {
        Self { items }
    }
}

impl<B: Block> Blocks<B> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, block: B) {
        self.items.push(block);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, B> {
        self.items.iter()
    }

    pub fn get(&self, index: usize) -> Option<&B> {
        self.items.get(index)
    }

    /// Block to decode into for `identifier`.
    ///
    /// Reuses the last block when it carries the same identifier, otherwise
    /// appends a new one. Lines of one block are expected to be contiguous.
    pub fn find_or_append(&mut self, identifier: &str) -> &mut B {
        let reuse = self
            .items
            .last()
            .is_some_and(|last| last.identifier() == identifier);
        if !reuse {
            self.items.push(B::with_identifier(identifier));
        }
        let last = self.items.len() - 1;
        &mut self.items[last]
    }

    /// Decode the part of a line following `KEYWORD `.
    pub fn decode_line(&mut self, rest: &str) -> TranscodeResult<()> {
        let (identifier, remainder) = split_identifier(rest);
        let block = self.find_or_append(identifier);
        if !remainder.is_empty() {
            block.decode_line(remainder)?;
        }
        Ok(())
    }

    /// Encode every block under `<KEYWORD> "<identifier>" `.
    ///
    /// Stops at the first identifier already used by an earlier sibling.
    pub fn encode(&self, w: &mut SetWriter<'_>, path: &AttributePath) -> TranscodeResult<()> {
        let mut registry = IdentifierRegistry::new();
        for (i, block) in self.items.iter().enumerate() {
            let item_path = path.at_index(i);
            registry.register(
                B::KEYWORD,
                block.identifier(),
                &item_path.at_name(B::ID_ATTR),
            )?;
            let mut bw = w.block(B::KEYWORD, block.identifier());
            let before = bw.written();
            block.encode(&mut bw, &item_path)?;
            if bw.written() == before {
                bw.stanza();
            }
        }
        Ok(())
    }

    /// Check identifiers and the rules of every block.
    ///
    /// Identifiers must be non-empty, quotable and unique among siblings.
    pub fn check(&self, path: &AttributePath, checks: &mut Checks) -> TranscodeResult<()> {
        let mut registry = IdentifierRegistry::new();
        for (i, block) in self.items.iter().enumerate() {
            let item_path = path.at_index(i);
            checks.present(&item_path, B::ID_ATTR, block.identifier())?;
            if let Err(duplicate) = registry.register(
                B::KEYWORD,
                block.identifier(),
                &item_path.at_name(B::ID_ATTR),
            ) {
                checks.report(duplicate)?;
            }
            block.check(&item_path, checks)?;
        }
        Ok(())
    }
}

impl<'a, B> IntoIterator for &'a Blocks<B> {
    type Item = &'a B;
    type IntoIter = std::slice::Iter<'a, B>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<B> FromIterator<B> for Blocks<B> {
    fn from_iter<I: IntoIterator<Item = B>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
