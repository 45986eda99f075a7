//! Ordered keyword dispatch for decoding.
//!
//! Each tree type declares a static slice of [`Keyword`] entries. Decoding a
//! line tries the entries in declaration order and hands the remainder of the
//! line to the first matching handler. Entries with a longer keyword must be
//! declared before shorter keywords they extend; [`Dispatch::shadowed`]
//! reports violations so every table can be checked by a test.

use super::error::TranscodeResult;
use std::fmt;

/// Decode handler: receives the tree and the line remainder after the keyword.
pub type Handler<T> = fn(&mut T, &str) -> TranscodeResult<()>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Match {
    /// Whole line equals the keyword (boolean flags).
    Exact,
    /// Line starts with the keyword (keyword carries its trailing space).
    Prefix,
}

/// One entry of a keyword table.
pub struct Keyword<T> {
    keyword: &'static str,
    matching: Match,
    handler: Handler<T>,
}

impl<T> Keyword<T> {
    /// Entry matching a line equal to `keyword`.
    pub const fn exact(keyword: &'static str, handler: Handler<T>) -> Self {
        Self {
            keyword,
            matching: Match::Exact,
            handler,
        }
    }

    /// Entry matching lines starting with `keyword` (include the trailing space).
    pub const fn prefix(keyword: &'static str, handler: Handler<T>) -> Self {
        Self {
            keyword,
            matching: Match::Prefix,
            handler,
        }
    }

    pub fn keyword(&self) -> &'static str {
        self.keyword
    }

    fn strip<'l>(&self, line: &'l str) -> Option<&'l str> {
        match self.matching {
            Match::Exact => (line == self.keyword).then_some(""),
            Match::Prefix => line.strip_prefix(self.keyword),
        }
    }

    /// True when every line matched by `other` is already taken by `self`.
    fn shadows(&self, other: &Keyword<T>) -> bool {
        match (self.matching, other.matching) {
            (Match::Prefix, _) => other.keyword.starts_with(self.keyword),
            (Match::Exact, Match::Exact) => other.keyword == self.keyword,
            (Match::Exact, Match::Prefix) => false,
        }
    }
}

impl<T> fmt::Debug for Keyword<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keyword")
            .field("keyword", &self.keyword)
            .field("matching", &self.matching)
            .finish()
    }
}

/// Dispatch over an ordered keyword table.
pub trait Dispatch<T> {
    /// Run the first matching handler. Returns `Ok(false)` when no keyword
    /// matches, which callers treat as an ignorable unknown line.
    fn dispatch(&self, target: &mut T, line: &str) -> TranscodeResult<bool>;

    /// First pair `(earlier, later)` where `later` can never match.
    fn shadowed(&self) -> Option<(&'static str, &'static str)>;
}

impl<T> Dispatch<T> for [Keyword<T>] {
    fn dispatch(&self, target: &mut T, line: &str) -> TranscodeResult<bool> {
        for entry in self {
            if let Some(rest) = entry.strip(line) {
                (entry.handler)(target, rest)?;
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn shadowed(&self) -> Option<(&'static str, &'static str)> {
        for (i, earlier) in self.iter().enumerate() {
            for later in &self[i + 1..] {
                if earlier.shadows(later) {
                    return Some((earlier.keyword, later.keyword));
                }
            }
        }
        None
    }
}
