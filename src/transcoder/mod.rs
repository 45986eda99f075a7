//! Config-line transcoder.
//!
//! Converts typed attribute trees into ordered `set` lines and parses
//! `show configuration ... | display set relative` output back into trees.
//! Every tree node implements [`Transcode`]; repeatable identifier-keyed
//! children live in [`Blocks`].
//!
//! ```
//! use tfjunos::resources::LldpInterface;
//! use tfjunos::transcoder;
//!
//! let tree = LldpInterface { disable: true, ..LldpInterface::named("ge-0/0/1") };
//! let lines = transcoder::encode(&tree, "set protocols lldp interface \"ge-0/0/1\" ").unwrap();
//! assert_eq!(lines, vec!["set protocols lldp interface \"ge-0/0/1\" disable"]);
//! ```

pub mod attr;
pub mod block;
pub mod checks;
pub mod dispatch;
pub mod error;
pub mod line;
pub mod path;
pub mod registry;

pub use attr::Attr;
pub use block::{Block, Blocks};
pub use checks::{CheckMode, Checks};
pub use dispatch::{Dispatch, Handler, Keyword};
pub use error::{TranscodeError, TranscodeResult};
pub use line::SetWriter;
pub use path::{AttributePath, PathStep};
pub use registry::IdentifierRegistry;

use tracing::trace;

/// Command used to read a configuration subtree.
pub const SHOW_CONFIG: &str = "show configuration ";

/// Output filter producing `set` lines relative to the shown subtree.
pub const PIPE_DISPLAY_SET_RELATIVE: &str = " | display set relative";

/// Separator joining the parts of composite resource identifiers.
pub const ID_SEPARATOR: &str = "_-_";

/// Start marker of the framing around a command reply.
pub const XML_START_COMMAND: &str = "<configuration-output>";

/// End marker of the framing around a command reply.
pub const XML_END_COMMAND: &str = "</configuration-output>";

/// A node of an attribute tree.
pub trait Transcode {
    /// Evaluate cross-field rules of this node and its children.
    fn check(&self, path: &AttributePath, checks: &mut Checks) -> TranscodeResult<()>;

    /// Write the node's lines in declared field order.
    fn encode(&self, w: &mut SetWriter<'_>, path: &AttributePath) -> TranscodeResult<()>;

    /// Decode one line relative to this node.
    ///
    /// Returns `Ok(false)` when the line is not recognised.
    fn decode_line(&mut self, line: &str) -> TranscodeResult<bool>;
}

/// Encode `tree` under `prefix`.
///
/// Rules are checked first; the first violation aborts the pass.
pub fn encode<T: Transcode>(tree: &T, prefix: &str) -> TranscodeResult<Vec<String>> {
    let root = AttributePath::root();
    tree.check(&root, &mut Checks::fail_fast())?;

    let mut lines = Vec::new();
    let mut w = SetWriter::new(prefix, &mut lines);
    tree.encode(&mut w, &root)?;
    Ok(lines)
}

/// Every rule violation in `tree`, in walk order.
pub fn validate<T: Transcode>(tree: &T) -> Vec<TranscodeError> {
    let mut checks = Checks::collect();
    // Collect mode never returns an error.
    let _ = tree.check(&AttributePath::root(), &mut checks);
    checks.into_errors()
}

/// Decode command output into a fresh tree.
pub fn decode<T: Transcode + Default>(output: &str, prefix: &str) -> TranscodeResult<T> {
    let mut tree = T::default();
    decode_into(&mut tree, output, prefix)?;
    Ok(tree)
}

/// Decode command output into an existing tree.
///
/// Accepts both relative output and absolute lines starting with `prefix`.
/// Unknown lines are skipped.
pub fn decode_into<T: Transcode>(tree: &mut T, output: &str, prefix: &str) -> TranscodeResult<()> {
    let absolute = prefix.strip_prefix(line::SET_LS).unwrap_or(prefix);
    let unquoted = absolute.replace('"', "");

    for raw in output.lines() {
        if raw.contains(XML_START_COMMAND) {
            continue;
        }
        if raw.contains(XML_END_COMMAND) {
            break;
        }
        let Some(item) = raw.trim_end().strip_prefix(line::SET_LS) else {
            continue;
        };
        let item = strip_absolute(item, absolute, &unquoted);
        if item.is_empty() {
            continue;
        }
        let matched = tree.decode_line(item).map_err(|e| e.in_line(raw.trim()))?;
        if !matched {
            trace!(line = %raw.trim(), "skipping unknown configuration line");
        }
    }
    Ok(())
}

/// Encode an optional single nested block under `<keyword> `.
pub fn encode_optional<T: Transcode>(
    w: &mut SetWriter<'_>,
    keyword: &str,
    block: Option<&T>,
    path: &AttributePath,
) -> TranscodeResult<()> {
    if let Some(block) = block {
        let mut nested = w.nested(format!("{} ", keyword));
        block.encode(&mut nested, path)?;
    }
    Ok(())
}

/// Check an optional single nested block.
pub fn check_optional<T: Transcode>(
    block: Option<&T>,
    path: &AttributePath,
    checks: &mut Checks,
) -> TranscodeResult<()> {
    match block {
        Some(block) => block.check(path, checks),
        None => Ok(()),
    }
}

/// Decode a line into an optional single nested block.
///
/// The block is only created when the line is recognised.
pub fn decode_optional<T: Transcode + Default>(
    slot: &mut Option<T>,
    line: &str,
) -> TranscodeResult<()> {
    let existed = slot.is_some();
    let mut child = slot.take().unwrap_or_default();
    let matched = child.decode_line(line)?;
    if matched || existed {
        *slot = Some(child);
    }
    Ok(())
}

fn strip_absolute<'l>(item: &'l str, absolute: &str, unquoted: &str) -> &'l str {
    if absolute.is_empty() {
        return item;
    }
    item.strip_prefix(absolute)
        .or_else(|| item.strip_prefix(unquoted))
        .unwrap_or(item)
}

/// True when a command reply carries no configuration line.
pub fn is_empty_output(output: &str) -> bool {
    output
        .lines()
        .map(str::trim)
        .all(|l| l.is_empty() || l.contains(XML_START_COMMAND) || l.contains(XML_END_COMMAND))
}
