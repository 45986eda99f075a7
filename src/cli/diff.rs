//! Colorized unified diff of set lines, using the similar crate.

use colored::Colorize;
use serde::Serialize;
use similar::{ChangeTag, DiffOp, TextDiff};

/// Hunk range as (old_start, old_len, new_start, new_len), 1-based for display
fn hunk_ranges(ops: &[DiffOp]) -> (usize, usize, usize, usize) {
    let (Some(first), Some(last)) = (ops.first(), ops.last()) else {
        return (1, 0, 1, 0);
    };
    let old_start = first.old_range().start;
    let new_start = first.new_range().start;
    let old_len = last.old_range().end.saturating_sub(old_start);
    let new_len = last.new_range().end.saturating_sub(new_start);
    (old_start + 1, old_len, new_start + 1, new_len)
}

/// Diff display options
#[derive(Debug, Clone)]
pub struct DiffOptions {
    /// Number of context lines to show
    pub context_lines: usize,
    /// Use colors
    pub use_color: bool,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            context_lines: 3,
            use_color: true,
        }
    }
}

/// Lines only present on one side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LineChanges {
    pub removed: Vec<String>,
    pub added: Vec<String>,
}

impl LineChanges {
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.added.is_empty()
    }
}

/// Set-line diff generator
#[derive(Debug, Clone, Default)]
pub struct LineDiff {
    options: DiffOptions,
}

impl LineDiff {
    pub fn with_options(options: DiffOptions) -> Self {
        Self { options }
    }

    /// Unified diff between two line lists; empty when they are equal
    pub fn unified(&self, old: &[String], new: &[String], old_name: &str, new_name: &str) -> String {
        let old_text = join(old);
        let new_text = join(new);
        let diff = TextDiff::from_lines(&old_text, &new_text);
        if diff.ratio() >= 1.0 {
            return String::new();
        }

        let mut output = String::new();
        self.push(&mut output, format!("--- {}\n", old_name), Style::Removed);
        self.push(&mut output, format!("+++ {}\n", new_name), Style::Added);

        for hunk in diff
            .unified_diff()
            .context_radius(self.options.context_lines)
            .iter_hunks()
        {
            let (old_start, old_len, new_start, new_len) = hunk_ranges(hunk.ops());
            let header = format!(
                "@@ -{},{} +{},{} @@\n",
                old_start, old_len, new_start, new_len
            );
            self.push(&mut output, header, Style::Header);

            for change in hunk.iter_changes() {
                let (sign, style) = match change.tag() {
                    ChangeTag::Delete => ('-', Style::Removed),
                    ChangeTag::Insert => ('+', Style::Added),
                    ChangeTag::Equal => (' ', Style::Context),
                };
                self.push(&mut output, format!("{}{}", sign, change.value()), style);
            }
        }
        output
    }

    /// Removed and added lines, in order
    pub fn changes(old: &[String], new: &[String]) -> LineChanges {
        let old_text = join(old);
        let new_text = join(new);
        let diff = TextDiff::from_lines(&old_text, &new_text);

        let mut changes = LineChanges::default();
        for change in diff.iter_all_changes() {
            let line = change.value().trim_end_matches('\n').to_string();
            match change.tag() {
                ChangeTag::Delete => changes.removed.push(line),
                ChangeTag::Insert => changes.added.push(line),
                ChangeTag::Equal => {}
            }
        }
        changes
    }

    fn push(&self, output: &mut String, text: String, style: Style) {
        if !self.options.use_color {
            output.push_str(&text);
            return;
        }
        // color the line body only so the newline stays outside the escape codes
        let body = text.trim_end_matches('\n');
        let colored = match style {
            Style::Removed => body.red(),
            Style::Added => body.green(),
            Style::Header => body.cyan(),
            Style::Context => body.dimmed(),
        };
        output.push_str(&colored.to_string());
        output.push('\n');
    }
}

#[derive(Debug, Clone, Copy)]
enum Style {
    Removed,
    Added,
    Header,
    Context,
}

fn join(lines: &[String]) -> String {
    lines.iter().map(|l| format!("{}\n", l)).collect()
}
