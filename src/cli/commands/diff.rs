//! Diff command - compare the set lines of two states

use super::{load_state, CommandContext};
use crate::cli::diff::{DiffOptions, LineDiff};
use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};
use tfjunos::lifecycle::{self, Resource};
use tfjunos::resources::ResourceKind;

/// Arguments for the diff command
#[derive(Parser, Debug, Clone)]
pub struct DiffArgs {
    /// Resource type
    #[arg(value_enum)]
    pub kind: ResourceKind,

    /// Prior state file
    pub old: PathBuf,

    /// Planned state file
    pub new: PathBuf,

    /// Number of context lines
    #[arg(short = 'U', long, default_value_t = 3)]
    pub context: usize,
}

impl DiffArgs {
    pub async fn execute(&self, ctx: &mut CommandContext) -> Result<i32> {
        with_resource!(self.kind, diff(ctx, &self.old, &self.new, self.context))
    }
}

fn diff<R: Resource>(ctx: &CommandContext, old: &Path, new: &Path, context: usize) -> Result<i32> {
    let old_tree: R = load_state(old)?;
    let new_tree: R = load_state(new)?;
    let old_lines = lifecycle::set_lines(&old_tree).map_err(tfjunos::Error::from)?;
    let new_lines = lifecycle::set_lines(&new_tree).map_err(tfjunos::Error::from)?;

    if ctx.output.is_json() {
        ctx.output.json(&LineDiff::changes(&old_lines, &new_lines))?;
        return Ok(0);
    }

    let renderer = LineDiff::with_options(DiffOptions {
        context_lines: context,
        use_color: ctx.output.use_color(),
    });
    let text = renderer.unified(
        &old_lines,
        &new_lines,
        &old.display().to_string(),
        &new.display().to_string(),
    );
    if text.is_empty() {
        ctx.output.success("no changes");
    } else {
        print!("{}", text);
    }
    Ok(0)
}
