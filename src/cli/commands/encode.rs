//! Encode command - print the set lines of a resource state

use super::{load_state, CommandContext};
use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};
use tfjunos::lifecycle::{self, Resource};
use tfjunos::resources::ResourceKind;

/// Arguments for the encode command
#[derive(Parser, Debug, Clone)]
pub struct EncodeArgs {
    /// Resource type
    #[arg(value_enum)]
    pub kind: ResourceKind,

    /// State file (JSON or YAML)
    pub state: PathBuf,
}

impl EncodeArgs {
    pub async fn execute(&self, ctx: &mut CommandContext) -> Result<i32> {
        with_resource!(self.kind, encode(ctx, &self.state))
    }
}

fn encode<R: Resource>(ctx: &CommandContext, state: &Path) -> Result<i32> {
    let tree: R = load_state(state)?;
    let lines = lifecycle::set_lines(&tree).map_err(tfjunos::Error::from)?;
    ctx.output.info(&format!(
        "{} lines for {} {}",
        lines.len(),
        R::TYPE_NAME,
        tree.id()
    ));
    ctx.output.lines(&lines)?;
    Ok(0)
}
