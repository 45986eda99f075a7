//! Validate command - report every rule violation of a state

use super::{load_state, CommandContext};
use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};
use tfjunos::lifecycle::{self, Resource};
use tfjunos::resources::ResourceKind;

/// Arguments for the validate command
#[derive(Parser, Debug, Clone)]
pub struct ValidateArgs {
    /// Resource type
    #[arg(value_enum)]
    pub kind: ResourceKind,

    /// State file (JSON or YAML)
    pub state: PathBuf,
}

impl ValidateArgs {
    pub async fn execute(&self, ctx: &mut CommandContext) -> Result<i32> {
        with_resource!(self.kind, validate(ctx, &self.state))
    }
}

fn validate<R: Resource>(ctx: &CommandContext, state: &Path) -> Result<i32> {
    let tree: R = load_state(state)?;
    let diagnostics = lifecycle::validate(&tree);
    ctx.output.diagnostics(&diagnostics)?;

    if diagnostics.has_errors() {
        return Ok(1);
    }
    if !ctx.output.is_json() {
        ctx.output
            .success(&format!("{} {} is valid", R::TYPE_NAME, tree.id()));
    }
    Ok(0)
}
