//! Decode command - parse `display set relative` output into state

use super::{read_input, CommandContext};
use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};
use tfjunos::lifecycle::Resource;
use tfjunos::resources::ResourceKind;
use tfjunos::transcoder;

/// Arguments for the decode command
#[derive(Parser, Debug, Clone)]
pub struct DecodeArgs {
    /// Resource type
    #[arg(value_enum)]
    pub kind: ResourceKind,

    /// Resource id, in the import format of the type
    pub id: String,

    /// Command output to decode (`-` for stdin)
    #[arg(default_value = "-")]
    pub input: PathBuf,
}

impl DecodeArgs {
    pub async fn execute(&self, ctx: &mut CommandContext) -> Result<i32> {
        with_resource!(self.kind, decode(ctx, &self.id, &self.input))
    }
}

fn decode<R: Resource>(ctx: &CommandContext, id: &str, input: &Path) -> Result<i32> {
    let mut tree = R::from_import_id(id)?;
    let output = read_input(input)?;
    if transcoder::is_empty_output(&output) {
        ctx.output
            .warning(&format!("no configuration lines for {} {}", R::TYPE_NAME, id));
    }
    let prefix = tree.set_prefix();
    transcoder::decode_into(&mut tree, &output, &prefix).map_err(tfjunos::Error::from)?;
    ctx.output.json(&tree)?;
    Ok(0)
}
