//! Apply command - create a resource through the configured session

use super::{load_state, CommandContext};
use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tfjunos::connection::LocalConnection;
use tfjunos::lifecycle::{Driver, FakeSetFile, Resource};
use tfjunos::resources::ResourceKind;
use tfjunos::session::CliSession;

/// Arguments for the apply command
#[derive(Parser, Debug, Clone)]
pub struct ApplyArgs {
    /// Resource type
    #[arg(value_enum)]
    pub kind: ResourceKind,

    /// State file (JSON or YAML)
    pub state: PathBuf,

    /// Write the lines to this set file instead of the device
    #[arg(long)]
    pub set_file: Option<PathBuf>,
}

impl ApplyArgs {
    pub async fn execute(&self, ctx: &mut CommandContext) -> Result<i32> {
        if let Some(path) = &self.set_file {
            ctx.config.provider.fake_create_with_setfile = Some(path.clone());
        }
        ctx.config.validate().context("Invalid configuration")?;
        let driver = build_driver(ctx);
        with_resource!(self.kind, apply(ctx, &driver, &self.state).await)
    }
}

fn build_driver(ctx: &CommandContext) -> Driver {
    let connection = Arc::new(LocalConnection::new());
    let session = CliSession::new(connection, ctx.config.session_options());
    let driver = Driver::new(Arc::new(session));

    let provider = &ctx.config.provider;
    match &provider.fake_create_with_setfile {
        Some(path) => driver.with_set_file(FakeSetFile::new(
            path.clone(),
            provider.fake_update_also,
            provider.fake_delete_also,
        )),
        None => driver,
    }
}

async fn apply<R: Resource>(ctx: &CommandContext, driver: &Driver, state: &Path) -> Result<i32> {
    let planned: R = load_state(state)?;
    let created = driver.create(&planned).await?;

    match &ctx.config.provider.fake_create_with_setfile {
        Some(path) => ctx.output.info(&format!(
            "{} {} written to {}",
            R::TYPE_NAME,
            created.id(),
            path.display()
        )),
        None => ctx
            .output
            .info(&format!("{} {} created", R::TYPE_NAME, created.id())),
    }
    ctx.output.json(&created)?;
    Ok(0)
}
