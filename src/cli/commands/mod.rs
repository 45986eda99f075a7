//! Subcommand implementations.

/// Run a generic command function for the resource type named by a
/// [`ResourceKind`](tfjunos::resources::ResourceKind).
macro_rules! with_resource {
    ($kind:expr, $func:ident($($arg:expr),* $(,)?).await) => {
        match $kind {
            tfjunos::resources::ResourceKind::SamplingInstance => {
                $func::<tfjunos::resources::SamplingInstance>($($arg),*).await
            }
            tfjunos::resources::ResourceKind::IgmpSnoopingVlan => {
                $func::<tfjunos::resources::IgmpSnoopingVlan>($($arg),*).await
            }
            tfjunos::resources::ResourceKind::LldpInterface => {
                $func::<tfjunos::resources::LldpInterface>($($arg),*).await
            }
        }
    };
    ($kind:expr, $func:ident($($arg:expr),* $(,)?)) => {
        match $kind {
            tfjunos::resources::ResourceKind::SamplingInstance => {
                $func::<tfjunos::resources::SamplingInstance>($($arg),*)
            }
            tfjunos::resources::ResourceKind::IgmpSnoopingVlan => {
                $func::<tfjunos::resources::IgmpSnoopingVlan>($($arg),*)
            }
            tfjunos::resources::ResourceKind::LldpInterface => {
                $func::<tfjunos::resources::LldpInterface>($($arg),*)
            }
        }
    };
}

pub mod apply;
pub mod decode;
pub mod diff;
pub mod encode;
pub mod validate;

use crate::cli::output::OutputFormatter;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::io::Read;
use std::path::Path;
use tfjunos::config::Config;

/// Common context shared between commands
pub struct CommandContext {
    /// Configuration
    pub config: Config,
    /// Output formatter
    pub output: OutputFormatter,
    /// Verbosity level
    pub verbosity: u8,
}

impl CommandContext {
    /// Create a new command context from CLI arguments
    pub fn new(cli: &crate::cli::Cli, config: Config) -> Self {
        let output = OutputFormatter::new(!cli.no_color, cli.is_json(), cli.verbosity());
        Self {
            config,
            output,
            verbosity: cli.verbosity(),
        }
    }
}

/// Load a resource state file; YAML for `.yml`/`.yaml`, JSON otherwise
pub fn load_state<R: DeserializeOwned>(path: &Path) -> Result<R> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read state file: {}", path.display()))?;
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let state = match extension {
        "yml" | "yaml" => serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse state file: {}", path.display()))?,
        _ => serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse state file: {}", path.display()))?,
    };
    Ok(state)
}

/// Read command output from a file, or stdin for `-`
pub fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut input = String::new();
        std::io::stdin()
            .read_to_string(&mut input)
            .context("Failed to read stdin")?;
        return Ok(input);
    }
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file: {}", path.display()))
}
