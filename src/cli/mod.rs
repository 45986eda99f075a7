//! Command-line interface for tfjunos
//!
//! Argument parsing and subcommand wiring. Each subcommand works on one
//! resource type and a state file (JSON or YAML by extension).

pub mod commands;
pub mod diff;
pub mod output;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// tfjunos - Junos configuration resources as set lines
///
/// Encodes resource state into Junos `set` lines, decodes
/// `display set relative` output back into state, and applies resources
/// to a device or a set file.
#[derive(Parser, Debug, Clone)]
#[command(name = "tfjunos")]
#[command(version)]
#[command(about = "Junos configuration resources as set lines", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short = 'v', long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Human)]
    pub output: OutputFormat,

    /// Path to configuration file
    #[arg(short = 'c', long, global = true, env = "TFJUNOS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

/// Output format for CLI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output with colors
    #[default]
    Human,
    /// JSON output for scripting
    Json,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Print the set lines of a resource state
    Encode(commands::encode::EncodeArgs),

    /// Decode `display set relative` output into resource state
    Decode(commands::decode::DecodeArgs),

    /// Report every rule violation of a resource state
    Validate(commands::validate::ValidateArgs),

    /// Show how the set lines change between two states
    Diff(commands::diff::DiffArgs),

    /// Create a resource on the device or in the configured set file
    Apply(commands::apply::ApplyArgs),
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Get the effective verbosity level (0-3)
    pub fn verbosity(&self) -> u8 {
        self.verbose.min(3)
    }

    /// Check if JSON output is requested
    pub fn is_json(&self) -> bool {
        matches!(self.output, OutputFormat::Json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tfjunos::resources::ResourceKind;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from(["tfjunos", "encode", "lldp-interface", "state.json"]).unwrap();
        match cli.command {
            Commands::Encode(args) => {
                assert_eq!(args.kind, ResourceKind::LldpInterface);
                assert_eq!(args.state, PathBuf::from("state.json"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_verbosity() {
        let cli = Cli::try_parse_from([
            "tfjunos",
            "-vvvv",
            "validate",
            "junos_igmp_snooping_vlan",
            "state.yaml",
        ])
        .unwrap();
        assert_eq!(cli.verbosity(), 3);
    }

    #[test]
    fn test_output_format() {
        let cli = Cli::try_parse_from([
            "tfjunos",
            "--output",
            "json",
            "decode",
            "sampling-instance",
            "samp1_-_default",
        ])
        .unwrap();
        assert!(cli.is_json());
    }

    #[test]
    fn test_unknown_kind_rejected() {
        assert!(Cli::try_parse_from(["tfjunos", "encode", "junos_bgp_group", "s.json"]).is_err());
    }
}
