//! tfjunos - Junos configuration resources as set lines
//!
//! This is the main entry point for the tfjunos CLI.

mod cli;

use anyhow::Result;
use cli::commands::CommandContext;
use cli::{Cli, Commands};
use tfjunos::config::Config;
use tfjunos::telemetry;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    // A broken config file is reported once logging is up
    let loaded = Config::load(cli.config.as_ref());
    let config = loaded.as_ref().cloned().unwrap_or_default();

    // Initialize logging based on verbosity and the [logging] table
    let mut logging = config.logging.clone();
    if cli.no_color || cli.is_json() {
        logging.ansi_colors = false;
    }
    if let Err(e) = telemetry::init_from_verbosity(cli.verbosity(), &logging) {
        eprintln!("Warning: {}", e);
    }
    tracing::debug!(version = tfjunos::version(), "starting");

    let mut ctx = CommandContext::new(&cli, config);
    if let Err(e) = loaded {
        ctx.output.error(&format!("Failed to load config: {:#}", e));
        std::process::exit(tfjunos::Error::Config(e.to_string()).exit_code());
    }

    let outcome = match &cli.command {
        Commands::Encode(args) => args.execute(&mut ctx).await,
        Commands::Decode(args) => args.execute(&mut ctx).await,
        Commands::Validate(args) => args.execute(&mut ctx).await,
        Commands::Diff(args) => args.execute(&mut ctx).await,
        Commands::Apply(args) => args.execute(&mut ctx).await,
    };

    let exit_code = match outcome {
        Ok(code) => code,
        Err(e) => {
            ctx.output.error(&format!("{:#}", e));
            e.downcast_ref::<tfjunos::Error>()
                .map_or(1, tfjunos::Error::exit_code)
        }
    };
    std::process::exit(exit_code);
}
