//! SkillMart CLI entry point.
//!
//! Binary name: `smart`
//!
//! Parses CLI arguments, initializes tracing, the database and services, then
//! dispatches to the command handler inside a per-command span.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;
use tracing::Instrument;

use cli::{Cli, Commands, Output};
use skillmart_observe::attrs;
use skillmart_observe::tracing_setup::{default_directive, init_tracing, shutdown_tracing};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(default_directive(cli.verbose, cli.quiet), cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "smart", &mut std::io::stdout());
        return Ok(());
    }

    let span = attrs::command_span(cli.command.name());
    let result = run(cli).instrument(span).await;

    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let state = AppState::init().await?;
    let out = Output {
        json: cli.json,
        quiet: cli.quiet,
    };

    match cli.command {
        Commands::Profile { action } => cli::profile::run(&state, action, out).await,
        Commands::Booking { action } => cli::booking::run(&state, action, out).await,
        Commands::Completions { .. } => Ok(()),
    }
}
