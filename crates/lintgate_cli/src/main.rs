//! lintgate CLI
//!
//! Runs the lintgate language server and edits stored execution decisions.

mod cli;
mod commands;
mod output;
mod utils;

use std::process::ExitCode;

use clap::Parser;
use miette::Result;
use tracing::error;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use commands::lsp::run_lsp;
use commands::trust::run_trust;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(not_approved) => {
            if not_approved {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<bool> {
    match &cli.command {
        Commands::Lsp => run_lsp(cli.config.clone(), cli.state_file.clone()).map(|_| false),
        Commands::Trust { command } => {
            run_trust(command, cli.config.as_ref(), cli.state_file.as_ref())
        }
    }
}
