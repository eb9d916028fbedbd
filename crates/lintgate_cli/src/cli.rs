//! CLI argument definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// lintgate - Decide which linter libraries may execute
#[derive(Parser)]
#[command(name = "lintgate")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Execution decision store path
    #[arg(long, global = true, value_name = "PATH")]
    pub state_file: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the LSP server
    Lsp,

    /// Inspect and edit stored execution decisions
    Trust {
        #[command(subcommand)]
        command: TrustCommands,
    },
}

#[derive(Subcommand)]
pub enum TrustCommands {
    /// List stored decisions
    List {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Allow a library to execute
    Allow {
        /// Library path
        library: String,
    },

    /// Deny a library execution
    Deny {
        /// Library path
        library: String,
    },

    /// Forget the decision for a library
    Forget {
        /// Library path
        library: String,
    },

    /// Approve every library without an explicit decision
    AlwaysAllow {
        #[arg(value_enum)]
        state: Toggle,
    },

    /// Forget stored decisions
    Reset {
        /// Only turn off always-allow, keeping per-library decisions
        #[arg(long)]
        always_allow_only: bool,
    },

    /// Print what a library would resolve to; exits with 1 unless approved
    Check {
        /// Library path
        library: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

impl From<Toggle> for bool {
    fn from(toggle: Toggle) -> Self {
        toggle == Toggle::On
    }
}
