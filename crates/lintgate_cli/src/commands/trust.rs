//! Trust command implementation
//!
//! Edits the decision store offline. A running language server reads the
//! store only when it starts or its configuration changes.

use std::collections::HashSet;
use std::path::PathBuf;

use miette::{IntoDiagnostic, Result};
use tracing::info;

use lintgate_core::resolver::resolve;
use lintgate_core::{ConfirmationResult, ExecutionParams, ExecutionScope, ExecutionStateStore};

use crate::cli::{Toggle, TrustCommands};
use crate::output::output_decisions;
use crate::utils::{load_config, resolve_store_path};

/// Runs a trust subcommand. Returns `true` when `check` did not approve.
pub fn run_trust(
    command: &TrustCommands,
    config: Option<&PathBuf>,
    state_file: Option<&PathBuf>,
) -> Result<bool> {
    let config = load_config(config)?;
    let path = resolve_store_path(state_file, &config)?;
    let mut store = ExecutionStateStore::open(&path).into_diagnostic()?;

    match command {
        TrustCommands::List { format } => {
            output_decisions(&store, format)?;
            Ok(false)
        }
        TrustCommands::Allow { library } => {
            store.set(library, true).into_diagnostic()?;
            info!("Allowed execution of '{}'", library);
            Ok(false)
        }
        TrustCommands::Deny { library } => {
            store.set(library, false).into_diagnostic()?;
            info!("Denied execution of '{}'", library);
            Ok(false)
        }
        TrustCommands::Forget { library } => {
            if store.get(library).is_none() {
                info!("No decision stored for '{}'", library);
            } else {
                store.unset(library).into_diagnostic()?;
                info!("Forgot decision for '{}'", library);
            }
            Ok(false)
        }
        TrustCommands::AlwaysAllow { state } => {
            store.set_always_allow((*state).into()).into_diagnostic()?;
            info!(
                "Always allow turned {}",
                if *state == Toggle::On { "on" } else { "off" }
            );
            Ok(false)
        }
        TrustCommands::Reset { always_allow_only } => {
            if *always_allow_only {
                store.set_always_allow(false).into_diagnostic()?;
                info!("Always allow turned off");
            } else {
                store.clear_all().into_diagnostic()?;
            }
            Ok(false)
        }
        TrustCommands::Check { library } => {
            let result = check(&store, library);
            println!("{}", result);
            Ok(result != ConfirmationResult::Approved)
        }
    }
}

/// Resolves `library` as a fresh session would, with nothing disabled.
fn check(store: &ExecutionStateStore, library: &str) -> ConfirmationResult {
    let params = ExecutionParams::new(ExecutionScope::Local, library);
    resolve(&params, store, &HashSet::new())
}
