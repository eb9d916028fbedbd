//! Configuration management for LSP server.

use std::path::PathBuf;

use tracing::{error, info};

use lintgate_core::{ExecutionStateStore, LintgateConfig};

use crate::state::BackendState;

/// Reloads configuration and, if its location changed, the decision store.
pub async fn reload_config(state: &BackendState) {
    let root = match state.workspace_root.read() {
        Ok(g) => g.clone(),
        Err(e) => {
            error!("Workspace root lock poisoned: {}", e);
            return;
        }
    };

    let config_path = state
        .options
        .config_file
        .clone()
        .or_else(|| root.as_deref().and_then(|root| LintgateConfig::discover(root)));

    let config = match config_path {
        Some(path) => {
            info!("Found config file: {}", path.display());
            match LintgateConfig::from_file(&path) {
                Ok(config) => config,
                Err(e) => {
                    error!("Failed to load config: {}", e);
                    LintgateConfig::new()
                }
            }
        }
        None => LintgateConfig::new(),
    };

    match store_path(state, &config) {
        Some(path) if state.engine.store_path().as_ref() != Some(&path) => {
            match ExecutionStateStore::open(&path) {
                Ok(store) => state.engine.replace_store(store).await,
                Err(e) => error!("Failed to open execution state: {}", e),
            }
        }
        Some(_) => {}
        None => error!("No location for the execution state; decisions last for this session only"),
    }

    state.engine.set_config(config).await;
}

fn store_path(state: &BackendState, config: &LintgateConfig) -> Option<PathBuf> {
    if let Some(path) = &state.options.state_file {
        return Some(path.clone());
    }
    if let Some(path) = config.state_path() {
        return Some(path);
    }
    match ExecutionStateStore::default_path() {
        Ok(path) => Some(path),
        Err(e) => {
            error!("{}", e);
            None
        }
    }
}
