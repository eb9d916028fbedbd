//! CLI utility functions

use std::path::PathBuf;

use miette::{IntoDiagnostic, Result};
use tokio::runtime::Runtime;
use tracing::debug;

use lintgate_core::{ExecutionStateStore, LintgateConfig};

pub fn create_tokio_runtime() -> Result<Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .into_diagnostic()
}

/// Loads the given config file, or one discovered in the current directory.
pub fn load_config(config: Option<&PathBuf>) -> Result<LintgateConfig> {
    if let Some(path) = config {
        return LintgateConfig::from_file(path).into_diagnostic();
    }

    let cwd = std::env::current_dir().into_diagnostic()?;
    match LintgateConfig::discover(&cwd) {
        Some(path) => {
            debug!("Using config file: {}", path.display());
            LintgateConfig::from_file(&path).into_diagnostic()
        }
        None => Ok(LintgateConfig::new()),
    }
}

/// Store location: `--state-file`, then `stateFile` in the config, then the default.
pub fn resolve_store_path(
    state_file: Option<&PathBuf>,
    config: &LintgateConfig,
) -> Result<PathBuf> {
    if let Some(path) = state_file {
        return Ok(path.clone());
    }
    if let Some(path) = config.state_path() {
        return Ok(path);
    }
    ExecutionStateStore::default_path().into_diagnostic()
}
