//! LSP Backend state management.

use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use lintgate_core::TrustEngine;

/// Overrides passed on the command line.
#[derive(Debug, Clone, Default)]
pub struct ServerOptions {
    /// Decision store file, taking precedence over `stateFile` in the config.
    pub state_file: Option<PathBuf>,
    /// Config file to use instead of discovering one in the workspace root.
    pub config_file: Option<PathBuf>,
}

/// Shared backend state.
pub(crate) struct BackendState {
    pub engine: Arc<TrustEngine>,
    /// Workspace root path.
    pub workspace_root: RwLock<Option<PathBuf>>,
    pub options: ServerOptions,
}

impl fmt::Debug for BackendState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendState")
            .field("engine", &"<TrustEngine>")
            .field("workspace_root", &self.workspace_root)
            .field("options", &self.options)
            .finish()
    }
}

impl BackendState {
    pub fn new(engine: Arc<TrustEngine>, options: ServerOptions) -> Self {
        Self {
            engine,
            workspace_root: RwLock::new(None),
            options,
        }
    }
}

/// Type alias for shared state.
pub type SharedState = Arc<BackendState>;
