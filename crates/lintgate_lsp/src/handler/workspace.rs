//! Workspace folder and watched file handlers.

use tower_lsp::lsp_types::*;
use tracing::{debug, info};

use lintgate_core::LintgateConfig;

use crate::config::reload_config;
use crate::state::BackendState;

/// Handles the `workspace/didChangeWorkspaceFolders` notification.
pub fn handle_did_change_workspace_folders(
    state: &BackendState,
    params: DidChangeWorkspaceFoldersParams,
) {
    for folder in params.event.removed {
        debug!("Workspace folder removed: {}", folder.uri);
        state.engine.remove_workspace_folder(&folder.uri);
    }
    for folder in params.event.added {
        debug!("Workspace folder added: {}", folder.uri);
        state.engine.add_workspace_folder(folder.uri);
    }
}

/// Handles the `workspace/didChangeWatchedFiles` notification.
///
/// Returns `true` if a config file changed and configuration was reloaded.
pub async fn handle_did_change_watched_files(
    state: &BackendState,
    params: DidChangeWatchedFilesParams,
) -> bool {
    debug!("Watched files changed: {:?}", params.changes);

    let config_changed = params.changes.iter().any(|change| {
        let path = change.uri.path();
        LintgateConfig::CONFIG_FILES
            .iter()
            .any(|name| path.ends_with(name))
    });

    if config_changed {
        info!("Configuration file changed, reloading...");
        reload_config(state).await;
    }

    config_changed
}
