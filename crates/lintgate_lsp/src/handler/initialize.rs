//! Initialize and shutdown handlers.

use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tracing::{error, info};

use lintgate_core::{MANAGE_COMMAND, RESET_COMMAND};

use crate::config::reload_config;
use crate::state::BackendState;

/// Handles the `initialize` LSP request.
pub async fn handle_initialize(
    state: &BackendState,
    params: InitializeParams,
) -> Result<InitializeResult> {
    info!("lintgate LSP server initializing...");

    let mut folders: Vec<Url> = params
        .workspace_folders
        .unwrap_or_default()
        .into_iter()
        .map(|folder| folder.uri)
        .collect();
    if folders.is_empty()
        && let Some(root_uri) = &params.root_uri
    {
        folders.push(root_uri.clone());
    }

    let root = params
        .root_uri
        .as_ref()
        .or(folders.first())
        .and_then(|u| u.to_file_path().ok());

    match state.workspace_root.write() {
        Ok(mut guard) => *guard = root,
        Err(e) => {
            error!("Workspace root lock poisoned: {}", e);
            return Ok(InitializeResult::default());
        }
    }

    state.engine.set_workspace_folders(folders);
    reload_config(state).await;

    Ok(InitializeResult {
        capabilities: ServerCapabilities {
            text_document_sync: Some(TextDocumentSyncCapability::Options(
                TextDocumentSyncOptions {
                    open_close: Some(true),
                    change: Some(TextDocumentSyncKind::INCREMENTAL),
                    ..Default::default()
                },
            )),
            code_action_provider: Some(CodeActionProviderCapability::Options(CodeActionOptions {
                code_action_kinds: Some(vec![CodeActionKind::QUICKFIX]),
                resolve_provider: Some(false),
                work_done_progress_options: Default::default(),
            })),
            execute_command_provider: Some(ExecuteCommandOptions {
                commands: vec![MANAGE_COMMAND.to_string(), RESET_COMMAND.to_string()],
                work_done_progress_options: Default::default(),
            }),
            workspace: Some(WorkspaceServerCapabilities {
                workspace_folders: Some(WorkspaceFoldersServerCapabilities {
                    supported: Some(true),
                    change_notifications: Some(OneOf::Left(true)),
                }),
                file_operations: None,
            }),
            ..Default::default()
        },
        server_info: Some(ServerInfo {
            name: "lintgate-lsp".to_string(),
            version: Some(env!("CARGO_PKG_VERSION").to_string()),
        }),
    })
}

/// Handles the `initialized` LSP notification.
pub async fn handle_initialized(client: &tower_lsp::Client) {
    client
        .log_message(MessageType::INFO, "lintgate LSP server initialized!")
        .await;
}

/// Handles the `shutdown` LSP request.
pub async fn handle_shutdown() -> Result<()> {
    info!("lintgate LSP server shutting down...");
    Ok(())
}
