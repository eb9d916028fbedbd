//! lintgate LSP Server
//!
//! Language Server Protocol front end for the lintgate trust engine.
//! The analysis process asks for execution approval through custom methods,
//! while the editor renders the resulting dialogs, diagnostics and status.

mod config;
mod conversion;
mod handler;
mod host;
pub mod protocol;
mod state;

use std::sync::Arc;

use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer, LspService, Server};
use tracing::info;

use lintgate_core::{
    ConfirmationResult, ExecutionStateStore, LintgateConfig, StatusParams, TrustEngine,
};

pub use host::LspHost;
pub use state::ServerOptions;

use protocol::ActiveDocumentParams;
use state::{BackendState, SharedState};

/// The LSP backend for lintgate.
#[derive(Clone)]
pub struct Backend {
    /// LSP client for sending notifications.
    client: Client,
    /// Shared state
    state: SharedState,
}

impl Backend {
    /// Creates a new backend with the given client and default options.
    pub fn new(client: Client) -> Self {
        Self::with_options(client, ServerOptions::default())
    }

    /// Creates a new backend with the given client.
    ///
    /// Decisions live in memory until `initialize` locates the store.
    pub fn with_options(client: Client, options: ServerOptions) -> Self {
        let host = Arc::new(LspHost::new(client.clone()));
        let engine = Arc::new(TrustEngine::new(
            host,
            ExecutionStateStore::in_memory(),
            LintgateConfig::new(),
        ));

        Self {
            client,
            state: Arc::new(BackendState::new(engine, options)),
        }
    }

    /// The engine behind this backend.
    pub fn engine(&self) -> &Arc<TrustEngine> {
        &self.state.engine
    }

    async fn confirm_execution(&self, params: serde_json::Value) -> Result<ConfirmationResult> {
        handler::handle_confirm_execution(&self.state, params).await
    }

    async fn status(&self, params: StatusParams) {
        handler::handle_status(&self.state, params).await;
    }

    async fn active_document(&self, params: ActiveDocumentParams) {
        handler::handle_active_document(&self.state, params).await;
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        handler::handle_initialize(&self.state, params).await
    }

    async fn initialized(&self, _: InitializedParams) {
        handler::handle_initialized(&self.client).await;
    }

    async fn shutdown(&self) -> Result<()> {
        handler::handle_shutdown().await
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        handler::handle_did_open(&self.state, params).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        handler::handle_did_change(&self.state, params).await;
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        handler::handle_did_close(&self.state, params).await;
    }

    async fn did_change_workspace_folders(&self, params: DidChangeWorkspaceFoldersParams) {
        handler::handle_did_change_workspace_folders(&self.state, params);
    }

    async fn did_change_watched_files(&self, params: DidChangeWatchedFilesParams) {
        handler::handle_did_change_watched_files(&self.state, params).await;
    }

    async fn code_action(&self, params: CodeActionParams) -> Result<Option<CodeActionResponse>> {
        handler::handle_code_action(params).await
    }

    async fn execute_command(
        &self,
        params: ExecuteCommandParams,
    ) -> Result<Option<serde_json::Value>> {
        handler::handle_execute_command(&self.state, &params.command, params.arguments).await
    }
}

/// Builds the service with the lintgate custom methods registered.
pub fn build_service(options: ServerOptions) -> (LspService<Backend>, tower_lsp::ClientSocket) {
    LspService::build(move |client| Backend::with_options(client, options))
        .custom_method(protocol::CONFIRM_EXECUTION, Backend::confirm_execution)
        .custom_method(protocol::STATUS, Backend::status)
        .custom_method(protocol::ACTIVE_DOCUMENT, Backend::active_document)
        .finish()
}

/// Starts the LSP server.
///
/// This function does not return unless an error occurs or the server shuts down.
pub async fn run(options: ServerOptions) {
    info!("lintgate LSP server starting...");

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = build_service(options);
    Server::new(stdin, stdout, socket).serve(service).await;
}
