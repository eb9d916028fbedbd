//! Document lifecycle handlers (open, change, close).
//!
//! Only document identity matters here; contents are never stored.

use tower_lsp::lsp_types::*;
use tracing::debug;

use crate::state::SharedState;

/// Handles the `textDocument/didOpen` notification.
pub async fn handle_did_open(state: &SharedState, params: DidOpenTextDocumentParams) {
    debug!("Document opened: {}", params.text_document.uri);
    state.engine.open_resource(params.text_document.uri).await;
}

/// Handles the `textDocument/didChange` notification.
///
/// Editing a document makes it the active one.
pub async fn handle_did_change(state: &SharedState, params: DidChangeTextDocumentParams) {
    debug!("Document changed: {}", params.text_document.uri);
    state
        .engine
        .set_active_resource(Some(params.text_document.uri))
        .await;
}

/// Handles the `textDocument/didClose` notification.
pub async fn handle_did_close(state: &SharedState, params: DidCloseTextDocumentParams) {
    debug!("Document closed: {}", params.text_document.uri);
    state.engine.close_resource(&params.text_document.uri).await;
}
