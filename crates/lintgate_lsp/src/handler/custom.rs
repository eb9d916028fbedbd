//! Handlers for the lintgate-specific methods.

use serde_json::Value;
use tower_lsp::jsonrpc::Result;
use tracing::{debug, error};

use lintgate_core::{ConfirmExecutionParams, ConfirmationResult, StatusParams};

use crate::protocol::ActiveDocumentParams;
use crate::state::SharedState;

/// Handles the `lintgate/confirmExecution` request.
///
/// Never fails: malformed params and faults inside the engine resolve to
/// `denied`.
pub async fn handle_confirm_execution(
    state: &SharedState,
    params: Value,
) -> Result<ConfirmationResult> {
    let Some(params) = parse_confirm_params(params) else {
        return Ok(ConfirmationResult::Denied);
    };
    debug!(
        "Confirm execution: {} ({}) for {}",
        params.library_path, params.scope, params.uri
    );
    Ok(state.engine.confirm_execution(params).await)
}

fn parse_confirm_params(params: Value) -> Option<ConfirmExecutionParams> {
    match serde_json::from_value(params) {
        Ok(params) => Some(params),
        Err(e) => {
            error!("Malformed confirmExecution params: {}. Denying execution.", e);
            None
        }
    }
}

/// Handles the `lintgate/status` notification.
pub async fn handle_status(state: &SharedState, params: StatusParams) {
    state.engine.handle_status(params).await;
}

/// Handles the `lintgate/activeDocument` notification.
pub async fn handle_active_document(state: &SharedState, params: ActiveDocumentParams) {
    debug!("Active document: {:?}", params.uri);
    state.engine.set_active_resource(params.uri).await;
}
