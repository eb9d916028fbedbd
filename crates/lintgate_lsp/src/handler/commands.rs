//! `workspace/executeCommand` handler.

use serde_json::Value;
use tower_lsp::jsonrpc::{Error, Result};
use tracing::debug;

use lintgate_core::{
    ExecutionParams, MANAGE_COMMAND, ManageOutcome, RESET_COMMAND, ResetOutcome,
};

use crate::state::SharedState;

/// Handles the `workspace/executeCommand` request.
///
/// The manage command answers with the library's new confirmation result,
/// or `null` when nothing was decided.
pub async fn handle_execute_command(
    state: &SharedState,
    command: &str,
    arguments: Vec<Value>,
) -> Result<Option<Value>> {
    debug!("Execute command: {} {:?}", command, arguments);

    match command {
        MANAGE_COMMAND => {
            let params = manage_params(arguments)?;
            let outcome = state.engine.manage_library_execution(params).await;
            Ok(match outcome {
                ManageOutcome::Decided { result, .. } => serde_json::to_value(result).ok(),
                ManageOutcome::Dismissed | ManageOutcome::NothingToManage => None,
            })
        }
        RESET_COMMAND => {
            match state.engine.reset_library_execution().await {
                ResetOutcome::Reset { scope, .. } => debug!("Reset done: {:?}", scope),
                ResetOutcome::Dismissed => debug!("Reset dismissed"),
            }
            Ok(None)
        }
        other => Err(Error::invalid_params(format!("Unknown command: {}", other))),
    }
}

fn manage_params(arguments: Vec<Value>) -> Result<Option<ExecutionParams>> {
    match arguments.into_iter().next() {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(|e| Error::invalid_params(format!("Invalid execution params: {}", e))),
    }
}
