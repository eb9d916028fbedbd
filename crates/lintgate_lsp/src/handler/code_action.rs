//! Code action handler for the execution diagnostic.

use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tracing::debug;

use lintgate_core::MANAGE_COMMAND;

use crate::conversion::execution_params;

/// Handles the `textDocument/codeAction` request.
///
/// Offers one quick fix per lintgate diagnostic in the context, opening the
/// manage dialog for that diagnostic's library.
pub async fn handle_code_action(params: CodeActionParams) -> Result<Option<CodeActionResponse>> {
    debug!("Code action request: {}", params.text_document.uri);

    let wants_quickfix = match &params.context.only {
        Some(only) => only.contains(&CodeActionKind::QUICKFIX),
        None => true,
    };
    if !wants_quickfix {
        return Ok(None);
    }

    let actions: Vec<CodeActionOrCommand> = params
        .context
        .diagnostics
        .iter()
        .filter_map(|diag| {
            let execution = execution_params(diag)?;
            let argument = serde_json::to_value(&execution).ok()?;
            Some(CodeActionOrCommand::CodeAction(CodeAction {
                title: format!("Manage execution of '{}'", execution.library_path),
                kind: Some(CodeActionKind::QUICKFIX),
                diagnostics: Some(vec![diag.clone()]),
                command: Some(Command {
                    title: "Manage library execution".to_string(),
                    command: MANAGE_COMMAND.to_string(),
                    arguments: Some(vec![argument]),
                }),
                is_preferred: Some(true),
                ..Default::default()
            }))
        })
        .collect();

    if actions.is_empty() {
        return Ok(None);
    }
    Ok(Some(actions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversion::to_lsp_diagnostic;
    use lintgate_core::{ExecutionParams, ExecutionScope, TrustDiagnostic};
    use pretty_assertions::assert_eq;

    fn params(diagnostics: Vec<Diagnostic>, only: Option<Vec<CodeActionKind>>) -> CodeActionParams {
        CodeActionParams {
            text_document: TextDocumentIdentifier {
                uri: Url::parse("file:///proj/a.js").unwrap(),
            },
            range: Range::default(),
            context: CodeActionContext {
                diagnostics,
                only,
                trigger_kind: None,
            },
            work_done_progress_params: Default::default(),
            partial_result_params: Default::default(),
        }
    }

    #[tokio::test]
    async fn test_quick_fix_runs_manage_command_with_params() {
        let execution = ExecutionParams::new(ExecutionScope::Local, "/proj/node_modules/linter");
        let diag = to_lsp_diagnostic(&TrustDiagnostic::pending(&execution));

        let actions = handle_code_action(params(vec![diag], None))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(actions.len(), 1);
        let CodeActionOrCommand::CodeAction(action) = &actions[0] else {
            panic!("expected a code action");
        };
        let command = action.command.as_ref().unwrap();
        assert_eq!(command.command, MANAGE_COMMAND);
        assert_eq!(
            command.arguments,
            Some(vec![serde_json::to_value(&execution).unwrap()])
        );
    }

    #[tokio::test]
    async fn test_foreign_diagnostics_get_no_action() {
        let diag = Diagnostic {
            source: Some("eslint".to_string()),
            message: "no-unused-vars".to_string(),
            ..Default::default()
        };

        let actions = handle_code_action(params(vec![diag], None)).await.unwrap();
        assert_eq!(actions, None);
    }

    #[tokio::test]
    async fn test_non_quickfix_request_is_ignored() {
        let execution = ExecutionParams::new(ExecutionScope::Local, "/lib");
        let diag = to_lsp_diagnostic(&TrustDiagnostic::pending(&execution));

        let actions = handle_code_action(params(
            vec![diag],
            Some(vec![CodeActionKind::SOURCE_FIX_ALL]),
        ))
        .await
        .unwrap();
        assert_eq!(actions, None);
    }
}
