//! Conversion between lintgate diagnostics and LSP diagnostics.

use tower_lsp::lsp_types::{Diagnostic, DiagnosticSeverity, NumberOrString, Position, Range};

use lintgate_core::diagnostics::{DIAGNOSTIC_CODE, DIAGNOSTIC_SOURCE};
use lintgate_core::{ExecutionParams, TrustDiagnostic};

/// Converts a lintgate diagnostic to an LSP diagnostic at the start of the document.
///
/// The remediation params ride along in `data` so a code action can be built
/// from the diagnostic alone.
pub fn to_lsp_diagnostic(diag: &TrustDiagnostic) -> Diagnostic {
    let start = Position::new(0, 0);

    Diagnostic {
        range: Range::new(start, start),
        severity: Some(DiagnosticSeverity::WARNING),
        code: Some(NumberOrString::String(diag.code.to_string())),
        source: Some(diag.source.to_string()),
        message: diag.message.clone(),
        data: serde_json::to_value(&diag.remediation.params).ok(),
        ..Default::default()
    }
}

/// Recovers the library params from a diagnostic published by [`to_lsp_diagnostic`].
///
/// Returns `None` for diagnostics from any other source.
pub fn execution_params(diag: &Diagnostic) -> Option<ExecutionParams> {
    if diag.source.as_deref() != Some(DIAGNOSTIC_SOURCE) {
        return None;
    }
    match &diag.code {
        Some(NumberOrString::String(code)) if code == DIAGNOSTIC_CODE => {}
        _ => return None,
    }
    serde_json::from_value(diag.data.clone()?).ok()
}
