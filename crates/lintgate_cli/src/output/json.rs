//! JSON output formatter

use miette::{IntoDiagnostic, Result};

use lintgate_core::ExecutionStateStore;

pub fn output_json(store: &ExecutionStateStore) -> Result<()> {
    let output = serde_json::json!({
        "path": store.path().map(|p| p.display().to_string()),
        "alwaysAllowExecution": store.always_allow(),
        "libraries": store.libraries().libs,
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&output).into_diagnostic()?
    );
    Ok(())
}
