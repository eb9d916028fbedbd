//! Output formatting module

mod json;
mod text;

use miette::Result;

use lintgate_core::ExecutionStateStore;

pub fn output_decisions(store: &ExecutionStateStore, format: &str) -> Result<()> {
    match format {
        "json" => json::output_json(store)?,
        _ => text::output_text(store),
    }

    Ok(())
}
