//! LSP command implementation

use std::path::PathBuf;

use miette::Result;

use lintgate_lsp::ServerOptions;

use crate::utils::create_tokio_runtime;

pub fn run_lsp(config: Option<PathBuf>, state_file: Option<PathBuf>) -> Result<()> {
    let options = ServerOptions {
        state_file,
        config_file: config,
    };
    create_tokio_runtime()?.block_on(async {
        lintgate_lsp::run(options).await;
    });
    Ok(())
}
