//! LSP request/notification handlers.

mod code_action;
mod commands;
mod custom;
mod documents;
mod initialize;
mod workspace;

pub use code_action::handle_code_action;
pub use commands::handle_execute_command;
pub use custom::{handle_active_document, handle_confirm_execution, handle_status};
pub use documents::{handle_did_change, handle_did_close, handle_did_open};
pub use initialize::{handle_initialize, handle_initialized, handle_shutdown};
pub use workspace::{handle_did_change_watched_files, handle_did_change_workspace_folders};
