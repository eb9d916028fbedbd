//! Custom LSP methods spoken between lintgate and its clients.

use serde::{Deserialize, Serialize};
use tower_lsp::lsp_types::Url;
use tower_lsp::lsp_types::notification::Notification;

use lintgate_core::{Status, StatusDisplay};

/// Request from the analysis process: may this library run?
pub const CONFIRM_EXECUTION: &str = "lintgate/confirmExecution";
/// Notification from the analysis process reporting a resource's status.
pub const STATUS: &str = "lintgate/status";
/// Notification from the client when focus moves between documents.
pub const ACTIVE_DOCUMENT: &str = "lintgate/activeDocument";

/// Params of [`ACTIVE_DOCUMENT`]; `None` when no document has focus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveDocumentParams {
    pub uri: Option<Url>,
}

/// Status for the client to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayStatusParams {
    pub status: Status,
    pub directly_linked: bool,
    pub visible: bool,
}

impl From<StatusDisplay> for DisplayStatusParams {
    fn from(display: StatusDisplay) -> Self {
        Self {
            status: display.status,
            directly_linked: display.directly_linked,
            visible: display.visible,
        }
    }
}

/// `lintgate/displayStatus`
pub enum DisplayStatus {}

impl Notification for DisplayStatus {
    type Params = DisplayStatusParams;
    const METHOD: &'static str = "lintgate/displayStatus";
}

/// `lintgate/executionStateChanged`: decisions changed, re-fetch configuration.
pub enum ExecutionStateChanged {}

impl Notification for ExecutionStateChanged {
    type Params = ();
    const METHOD: &'static str = "lintgate/executionStateChanged";
}
