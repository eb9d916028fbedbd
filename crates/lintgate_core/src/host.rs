//! Capabilities the engine needs from the editor integration.

use async_trait::async_trait;
use url::Url;

use crate::diagnostics::TrustDiagnostic;
use crate::types::Status;

/// Status to render for the active resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusDisplay {
    pub status: Status,
    pub directly_linked: bool,
    /// `false` when the status is `ok` and the user does not want it shown.
    pub visible: bool,
}

/// Editor-side collaborator: dialogs, diagnostics, status and config refresh.
///
/// Implementations must not call back into the engine from these methods.
#[async_trait]
pub trait Host: Send + Sync {
    /// Presents `choices` to the user and waits for a pick.
    ///
    /// Returns `None` if the dialog was dismissed without a choice.
    async fn present_choice(&self, message: &str, choices: &[&str]) -> Option<String>;

    /// Shows an informational message.
    async fn show_message(&self, message: &str);

    /// Replaces the synthetic diagnostics of `uri`. An empty list clears them.
    async fn publish_diagnostics(&self, uri: &Url, diagnostics: Vec<TrustDiagnostic>);

    /// Renders the aggregated status.
    async fn show_status(&self, status: StatusDisplay);

    /// Asks the analysis process to re-fetch configuration, which makes it
    /// request confirmation again under the new decisions.
    async fn refresh_configuration(&self);
}
