//! [`Host`] implementation over an LSP client connection.

use async_trait::async_trait;
use tower_lsp::Client;
use tower_lsp::lsp_types::{MessageActionItem, MessageType, Url};
use tracing::{debug, error};

use lintgate_core::{Host, StatusDisplay, TrustDiagnostic};

use crate::conversion::to_lsp_diagnostic;
use crate::protocol::{DisplayStatus, DisplayStatusParams, ExecutionStateChanged};

/// Talks to the user through the editor on the other end of `client`.
pub struct LspHost {
    client: Client,
}

impl LspHost {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Host for LspHost {
    async fn present_choice(&self, message: &str, choices: &[&str]) -> Option<String> {
        let actions = choices
            .iter()
            .map(|title| MessageActionItem {
                title: title.to_string(),
                properties: Default::default(),
            })
            .collect();

        match self
            .client
            .show_message_request(MessageType::WARNING, message, Some(actions))
            .await
        {
            Ok(choice) => choice.map(|item| item.title),
            Err(e) => {
                // A failed dialog counts as dismissed.
                error!("Choice dialog failed: {}", e);
                None
            }
        }
    }

    async fn show_message(&self, message: &str) {
        self.client.show_message(MessageType::INFO, message).await;
    }

    async fn publish_diagnostics(&self, uri: &Url, diagnostics: Vec<TrustDiagnostic>) {
        let diagnostics = diagnostics.iter().map(to_lsp_diagnostic).collect();
        self.client
            .publish_diagnostics(uri.clone(), diagnostics, None)
            .await;
    }

    async fn show_status(&self, status: StatusDisplay) {
        debug!("Display status: {:?}", status);
        self.client
            .send_notification::<DisplayStatus>(DisplayStatusParams::from(status))
            .await;
    }

    async fn refresh_configuration(&self) {
        self.client
            .send_notification::<ExecutionStateChanged>(())
            .await;
    }
}
