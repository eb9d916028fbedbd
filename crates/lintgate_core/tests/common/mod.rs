#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use lintgate_core::{
    ConfirmExecutionParams, ExecutionScope, ExecutionStateStore, Host, LintgateConfig,
    StatusDisplay, TrustDiagnostic, TrustEngine, Url,
};

pub const LIB: &str = "/proj/node_modules/linter";
pub const OTHER_LIB: &str = "/proj/packages/ui/node_modules/linter";

/// Host that answers dialogs from a queue and records everything else.
#[derive(Default)]
pub struct ScriptedHost {
    answers: Mutex<VecDeque<Option<String>>>,
    pub prompts: Mutex<Vec<(String, Vec<String>)>>,
    pub messages: Mutex<Vec<String>>,
    pub published: Mutex<Vec<(Url, Vec<TrustDiagnostic>)>>,
    pub statuses: Mutex<Vec<StatusDisplay>>,
    refreshes: AtomicUsize,
}

impl ScriptedHost {
    /// Queues the next dialog answer; `None` dismisses the dialog.
    pub fn answer(&self, choice: Option<&str>) {
        self.answers.lock().push_back(choice.map(str::to_string));
    }

    /// Diagnostics currently shown on `uri`.
    pub fn diagnostics_for(&self, uri: &Url) -> Vec<TrustDiagnostic> {
        self.published
            .lock()
            .iter()
            .rev()
            .find(|(u, _)| u == uri)
            .map(|(_, d)| d.clone())
            .unwrap_or_default()
    }

    pub fn last_status(&self) -> Option<StatusDisplay> {
        self.statuses.lock().last().copied()
    }

    pub fn refresh_count(&self) -> usize {
        self.refreshes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Host for ScriptedHost {
    async fn present_choice(&self, message: &str, choices: &[&str]) -> Option<String> {
        self.prompts.lock().push((
            message.to_string(),
            choices.iter().map(|c| c.to_string()).collect(),
        ));
        self.answers.lock().pop_front().flatten()
    }

    async fn show_message(&self, message: &str) {
        self.messages.lock().push(message.to_string());
    }

    async fn publish_diagnostics(&self, uri: &Url, diagnostics: Vec<TrustDiagnostic>) {
        self.published.lock().push((uri.clone(), diagnostics));
    }

    async fn show_status(&self, status: StatusDisplay) {
        self.statuses.lock().push(status);
    }

    async fn refresh_configuration(&self) {
        self.refreshes.fetch_add(1, Ordering::SeqCst);
    }
}

pub fn url(s: &str) -> Url {
    Url::parse(s).unwrap()
}

pub fn request(library_path: &str, uri: &str) -> ConfirmExecutionParams {
    ConfirmExecutionParams {
        scope: ExecutionScope::Local,
        library_path: library_path.to_string(),
        uri: url(uri),
    }
}

pub fn engine_with(store: ExecutionStateStore) -> (Arc<TrustEngine>, Arc<ScriptedHost>) {
    let host = Arc::new(ScriptedHost::default());
    let engine = Arc::new(TrustEngine::new(
        host.clone(),
        store,
        LintgateConfig::new(),
    ));
    engine.set_workspace_folders([url("file:///proj")]);
    (engine, host)
}

pub fn engine() -> (Arc<TrustEngine>, Arc<ScriptedHost>) {
    engine_with(ExecutionStateStore::in_memory())
}
