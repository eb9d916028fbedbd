//! Manage-library-execution workflow.

use tracing::{debug, info};

use crate::aggregate;
use crate::engine::{Effects, TrustEngine, TrustState, log_persist};
use crate::types::{ConfirmationResult, ExecutionParams};

/// A choice the user can make for one library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionDecision {
    /// Approve every library without an explicit decision. This library's
    /// own decision is dropped so it follows the global flag.
    AllowEverywhere,
    Allow,
    Deny,
    /// Disable for the rest of this session only.
    Disable,
}

impl ExecutionDecision {
    /// Dialog order.
    pub const ALL: [ExecutionDecision; 4] = [
        ExecutionDecision::AllowEverywhere,
        ExecutionDecision::Allow,
        ExecutionDecision::Deny,
        ExecutionDecision::Disable,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ExecutionDecision::AllowEverywhere => "Allow Everywhere",
            ExecutionDecision::Allow => "Allow",
            ExecutionDecision::Deny => "Deny",
            ExecutionDecision::Disable => "Disable",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.label() == label)
    }
}

/// How a manage request ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManageOutcome {
    /// The user chose; `result` is what the library now resolves to.
    Decided {
        params: ExecutionParams,
        decision: ExecutionDecision,
        result: ConfirmationResult,
    },
    /// The dialog was closed without a choice. Nothing changed.
    Dismissed,
    /// No library was named and none is pending.
    NothingToManage,
}

impl TrustState {
    /// Library to ask about when the command carries no params.
    fn manage_target(&self) -> Option<ExecutionParams> {
        let from_active = self.active.as_ref().and_then(|active| {
            aggregate::status_for(active, &self.resources, &self.executions, &self.folders)
                .execution
        });

        from_active
            .and_then(|path| self.executions.get(&path))
            .or_else(|| {
                self.executions
                    .iter()
                    .find(|info| info.result == ConfirmationResult::ConfirmationPending)
            })
            .map(|info| info.params.clone())
    }

    fn apply_decision(
        &mut self,
        params: &ExecutionParams,
        decision: ExecutionDecision,
        effects: &mut Effects,
    ) -> ConfirmationResult {
        let path = params.library_path.as_str();
        match decision {
            ExecutionDecision::AllowEverywhere => {
                self.disabled.remove(path);
                log_persist(self.store.set_always_allow(true));
                log_persist(self.store.unset(path));
            }
            ExecutionDecision::Allow => {
                self.disabled.remove(path);
                log_persist(self.store.set(path, true));
            }
            ExecutionDecision::Deny => {
                self.disabled.remove(path);
                log_persist(self.store.set(path, false));
            }
            ExecutionDecision::Disable => {
                self.disabled.insert(path.to_string());
            }
        }
        self.session.insert(path.to_string(), params.clone());

        let result = self.resolve(params);
        self.record(params, result, None, effects);
        self.refresh(effects);
        result
    }
}

impl TrustEngine {
    /// Asks the user what to do with a library and applies the answer.
    ///
    /// Without `params`, the library behind the active resource's status is
    /// used, or else the first library still awaiting confirmation.
    pub async fn manage_library_execution(
        &self,
        params: Option<ExecutionParams>,
    ) -> ManageOutcome {
        self.semaphore.lock(self.manage_locked(params)).await
    }

    /// Manage flow body; the caller holds the semaphore.
    pub(crate) async fn manage_locked(&self, params: Option<ExecutionParams>) -> ManageOutcome {
        let target = match params {
            Some(params) => Some(params),
            None => self.state.lock().manage_target(),
        };
        let Some(params) = target else {
            self.host
                .show_message("No linter library is waiting for an execution decision.")
                .await;
            return ManageOutcome::NothingToManage;
        };

        let message = format!(
            "The {} linter library '{}' wants to run. Running it may load plugins and \
             configuration from your workspace. Do you allow it to execute?",
            params.scope, params.library_path
        );
        let labels = ExecutionDecision::ALL.map(ExecutionDecision::label);

        let choice = self.host.present_choice(&message, &labels).await;
        let Some(decision) = choice.as_deref().and_then(ExecutionDecision::from_label) else {
            debug!(
                "Execution dialog for '{}' dismissed without a choice",
                params.library_path
            );
            return ManageOutcome::Dismissed;
        };

        let mut effects = Effects::default();
        let result = self
            .state
            .lock()
            .apply_decision(&params, decision, &mut effects);

        info!(
            "Library '{}': {} -> {}",
            params.library_path,
            decision.label(),
            result
        );
        self.apply(effects).await;
        self.host.refresh_configuration().await;

        ManageOutcome::Decided {
            params,
            decision,
            result,
        }
    }
}
