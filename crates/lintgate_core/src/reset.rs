//! Reset / bulk-clear workflow.

use tracing::info;

use crate::engine::{Effects, TrustEngine, log_persist};
use crate::manage::ManageOutcome;
use crate::types::ExecutionParams;

/// Granularity of a reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetScope {
    /// Libraries decided during this session only.
    Session,
    /// Every stored decision and the always-allow flag.
    All,
    /// Just the always-allow flag.
    AlwaysAllow,
}

impl ResetScope {
    pub fn label(self) -> &'static str {
        match self {
            ResetScope::Session => "Reset Session Decisions",
            ResetScope::All => "Reset All Decisions",
            ResetScope::AlwaysAllow => "Reset Always Allow",
        }
    }

    fn from_label(label: &str) -> Option<Self> {
        [ResetScope::Session, ResetScope::All, ResetScope::AlwaysAllow]
            .into_iter()
            .find(|scope| scope.label() == label)
    }
}

/// How a reset request ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResetOutcome {
    Reset {
        scope: ResetScope,
        /// Outcome of the immediate re-ask when exactly one session library existed.
        reasked: Option<ManageOutcome>,
    },
    Dismissed,
}

impl TrustEngine {
    /// Asks which decisions to forget, then forgets them.
    ///
    /// Only applicable scopes are offered: session decisions when there are
    /// any, always-allow when it is set.
    pub async fn reset_library_execution(&self) -> ResetOutcome {
        self.semaphore
            .lock(async {
                let scopes = {
                    let state = self.state.lock();
                    let mut scopes = Vec::new();
                    if !state.session.is_empty() {
                        scopes.push(ResetScope::Session);
                    }
                    scopes.push(ResetScope::All);
                    if state.store.always_allow() {
                        scopes.push(ResetScope::AlwaysAllow);
                    }
                    scopes
                };
                let labels: Vec<&str> = scopes.iter().map(|scope| scope.label()).collect();

                let choice = self
                    .host
                    .present_choice(
                        "Which library execution decisions should be reset?",
                        &labels,
                    )
                    .await;
                match choice.as_deref().and_then(ResetScope::from_label) {
                    Some(scope) => self.reset_locked(scope).await,
                    None => ResetOutcome::Dismissed,
                }
            })
            .await
    }

    /// Resets `scope` without asking; for callers that already confirmed.
    pub async fn reset(&self, scope: ResetScope) -> ResetOutcome {
        self.semaphore.lock(self.reset_locked(scope)).await
    }

    async fn reset_locked(&self, scope: ResetScope) -> ResetOutcome {
        let mut effects = Effects::default();
        let reask = {
            let mut state = self.state.lock();
            let mut reask: Option<ExecutionParams> = None;

            match scope {
                ResetScope::Session => {
                    let decided = std::mem::take(&mut state.session);
                    for path in decided.keys() {
                        log_persist(state.store.unset(path));
                    }
                    if decided.len() == 1 {
                        reask = decided.into_values().next();
                    }
                }
                ResetScope::All => {
                    log_persist(state.store.clear_all());
                    state.session.clear();
                }
                ResetScope::AlwaysAllow => {
                    log_persist(state.store.set_always_allow(false));
                }
            }

            state.wipe(&mut effects);
            reask
        };

        info!("Reset library execution decisions: {}", scope.label());
        self.apply(effects).await;
        self.host.refresh_configuration().await;

        let reasked = match reask {
            Some(params) => Some(self.manage_locked(Some(params)).await),
            None => None,
        };

        ResetOutcome::Reset { scope, reasked }
    }
}
