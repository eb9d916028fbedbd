//! The trust engine: one context object owning every registry.
//!
//! All shared state sits behind a single `parking_lot::Mutex` that is never
//! held across an `.await`. Work is split into a synchronous step that
//! mutates state and collects [`Effects`], followed by an async step that
//! hands those effects to the [`Host`].

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, error, info, warn};
use url::Url;

use crate::TrustError;
use crate::aggregate::{self, Aggregate};
use crate::config::LintgateConfig;
use crate::diagnostics::{DiagnosticsSurface, MarkedResource, TrustDiagnostic};
use crate::host::{Host, StatusDisplay};
use crate::registry::{ExecutionInfo, ExecutionRegistry, ResourceInfo, ResourceRegistry};
use crate::resolver;
use crate::semaphore::ConfirmationSemaphore;
use crate::store::ExecutionStateStore;
use crate::types::{
    ConfirmExecutionParams, ConfirmationResult, ExecutionParams, Status, StatusParams,
};
use crate::workspace::WorkspaceFolders;

/// Host calls produced by a state change, replayed after the lock is released.
#[derive(Debug, Default)]
pub(crate) struct Effects {
    publish: Vec<(Url, Vec<TrustDiagnostic>)>,
    status: Option<StatusDisplay>,
}

/// Mutable state of one engine instance.
pub(crate) struct TrustState {
    pub(crate) store: ExecutionStateStore,
    pub(crate) config: LintgateConfig,
    /// Libraries disabled for this session.
    pub(crate) disabled: HashSet<String>,
    /// Libraries the user decided on during this session.
    pub(crate) session: BTreeMap<String, ExecutionParams>,
    pub(crate) executions: ExecutionRegistry,
    pub(crate) resources: ResourceRegistry,
    pub(crate) folders: WorkspaceFolders,
    pub(crate) surface: DiagnosticsSurface,
    pub(crate) active: Option<Url>,
}

impl TrustState {
    fn new(store: ExecutionStateStore, config: LintgateConfig) -> Self {
        Self {
            store,
            config,
            disabled: HashSet::new(),
            session: BTreeMap::new(),
            executions: ExecutionRegistry::new(),
            resources: ResourceRegistry::new(),
            folders: WorkspaceFolders::default(),
            surface: DiagnosticsSurface::new(),
            active: None,
        }
    }

    pub(crate) fn resolve(&self, params: &ExecutionParams) -> ConfirmationResult {
        resolver::resolve(params, &self.store, &self.disabled)
    }

    /// Records `result` for a library and pushes it to linked resources.
    pub(crate) fn record(
        &mut self,
        params: &ExecutionParams,
        result: ConfirmationResult,
        folder: Option<&Url>,
        effects: &mut Effects,
    ) {
        self.executions.upsert(params, result, folder);
        self.resources
            .update_linked(&params.library_path, Status::from(result));

        if result != ConfirmationResult::ConfirmationPending {
            let marked = self.surface.dispose_library(&params.library_path);
            self.dispose(marked, effects);
        }
    }

    pub(crate) fn dispose(&mut self, marked: Option<MarkedResource>, effects: &mut Effects) {
        let Some(marked) = marked else {
            return;
        };
        if let Some(info) = self.executions.get_mut(&marked.library_path) {
            info.marked_resource = None;
        }
        debug!("Clearing execution diagnostic on {}", marked.uri);
        effects.publish.push((marked.uri, Vec::new()));
    }

    /// Recomputes the status display and the active resource's diagnostic.
    pub(crate) fn refresh(&mut self, effects: &mut Effects) {
        if !self.config.show_pending_diagnostic {
            let marked = self.surface.dispose();
            self.dispose(marked, effects);
        }

        let Some(active) = self.active.clone() else {
            let aggregate = aggregate::overall(&self.executions);
            effects.status = Some(self.display(&aggregate));
            return;
        };

        let aggregate =
            aggregate::status_for(&active, &self.resources, &self.executions, &self.folders);

        if self.config.show_pending_diagnostic
            && aggregate.status == Status::ConfirmationPending
            && let Some(library_path) = aggregate.execution.as_deref()
            && !self.surface.is_marked(&active, library_path)
            && let Some(params) = self
                .executions
                .get(library_path)
                .map(|info| info.params.clone())
        {
            let previous = self.surface.mark(&active, library_path);
            self.dispose(previous, effects);
            if let Some(info) = self.executions.get_mut(library_path) {
                info.marked_resource = Some(active.clone());
            }
            debug!("Marking {} as awaiting confirmation of {}", active, library_path);
            effects
                .publish
                .push((active.clone(), vec![TrustDiagnostic::pending(&params)]));
        }

        effects.status = Some(self.display(&aggregate));
    }

    /// Wipes every session cache and registry after a reset.
    pub(crate) fn wipe(&mut self, effects: &mut Effects) {
        self.disabled.clear();
        let marked = self.surface.dispose();
        self.dispose(marked, effects);
        self.executions.clear();
        self.resources.clear();
        self.refresh(effects);
    }

    fn display(&self, aggregate: &Aggregate) -> StatusDisplay {
        StatusDisplay {
            status: aggregate.status,
            directly_linked: aggregate.directly_linked,
            visible: aggregate.status != Status::Ok || self.config.always_show_status,
        }
    }
}

/// Logs a failed store write; the in-memory decision stays in effect.
pub(crate) fn log_persist(result: Result<(), TrustError>) {
    if let Err(e) = result {
        warn!("Failed to persist execution decision: {}", e);
    }
}

/// Library execution trust engine.
pub struct TrustEngine {
    pub(crate) host: Arc<dyn Host>,
    pub(crate) state: Mutex<TrustState>,
    pub(crate) semaphore: ConfirmationSemaphore,
}

impl TrustEngine {
    /// Creates an engine over `store` reporting to `host`.
    pub fn new(host: Arc<dyn Host>, store: ExecutionStateStore, config: LintgateConfig) -> Self {
        Self {
            host,
            state: Mutex::new(TrustState::new(store, config)),
            semaphore: ConfirmationSemaphore::new(),
        }
    }

    /// Answers a `ConfirmExecution` request.
    ///
    /// Any error or panic while resolving denies execution.
    pub async fn confirm_execution(
        self: &Arc<Self>,
        params: ConfirmExecutionParams,
    ) -> ConfirmationResult {
        let engine = Arc::clone(self);
        let library_path = params.library_path.clone();

        let outcome = tokio::spawn(async move { engine.try_confirm_execution(params).await })
            .await
            .map_err(|e| TrustError::Internal(format!("confirmation task failed: {}", e)))
            .and_then(|result| result);

        outcome.unwrap_or_else(|e| {
            error!(
                "Confirmation of '{}' failed: {}. Denying execution.",
                library_path, e
            );
            ConfirmationResult::Denied
        })
    }

    /// Resolves a `ConfirmExecution` request, surfacing faults to the caller.
    pub async fn try_confirm_execution(
        &self,
        params: ConfirmExecutionParams,
    ) -> Result<ConfirmationResult, TrustError> {
        if params.library_path.trim().is_empty() {
            return Err(TrustError::invalid_params("libraryPath is empty"));
        }

        self.semaphore
            .lock(async {
                let execution = params.execution();
                let mut effects = Effects::default();

                let result = {
                    let mut state = self.state.lock();
                    let result = state.resolve(&execution);
                    let folder = state.folders.folder_of(&params.uri).cloned();

                    state.resources.set_status(&params.uri, Status::from(result));
                    state.resources.link(&params.uri, &execution.library_path);
                    state.record(&execution, result, folder.as_ref(), &mut effects);
                    state.refresh(&mut effects);
                    result
                };

                debug!(
                    "Execution of '{}' requested by {}: {}",
                    execution.library_path, params.uri, result
                );
                self.apply(effects).await;
                Ok(result)
            })
            .await
    }

    /// Records a `StatusNotification` from the analysis process.
    pub async fn handle_status(&self, params: StatusParams) {
        debug!("Status of {}: {:?}", params.uri, params.state);
        let mut effects = Effects::default();
        {
            let mut state = self.state.lock();
            state.resources.set_status(&params.uri, params.state);
            state.refresh(&mut effects);
        }
        self.apply(effects).await;
    }

    /// A resource was opened; it becomes the active one.
    pub async fn open_resource(&self, uri: Url) {
        self.set_active_resource(Some(uri)).await;
    }

    /// Focus moved to `uri`, or away from every resource.
    pub async fn set_active_resource(&self, uri: Option<Url>) {
        let mut effects = Effects::default();
        {
            let mut state = self.state.lock();
            if state.active == uri {
                return;
            }
            state.active = uri;
            state.refresh(&mut effects);
        }
        self.apply(effects).await;
    }

    /// A resource was closed; forget everything about it.
    pub async fn close_resource(&self, uri: &Url) {
        let mut effects = Effects::default();
        {
            let mut state = self.state.lock();
            state.resources.remove(uri);
            let marked = state.surface.dispose_resource(uri);
            state.dispose(marked, &mut effects);
            if state.active.as_ref() == Some(uri) {
                state.active = None;
            }
            state.refresh(&mut effects);
        }
        self.apply(effects).await;
    }

    /// Replaces the known workspace folders.
    pub fn set_workspace_folders(&self, folders: impl IntoIterator<Item = Url>) {
        self.state.lock().folders = WorkspaceFolders::new(folders);
    }

    pub fn add_workspace_folder(&self, folder: Url) {
        self.state.lock().folders.add(folder);
    }

    pub fn remove_workspace_folder(&self, folder: &Url) {
        self.state.lock().folders.remove(folder);
    }

    /// Swaps the decision store, e.g. once the workspace config is known.
    ///
    /// Everything resolved against the previous store is forgotten and the
    /// analysis process is asked to confirm again.
    pub async fn replace_store(&self, store: ExecutionStateStore) {
        self.semaphore
            .lock(async {
                if let Some(path) = store.path() {
                    info!("Using execution state at {}", path.display());
                }
                let mut effects = Effects::default();
                {
                    let mut state = self.state.lock();
                    state.store = store;
                    state.session.clear();
                    state.wipe(&mut effects);
                }
                self.apply(effects).await;
                self.host.refresh_configuration().await;
            })
            .await
    }

    /// Backing file of the current store, if any.
    pub fn store_path(&self) -> Option<PathBuf> {
        self.state.lock().store.path().map(Path::to_path_buf)
    }

    /// Applies new configuration and refreshes the surfaces.
    pub async fn set_config(&self, config: LintgateConfig) {
        let mut effects = Effects::default();
        {
            let mut state = self.state.lock();
            state.config = config;
            state.refresh(&mut effects);
        }
        self.apply(effects).await;
    }

    /// Aggregated status of `resource`.
    pub fn status_for(&self, resource: &Url) -> Aggregate {
        let state = self.state.lock();
        aggregate::status_for(resource, &state.resources, &state.executions, &state.folders)
    }

    /// Explicit stored decision for a library.
    pub fn stored_decision(&self, library_path: &str) -> Option<bool> {
        self.state.lock().store.get(library_path)
    }

    pub fn always_allow(&self) -> bool {
        self.state.lock().store.always_allow()
    }

    pub fn is_disabled(&self, library_path: &str) -> bool {
        self.state.lock().disabled.contains(library_path)
    }

    pub fn execution_info(&self, library_path: &str) -> Option<ExecutionInfo> {
        self.state.lock().executions.get(library_path).cloned()
    }

    pub fn resource_info(&self, uri: &Url) -> Option<ResourceInfo> {
        self.state.lock().resources.get(uri).cloned()
    }

    /// Resource and library currently carrying the pending diagnostic.
    pub fn live_diagnostic(&self) -> Option<MarkedResource> {
        self.state.lock().surface.live().cloned()
    }

    pub(crate) async fn apply(&self, effects: Effects) {
        for (uri, diagnostics) in effects.publish {
            self.host.publish_diagnostics(&uri, diagnostics).await;
        }
        if let Some(display) = effects.status {
            self.host.show_status(display).await;
        }
    }
}
