//! Durable store of library execution decisions.
//!
//! The store keeps everything in memory and, when file-backed, rewrites the
//! whole JSON document after every mutation. The in-memory value is updated
//! before the write, so a failed write still leaves the decision in effect for
//! the rest of the session.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::TrustError;

/// Per-library decisions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionState {
    #[serde(default)]
    pub libs: BTreeMap<String, bool>,
}

/// On-disk document layout.
#[derive(Debug, Default, Serialize, Deserialize)]
struct PersistedState {
    #[serde(rename = "libraryExecutionState", default)]
    execution: ExecutionState,
    #[serde(rename = "alwaysAllowExecution", default)]
    always_allow: bool,
}

/// Per-library yes/no decisions plus the global always-allow flag.
#[derive(Debug)]
pub struct ExecutionStateStore {
    /// Backing file, or `None` for a memory-only store.
    path: Option<PathBuf>,
    state: PersistedState,
}

impl ExecutionStateStore {
    /// Default file name inside the data directory.
    pub const FILE_NAME: &'static str = "execution-state.json";

    /// Creates a store that never touches the disk.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            state: PersistedState::default(),
        }
    }

    /// Opens a file-backed store. A missing file yields an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, TrustError> {
        let path = path.into();
        let state = if path.exists() {
            let content = fs::read_to_string(&path)
                .map_err(|e| TrustError::store(&path, format!("Failed to read: {}", e)))?;
            if content.trim().is_empty() {
                PersistedState::default()
            } else {
                serde_json::from_str(&content)
                    .map_err(|e| TrustError::store(&path, format!("Invalid JSON: {}", e)))?
            }
        } else {
            PersistedState::default()
        };

        debug!(
            "Opened execution state {} ({} libraries)",
            path.display(),
            state.execution.libs.len()
        );

        Ok(Self {
            path: Some(path),
            state,
        })
    }

    /// Default location of the store file.
    pub fn default_path() -> Result<PathBuf, TrustError> {
        let base = dirs::data_dir()
            .ok_or_else(|| TrustError::config("Data directory could not be resolved"))?;
        Ok(base.join("lintgate").join(Self::FILE_NAME))
    }

    /// Backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Gets the explicit decision for a library.
    pub fn get(&self, library_path: &str) -> Option<bool> {
        self.state.execution.libs.get(library_path).copied()
    }

    /// Records an explicit decision for a library.
    pub fn set(&mut self, library_path: &str, approved: bool) -> Result<(), TrustError> {
        self.state
            .execution
            .libs
            .insert(library_path.to_string(), approved);
        self.persist()
    }

    /// Forgets the explicit decision for a library.
    pub fn unset(&mut self, library_path: &str) -> Result<(), TrustError> {
        if self.state.execution.libs.remove(library_path).is_none() {
            return Ok(());
        }
        self.persist()
    }

    /// Returns the global always-allow flag.
    pub fn always_allow(&self) -> bool {
        self.state.always_allow
    }

    /// Sets the global always-allow flag.
    pub fn set_always_allow(&mut self, enabled: bool) -> Result<(), TrustError> {
        self.state.always_allow = enabled;
        self.persist()
    }

    /// Wipes every per-library decision and the always-allow flag.
    pub fn clear_all(&mut self) -> Result<(), TrustError> {
        self.state = PersistedState::default();
        info!("Cleared all library execution decisions");
        self.persist()
    }

    /// Snapshot of every stored decision.
    pub fn libraries(&self) -> &ExecutionState {
        &self.state.execution
    }

    fn persist(&self) -> Result<(), TrustError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .map_err(|e| TrustError::store(path, format!("Failed to create dir: {}", e)))?;
        }

        let json = serde_json::to_string_pretty(&self.state)
            .map_err(|e| TrustError::store(path, format!("Failed to serialize: {}", e)))?;

        let mut tmp = path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, json)
            .map_err(|e| TrustError::store(path, format!("Failed to write: {}", e)))?;
        fs::rename(&tmp, path)
            .map_err(|e| TrustError::store(path, format!("Failed to replace: {}", e)))?;

        debug!("Persisted execution state to {}", path.display());
        Ok(())
    }
}
