//! # lintgate_core
//!
//! Decides whether a discovered linter library may execute, remembers the
//! decision, and aggregates one status across open resources.
//!
//! This crate provides:
//! - The [`TrustEngine`] context object driving every operation
//! - The durable [`ExecutionStateStore`]
//! - The pure [`resolver::resolve`] decision function
//! - Execution and resource registries with status aggregation
//! - The manage and reset workflows, talking to the user through [`Host`]
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use lintgate_core::{ConfirmExecutionParams, ExecutionStateStore, LintgateConfig, TrustEngine};
//!
//! let store = ExecutionStateStore::open(ExecutionStateStore::default_path()?)?;
//! let engine = Arc::new(TrustEngine::new(host, store, LintgateConfig::new()));
//!
//! let result = engine.confirm_execution(params).await;
//! ```

pub mod aggregate;
mod config;
pub mod diagnostics;
mod engine;
mod error;
mod host;
mod manage;
pub mod registry;
mod reset;
pub mod resolver;
pub mod semaphore;
mod store;
mod types;
pub mod workspace;

pub use aggregate::Aggregate;
pub use config::LintgateConfig;
pub use diagnostics::{MANAGE_COMMAND, MarkedResource, RESET_COMMAND, TrustDiagnostic};
pub use engine::TrustEngine;
pub use error::TrustError;
pub use host::{Host, StatusDisplay};
pub use manage::{ExecutionDecision, ManageOutcome};
pub use registry::{ExecutionInfo, ResourceInfo};
pub use reset::{ResetOutcome, ResetScope};
pub use store::{ExecutionState, ExecutionStateStore};
pub use types::{
    ConfirmExecutionParams, ConfirmationResult, ExecutionParams, ExecutionScope, Status,
    StatusParams,
};

pub use url::Url;
