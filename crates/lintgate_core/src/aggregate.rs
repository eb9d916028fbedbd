//! Status aggregation for display.
//!
//! A resource with its own [`ResourceInfo`](crate::registry::ResourceInfo)
//! reports that status. Otherwise the libraries of the resource's workspace
//! folder are scanned, and failing that every known library.

use url::Url;

use crate::registry::{ExecutionInfo, ExecutionRegistry, ResourceRegistry};
use crate::types::{ConfirmationResult, Status};
use crate::workspace::WorkspaceFolders;

/// Status to display for a resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregate {
    pub status: Status,
    /// `true` when the status is the resource's own, not a fallback scan.
    pub directly_linked: bool,
    /// Library behind the status, when one can be named.
    pub execution: Option<String>,
}

impl Aggregate {
    fn unknown() -> Self {
        Self {
            status: Status::Ok,
            directly_linked: false,
            execution: None,
        }
    }
}

/// Computes the status to display for `resource`.
pub fn status_for(
    resource: &Url,
    resources: &ResourceRegistry,
    executions: &ExecutionRegistry,
    folders: &WorkspaceFolders,
) -> Aggregate {
    if let Some(info) = resources.get(resource) {
        return Aggregate {
            status: info.status,
            directly_linked: true,
            execution: info.execution.clone(),
        };
    }

    match folders.folder_of(resource) {
        Some(folder) if executions.has_folder(folder) => reduce(executions.in_folder(folder)),
        _ => reduce(executions.iter()),
    }
}

/// Status across every known library, for when no resource is active.
pub fn overall(executions: &ExecutionRegistry) -> Aggregate {
    reduce(executions.iter())
}

/// Pending wins outright; otherwise the last denied or disabled library wins.
fn reduce<'a>(candidates: impl Iterator<Item = &'a ExecutionInfo>) -> Aggregate {
    let mut aggregate = Aggregate::unknown();

    for info in candidates {
        match info.result {
            ConfirmationResult::ConfirmationPending => {
                return Aggregate {
                    status: Status::ConfirmationPending,
                    directly_linked: false,
                    execution: Some(info.params.library_path.clone()),
                };
            }
            ConfirmationResult::Denied | ConfirmationResult::Disabled => {
                aggregate.status = Status::from(info.result);
                aggregate.execution = Some(info.params.library_path.clone());
            }
            ConfirmationResult::Approved => {}
        }
    }

    aggregate
}
