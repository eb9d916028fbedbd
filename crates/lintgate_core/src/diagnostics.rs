//! Synthetic "execution pending" diagnostic and its remediation command.
//!
//! At most one resource carries the diagnostic at any time. Marking a new
//! resource hands back the previously marked one so the caller can clear it
//! first.

use url::Url;

use crate::types::ExecutionParams;

/// Source reported on the synthetic diagnostic.
pub const DIAGNOSTIC_SOURCE: &str = "lintgate";
/// Code reported on the synthetic diagnostic.
pub const DIAGNOSTIC_CODE: &str = "library-execution";
/// Command that opens the manage dialog.
pub const MANAGE_COMMAND: &str = "lintgate.manageLibraryExecution";
/// Command that opens the reset dialog.
pub const RESET_COMMAND: &str = "lintgate.resetLibraryExecution";

/// Action attached to the diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Remediation {
    pub title: String,
    pub command: &'static str,
    pub params: ExecutionParams,
}

/// Warning anchored at the start of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustDiagnostic {
    pub message: String,
    pub source: &'static str,
    pub code: &'static str,
    pub remediation: Remediation,
}

impl TrustDiagnostic {
    pub fn pending(params: &ExecutionParams) -> Self {
        Self {
            message: format!(
                "The {} linter library '{}' has not been approved for execution yet.",
                params.scope, params.library_path
            ),
            source: DIAGNOSTIC_SOURCE,
            code: DIAGNOSTIC_CODE,
            remediation: Remediation {
                title: "Manage library execution".to_string(),
                command: MANAGE_COMMAND,
                params: params.clone(),
            },
        }
    }
}

/// The single live diagnostic/action pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkedResource {
    pub uri: Url,
    pub library_path: String,
}

/// Tracks which resource currently holds the pending diagnostic.
#[derive(Debug, Default)]
pub struct DiagnosticsSurface {
    live: Option<MarkedResource>,
}

impl DiagnosticsSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live(&self) -> Option<&MarkedResource> {
        self.live.as_ref()
    }

    /// Whether `uri` already carries the diagnostic for `library_path`.
    pub fn is_marked(&self, uri: &Url, library_path: &str) -> bool {
        self.live
            .as_ref()
            .is_some_and(|m| &m.uri == uri && m.library_path == library_path)
    }

    /// Marks `uri`, returning the pair that must be disposed first.
    pub fn mark(&mut self, uri: &Url, library_path: &str) -> Option<MarkedResource> {
        self.live.replace(MarkedResource {
            uri: uri.clone(),
            library_path: library_path.to_string(),
        })
    }

    /// Disposes the live pair unconditionally.
    pub fn dispose(&mut self) -> Option<MarkedResource> {
        self.live.take()
    }

    /// Disposes the live pair if it belongs to `library_path`.
    pub fn dispose_library(&mut self, library_path: &str) -> Option<MarkedResource> {
        if self
            .live
            .as_ref()
            .is_some_and(|m| m.library_path == library_path)
        {
            self.live.take()
        } else {
            None
        }
    }

    /// Disposes the live pair if it sits on `uri`.
    pub fn dispose_resource(&mut self, uri: &Url) -> Option<MarkedResource> {
        if self.live.as_ref().is_some_and(|m| &m.uri == uri) {
            self.live.take()
        } else {
            None
        }
    }
}
