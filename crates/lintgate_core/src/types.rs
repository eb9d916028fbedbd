//! Wire and domain types shared by the engine and its adapters.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

/// How a library was located.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionScope {
    /// Resolved from a project-local installation.
    Local,
    /// Resolved from a machine-global installation.
    Global,
}

impl fmt::Display for ExecutionScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionScope::Local => f.write_str("local"),
            ExecutionScope::Global => f.write_str("global"),
        }
    }
}

/// Identifies a candidate library and how it was located.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionParams {
    pub scope: ExecutionScope,
    pub library_path: String,
}

impl ExecutionParams {
    pub fn new(scope: ExecutionScope, library_path: impl Into<String>) -> Self {
        Self {
            scope,
            library_path: library_path.into(),
        }
    }
}

/// Parameters of a `ConfirmExecution` request from the analysis process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmExecutionParams {
    pub scope: ExecutionScope,
    pub library_path: String,
    pub uri: Url,
}

impl ConfirmExecutionParams {
    /// The library identity, without the requesting resource.
    pub fn execution(&self) -> ExecutionParams {
        ExecutionParams::new(self.scope, self.library_path.clone())
    }
}

/// Answer to a `ConfirmExecution` request.
///
/// Serialized as its numeric protocol value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum ConfirmationResult {
    Denied = 1,
    ConfirmationPending = 2,
    Disabled = 3,
    Approved = 4,
}

impl From<ConfirmationResult> for u8 {
    fn from(value: ConfirmationResult) -> Self {
        value as u8
    }
}

impl TryFrom<u8> for ConfirmationResult {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(ConfirmationResult::Denied),
            2 => Ok(ConfirmationResult::ConfirmationPending),
            3 => Ok(ConfirmationResult::Disabled),
            4 => Ok(ConfirmationResult::Approved),
            other => Err(format!("unknown confirmation result: {other}")),
        }
    }
}

impl fmt::Display for ConfirmationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConfirmationResult::Denied => "denied",
            ConfirmationResult::ConfirmationPending => "confirmation pending",
            ConfirmationResult::Disabled => "disabled",
            ConfirmationResult::Approved => "approved",
        };
        f.write_str(name)
    }
}

/// Coarse per-resource status shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Status {
    Ok = 1,
    Warn = 2,
    Error = 3,
    ConfirmationPending = 4,
    ExecutionDisabled = 5,
    ExecutionDenied = 6,
}

impl From<ConfirmationResult> for Status {
    fn from(result: ConfirmationResult) -> Self {
        match result {
            ConfirmationResult::Approved => Status::Ok,
            ConfirmationResult::Denied => Status::ExecutionDenied,
            ConfirmationResult::Disabled => Status::ExecutionDisabled,
            ConfirmationResult::ConfirmationPending => Status::ConfirmationPending,
        }
    }
}

impl From<Status> for u8 {
    fn from(value: Status) -> Self {
        value as u8
    }
}

impl TryFrom<u8> for Status {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, String> {
        match value {
            1 => Ok(Status::Ok),
            2 => Ok(Status::Warn),
            3 => Ok(Status::Error),
            4 => Ok(Status::ConfirmationPending),
            5 => Ok(Status::ExecutionDisabled),
            6 => Ok(Status::ExecutionDenied),
            other => Err(format!("unknown status: {other}")),
        }
    }
}

/// Parameters of a `StatusNotification` from the analysis process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusParams {
    pub uri: Url,
    pub state: Status,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(ConfirmationResult::Approved, Status::Ok)]
    #[case(ConfirmationResult::Denied, Status::ExecutionDenied)]
    #[case(ConfirmationResult::Disabled, Status::ExecutionDisabled)]
    #[case(ConfirmationResult::ConfirmationPending, Status::ConfirmationPending)]
    fn test_result_maps_to_status(#[case] result: ConfirmationResult, #[case] expected: Status) {
        assert_eq!(Status::from(result), expected);
    }

    #[test]
    fn test_confirmation_result_wire_values() {
        assert_eq!(
            serde_json::to_string(&ConfirmationResult::Approved).unwrap(),
            "4"
        );
        let pending: ConfirmationResult = serde_json::from_str("2").unwrap();
        assert_eq!(pending, ConfirmationResult::ConfirmationPending);
        assert!(serde_json::from_str::<ConfirmationResult>("9").is_err());
    }

    #[test]
    fn test_confirm_params_from_json() {
        let json = r#"{
            "scope": "local",
            "libraryPath": "/proj/node_modules/linter",
            "uri": "file:///proj/a.js"
        }"#;
        let params: ConfirmExecutionParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.scope, ExecutionScope::Local);
        assert_eq!(
            params.execution(),
            ExecutionParams::new(ExecutionScope::Local, "/proj/node_modules/linter")
        );
    }

    #[test]
    fn test_status_params_from_json() {
        let params: StatusParams =
            serde_json::from_str(r#"{ "uri": "file:///proj/a.js", "state": 5 }"#).unwrap();
        assert_eq!(params.state, Status::ExecutionDisabled);
    }
}
