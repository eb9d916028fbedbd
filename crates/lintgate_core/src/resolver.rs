//! Confirmation decision resolution.

use std::collections::HashSet;

use crate::store::ExecutionStateStore;
use crate::types::{ConfirmationResult, ExecutionParams};

/// Decides whether a library may execute.
///
/// Precedence: session-disabled, then the stored per-library decision, then
/// the always-allow flag. Anything else still needs the user.
pub fn resolve(
    params: &ExecutionParams,
    store: &ExecutionStateStore,
    disabled: &HashSet<String>,
) -> ConfirmationResult {
    if disabled.contains(&params.library_path) {
        return ConfirmationResult::Disabled;
    }

    match store.get(&params.library_path) {
        Some(true) => ConfirmationResult::Approved,
        Some(false) => ConfirmationResult::Denied,
        None if store.always_allow() => ConfirmationResult::Approved,
        None => ConfirmationResult::ConfirmationPending,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ExecutionScope;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    const LIB: &str = "/proj/node_modules/linter";

    fn params() -> ExecutionParams {
        ExecutionParams::new(ExecutionScope::Local, LIB)
    }

    #[rstest]
    #[case::nothing_known(None, false, false, ConfirmationResult::ConfirmationPending)]
    #[case::stored_yes(Some(true), false, false, ConfirmationResult::Approved)]
    #[case::stored_no(Some(false), false, false, ConfirmationResult::Denied)]
    #[case::always_allow(None, true, false, ConfirmationResult::Approved)]
    #[case::stored_no_beats_always_allow(Some(false), true, false, ConfirmationResult::Denied)]
    #[case::disabled_beats_stored_yes(Some(true), false, true, ConfirmationResult::Disabled)]
    #[case::disabled_beats_always_allow(None, true, true, ConfirmationResult::Disabled)]
    fn test_resolve(
        #[case] stored: Option<bool>,
        #[case] always_allow: bool,
        #[case] is_disabled: bool,
        #[case] expected: ConfirmationResult,
    ) {
        let mut store = ExecutionStateStore::in_memory();
        if let Some(approved) = stored {
            store.set(LIB, approved).unwrap();
        }
        store.set_always_allow(always_allow).unwrap();

        let mut disabled = HashSet::new();
        if is_disabled {
            disabled.insert(LIB.to_string());
        }

        assert_eq!(resolve(&params(), &store, &disabled), expected);
    }
}
