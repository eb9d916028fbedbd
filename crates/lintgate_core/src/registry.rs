//! Execution info and resource status registries.

use std::collections::HashMap;

use url::Url;

use crate::types::{ConfirmationResult, ExecutionParams, Status};

/// Latest decision for one library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionInfo {
    pub params: ExecutionParams,
    pub result: ConfirmationResult,
    /// Resource currently carrying this library's pending diagnostic.
    pub marked_resource: Option<Url>,
}

/// libraryPath -> ExecutionInfo, with a workspace folder index.
///
/// Iteration follows insertion order.
#[derive(Debug, Default)]
pub struct ExecutionRegistry {
    infos: HashMap<String, ExecutionInfo>,
    order: Vec<String>,
    by_folder: HashMap<Url, Vec<String>>,
}

impl ExecutionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the entry for `params.library_path` or updates its result.
    ///
    /// A new entry is indexed under `folder` when one is given.
    pub fn upsert(
        &mut self,
        params: &ExecutionParams,
        result: ConfirmationResult,
        folder: Option<&Url>,
    ) -> &ExecutionInfo {
        let key = params.library_path.clone();
        if !self.infos.contains_key(&key) {
            self.order.push(key.clone());
            if let Some(folder) = folder {
                self.by_folder
                    .entry(folder.clone())
                    .or_default()
                    .push(key.clone());
            }
        }

        let info = self
            .infos
            .entry(key)
            .or_insert_with(|| ExecutionInfo {
                params: params.clone(),
                result,
                marked_resource: None,
            });
        info.result = result;
        info
    }

    pub fn get(&self, library_path: &str) -> Option<&ExecutionInfo> {
        self.infos.get(library_path)
    }

    pub fn get_mut(&mut self, library_path: &str) -> Option<&mut ExecutionInfo> {
        self.infos.get_mut(library_path)
    }

    pub fn len(&self) -> usize {
        self.infos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.infos.is_empty()
    }

    /// Every known library, in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &ExecutionInfo> {
        self.order.iter().filter_map(|key| self.infos.get(key))
    }

    /// Libraries first requested from a resource inside `folder`.
    pub fn in_folder<'a>(&'a self, folder: &Url) -> impl Iterator<Item = &'a ExecutionInfo> {
        self.by_folder
            .get(folder)
            .into_iter()
            .flatten()
            .filter_map(|key| self.infos.get(key))
    }

    pub fn has_folder(&self, folder: &Url) -> bool {
        self.by_folder.contains_key(folder)
    }

    pub fn clear(&mut self) {
        self.infos.clear();
        self.order.clear();
        self.by_folder.clear();
    }
}

/// Last known status of one open resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceInfo {
    pub status: Status,
    /// Library this resource's status derives from, if any.
    pub execution: Option<String>,
}

/// resource URI -> ResourceInfo.
#[derive(Debug, Default)]
pub struct ResourceRegistry {
    resources: HashMap<Url, ResourceInfo>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates or updates the status of `uri`, keeping any existing link.
    pub fn set_status(&mut self, uri: &Url, status: Status) {
        self.resources
            .entry(uri.clone())
            .and_modify(|info| info.status = status)
            .or_insert(ResourceInfo {
                status,
                execution: None,
            });
    }

    /// Associates `uri` with a library so later queries resolve directly.
    pub fn link(&mut self, uri: &Url, library_path: &str) {
        if let Some(info) = self.resources.get_mut(uri) {
            info.execution = Some(library_path.to_string());
        }
    }

    /// Pushes a new status to every resource linked to `library_path`.
    pub fn update_linked(&mut self, library_path: &str, status: Status) {
        for info in self.resources.values_mut() {
            if info.execution.as_deref() == Some(library_path) {
                info.status = status;
            }
        }
    }

    pub fn get(&self, uri: &Url) -> Option<&ResourceInfo> {
        self.resources.get(uri)
    }

    pub fn remove(&mut self, uri: &Url) -> Option<ResourceInfo> {
        self.resources.remove(uri)
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn clear(&mut self) {
        self.resources.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ExecutionScope;
    use pretty_assertions::assert_eq;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    fn params(path: &str) -> ExecutionParams {
        ExecutionParams::new(ExecutionScope::Local, path)
    }

    #[test]
    fn test_upsert_creates_once_and_updates_in_place() {
        let mut registry = ExecutionRegistry::new();
        let folder = url("file:///proj");

        registry.upsert(
            &params("/lib"),
            ConfirmationResult::ConfirmationPending,
            Some(&folder),
        );
        registry.upsert(&params("/lib"), ConfirmationResult::Approved, Some(&folder));

        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.get("/lib").unwrap().result,
            ConfirmationResult::Approved
        );
        assert_eq!(registry.in_folder(&folder).count(), 1);
    }

    #[test]
    fn test_upsert_without_folder_is_not_indexed() {
        let mut registry = ExecutionRegistry::new();
        registry.upsert(&params("/lib"), ConfirmationResult::Denied, None);

        assert_eq!(registry.iter().count(), 1);
        assert!(!registry.has_folder(&url("file:///proj")));
    }

    #[test]
    fn test_iter_keeps_insertion_order() {
        let mut registry = ExecutionRegistry::new();
        for path in ["/c", "/a", "/b"] {
            registry.upsert(&params(path), ConfirmationResult::Approved, None);
        }

        let paths: Vec<_> = registry
            .iter()
            .map(|info| info.params.library_path.as_str())
            .collect();
        assert_eq!(paths, vec!["/c", "/a", "/b"]);
    }

    #[test]
    fn test_resource_link_and_propagation() {
        let mut resources = ResourceRegistry::new();
        let a = url("file:///proj/a.js");
        let b = url("file:///proj/b.js");

        resources.set_status(&a, Status::ConfirmationPending);
        resources.link(&a, "/lib");
        resources.set_status(&b, Status::Warn);

        resources.update_linked("/lib", Status::Ok);

        assert_eq!(resources.get(&a).unwrap().status, Status::Ok);
        assert_eq!(resources.get(&b).unwrap().status, Status::Warn);

        resources.set_status(&a, Status::Error);
        assert_eq!(
            resources.get(&a).unwrap().execution.as_deref(),
            Some("/lib")
        );
    }

    #[test]
    fn test_link_requires_existing_resource() {
        let mut resources = ResourceRegistry::new();
        let a = url("file:///proj/a.js");
        resources.link(&a, "/lib");
        assert!(resources.get(&a).is_none());
    }

    #[test]
    fn test_clear_wipes_everything() {
        let mut registry = ExecutionRegistry::new();
        let folder = url("file:///proj");
        registry.upsert(&params("/lib"), ConfirmationResult::Approved, Some(&folder));

        registry.clear();

        assert!(registry.is_empty());
        assert_eq!(registry.in_folder(&folder).count(), 0);
    }
}
