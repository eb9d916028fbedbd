//! Workspace folder membership.

use url::Url;

/// Top-level project roots known to the host.
#[derive(Debug, Clone, Default)]
pub struct WorkspaceFolders {
    folders: Vec<Url>,
}

impl WorkspaceFolders {
    pub fn new(folders: impl IntoIterator<Item = Url>) -> Self {
        let mut this = Self::default();
        for folder in folders {
            this.add(folder);
        }
        this
    }

    pub fn add(&mut self, folder: Url) {
        if !self.folders.contains(&folder) {
            self.folders.push(folder);
        }
    }

    pub fn remove(&mut self, folder: &Url) {
        self.folders.retain(|f| f != folder);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Url> {
        self.folders.iter()
    }

    /// Returns the innermost folder containing `resource`.
    pub fn folder_of(&self, resource: &Url) -> Option<&Url> {
        self.folders
            .iter()
            .filter(|folder| contains(folder, resource))
            .max_by_key(|folder| folder.path().trim_end_matches('/').len())
    }
}

fn contains(folder: &Url, resource: &Url) -> bool {
    if folder.scheme() != resource.scheme() || folder.host_str() != resource.host_str() {
        return false;
    }
    let root = folder.path().trim_end_matches('/');
    let path = resource.path();
    path == root || path.strip_prefix(root).is_some_and(|rest| rest.starts_with('/'))
}
