use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{Result, WorkspaceError};
use crate::workspace::Workspace;

/// Hands out one [`Workspace`] per repository name, rooted under a single
/// directory. Workspaces are opened lazily and cached for the registry's lifetime.
pub struct WorkspaceRegistry {
    root: PathBuf,
    default_branch: String,
    workspaces: HashMap<String, Workspace>,
}

impl WorkspaceRegistry {
    pub fn new<P: AsRef<Path>>(root: P, default_branch: impl Into<String>) -> Self {
        WorkspaceRegistry {
            root: root.as_ref().to_path_buf(),
            default_branch: default_branch.into(),
            workspaces: HashMap::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory name for a repository: `owner/repo` becomes `owner_repo`
    pub fn dir_name(repo: &str) -> Result<String> {
        let name = repo.trim().trim_end_matches('/').replace('/', "_");
        if name.is_empty() || name == "." || name == ".." || name.contains('\\') {
            return Err(WorkspaceError::InvalidPath(repo.to_string()));
        }
        Ok(name)
    }

    /// The cached workspace for `repo`, opening it on first use.
    /// Names that map to the same directory share one instance.
    pub fn open(&mut self, repo: &str) -> Result<&mut Workspace> {
        let dir_name = Self::dir_name(repo)?;
        match self.workspaces.entry(dir_name) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let dir = self.root.join(entry.key());
                let workspace = Workspace::open(repo, dir, &self.default_branch)?;
                Ok(entry.insert(workspace))
            }
        }
    }

    #[allow(dead_code)]
    pub fn is_open(&self, repo: &str) -> bool {
        Self::dir_name(repo).is_ok_and(|dir_name| self.workspaces.contains_key(&dir_name))
    }
}
