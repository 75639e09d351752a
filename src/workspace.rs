//! Per-repository workspace: staging area, tracked digests, branch and remote.
//!
//! A [`Workspace`] keeps the state in memory and flushes it through its
//! storage backend after every mutation, so the on-disk file always matches
//! what the caller last observed.

mod diff;
mod paths;
mod settings;
mod stash;
mod worktree;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::digest;
use crate::error::{IoResultExt, Result, WorkspaceError};
use crate::storage::{FilesystemStorage, MutableState, State, StorageBackend};

pub use paths::normalize;

/// Result of a successful commit. Purely local; nothing is sent anywhere.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CommitRecord {
    /// Short display label, see [`digest::commit_id`]
    pub id: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub branch: String,
    /// Paths moved from staging into tracked_files, sorted
    pub files: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

pub struct Workspace {
    name: String,
    storage: FilesystemStorage,
    state: State,
}

impl Workspace {
    /// Create the workspace directories if needed and load persisted state.
    /// A directory that was never used before yields a fresh state.
    pub fn open(name: &str, dir: PathBuf, default_branch: &str) -> Result<Self> {
        fs::create_dir_all(&dir).at(&dir)?;
        let storage = FilesystemStorage::new(&dir, default_branch);
        storage.initialize()?;
        let state = storage.read_state()?;

        tracing::debug!(
            "opened workspace {} at {:?} (branch {}, {} staged, {} tracked)",
            name,
            dir,
            state.current_branch,
            state.staging_area.len(),
            state.tracked_files.len()
        );

        Ok(Workspace {
            name: name.to_string(),
            storage,
            state,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The workspace directory on disk
    pub fn path(&self) -> &Path {
        self.storage.base_path()
    }

    #[allow(dead_code)]
    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn staging(&self) -> &BTreeMap<String, String> {
        &self.state.staging_area
    }

    pub fn tracked(&self) -> &BTreeMap<String, String> {
        &self.state.tracked_files
    }

    pub fn current_branch(&self) -> &str {
        &self.state.current_branch
    }

    pub fn remote_url(&self) -> Option<&str> {
        self.state.remote_url.as_deref()
    }

    fn persist(&self) -> Result<()> {
        self.storage.write_state(&self.state)
    }

    /// Apply `change` to a copy of the state, write the copy, and only then
    /// adopt it. An error from either step leaves memory and disk untouched.
    fn update<T, F>(&mut self, change: F) -> Result<T>
    where
        F: FnOnce(&mut State) -> Result<T>,
    {
        let mut next = self.state.clone();
        let value = change(&mut next)?;
        self.storage.write_state(&next)?;
        self.state = next;
        Ok(value)
    }

    /// Insert or overwrite `path` in the staging area. Returns the normalized path.
    pub fn stage(&mut self, path: &str, content: impl Into<String>) -> Result<String> {
        let path = normalize(path)?;
        let content = content.into();
        self.update(|state| {
            state.staging_area.insert(path.clone(), content);
            Ok(())
        })?;
        tracing::info!("staged {} in {}", path, self.name);
        Ok(path)
    }

    /// Remove `path` from the staging area. Absent paths are not an error;
    /// the return value says whether anything was removed.
    pub fn unstage(&mut self, path: &str) -> Result<bool> {
        let path = normalize(path)?;
        let removed = self.update(|state| Ok(state.staging_area.remove(&path).is_some()))?;
        if removed {
            tracing::info!("unstaged {} in {}", path, self.name);
        }
        Ok(removed)
    }

    /// Like [`Workspace::unstage`] but fails with `NotFound` for unstaged paths
    pub fn unstage_strict(&mut self, path: &str) -> Result<()> {
        let normalized = normalize(path)?;
        if !self.state.staging_area.contains_key(&normalized) {
            return Err(WorkspaceError::NotFound(normalized));
        }
        self.unstage(&normalized).map(|_| ())
    }

    /// Empty the staging area; returns how many entries were dropped
    pub fn clear_staging(&mut self) -> Result<usize> {
        self.update(|state| Ok(std::mem::take(&mut state.staging_area).len()))
    }

    /// Move every staged path into tracked_files and empty the staging area
    pub fn commit(&mut self, message: &str, description: Option<&str>) -> Result<CommitRecord> {
        self.commit_at(message, description, Utc::now())
    }

    fn commit_at(
        &mut self,
        message: &str,
        description: Option<&str>,
        timestamp: DateTime<Utc>,
    ) -> Result<CommitRecord> {
        let files = self.update(|state| {
            if state.staging_area.is_empty() {
                return Err(WorkspaceError::EmptyCommit);
            }
            let staged = std::mem::take(&mut state.staging_area);
            let files: Vec<String> = staged.keys().cloned().collect();
            for (path, content) in staged {
                let digest = digest::content_digest(content.as_bytes());
                state.tracked_files.insert(path, digest);
            }
            Ok(files)
        })?;

        let record = CommitRecord {
            id: digest::commit_id(message, &timestamp),
            message: message.to_string(),
            description: description
                .filter(|d| !d.trim().is_empty())
                .map(str::to_string),
            branch: self.state.current_branch.clone(),
            files,
            timestamp,
        };

        tracing::info!(
            "committed {} file(s) to {} as {}",
            record.files.len(),
            record.branch,
            record.id
        );
        Ok(record)
    }

    /// Change the active branch name. Staged and tracked maps are shared by all branches.
    pub fn switch_branch(&mut self, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() || name.chars().any(char::is_whitespace) {
            return Err(WorkspaceError::InvalidBranch(name.to_string()));
        }

        self.update(|state| {
            state.current_branch = name.to_string();
            Ok(())
        })?;
        tracing::info!("switched {} to branch {}", self.name, name);
        Ok(())
    }

    pub fn set_remote(&mut self, url: &str) -> Result<()> {
        let url = url.trim();
        if url.is_empty() {
            return Err(WorkspaceError::InvalidRemote(url.to_string()));
        }

        self.update(|state| {
            state.remote_url = Some(url.to_string());
            Ok(())
        })
    }

    /// Forget the remote; returns the URL that was configured, if any
    pub fn remove_remote(&mut self) -> Result<Option<String>> {
        self.update(|state| Ok(state.remote_url.take()))
    }
}
