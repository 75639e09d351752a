use serde::{de::DeserializeOwned, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use super::traits::{MutableState, SettingsStore, StashStore, StorageBackend};
use super::{StashEntry, State};
use crate::error::{IoResultExt, Result, WorkspaceError};

/// Hidden directory inside a workspace that holds its metadata
pub const META_DIR: &str = ".git-workspace";

/// Filesystem-based storage backend: one JSON document per concern under META_DIR
pub struct FilesystemStorage {
    base_path: PathBuf,
    default_branch: String,
}

impl FilesystemStorage {
    /// Create a new filesystem storage backend rooted at a workspace directory
    pub fn new<P: AsRef<Path>>(base_path: P, default_branch: impl Into<String>) -> Self {
        FilesystemStorage {
            base_path: base_path.as_ref().to_path_buf(),
            default_branch: default_branch.into(),
        }
    }

    /// The workspace directory
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn meta_dir(&self) -> PathBuf {
        self.base_path.join(META_DIR)
    }

    /// Get the path to the state file
    pub fn state_path(&self) -> PathBuf {
        self.meta_dir().join("state.json")
    }

    fn stash_path(&self) -> PathBuf {
        self.meta_dir().join("stash.json")
    }

    fn settings_path(&self) -> PathBuf {
        self.meta_dir().join("config.json")
    }

    /// Read and parse a JSON document; `Ok(None)` when the file does not exist
    fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e).at(path),
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| WorkspaceError::CorruptState {
                path: path.to_path_buf(),
                source,
            })
    }

    fn write_json<T: Serialize + ?Sized>(&self, path: &Path, value: &T, what: &'static str) -> Result<()> {
        let json = serde_json::to_string_pretty(value)
            .map_err(|source| WorkspaceError::Serialize { what, source })?;

        // 1. Write to a temp file in the same directory
        let meta_dir = self.meta_dir();
        let mut temp = NamedTempFile::new_in(&meta_dir).at(&meta_dir)?;
        temp.write_all(json.as_bytes()).at(temp.path())?;
        temp.as_file().sync_all().at(path)?;

        // 2. Atomic rename (atomic on POSIX systems)
        temp.persist(path).map_err(|e| e.error).at(path)?;

        tracing::debug!("wrote {} to {:?}", what, path);
        Ok(())
    }
}

impl MutableState for FilesystemStorage {
    fn read_state(&self) -> Result<State> {
        let state_path = self.state_path();
        match Self::read_json(&state_path)? {
            Some(state) => {
                tracing::debug!("loaded workspace state from {:?}", state_path);
                Ok(state)
            }
            None => Ok(State::new(self.default_branch.clone())),
        }
    }

    fn write_state(&self, state: &State) -> Result<()> {
        self.write_json(&self.state_path(), state, "workspace state")
    }
}

impl StashStore for FilesystemStorage {
    fn read_stash(&self) -> Result<Vec<StashEntry>> {
        Ok(Self::read_json(&self.stash_path())?.unwrap_or_default())
    }

    fn write_stash(&self, entries: &[StashEntry]) -> Result<()> {
        self.write_json(&self.stash_path(), entries, "stash")
    }
}

impl SettingsStore for FilesystemStorage {
    fn read_settings(&self) -> Result<BTreeMap<String, String>> {
        Ok(Self::read_json(&self.settings_path())?.unwrap_or_default())
    }

    fn write_settings(&self, settings: &BTreeMap<String, String>) -> Result<()> {
        self.write_json(&self.settings_path(), settings, "settings")
    }
}

impl StorageBackend for FilesystemStorage {
    fn initialize(&self) -> Result<()> {
        let meta_dir = self.meta_dir();
        fs::create_dir_all(&meta_dir).at(&meta_dir)?;
        Ok(())
    }
}
