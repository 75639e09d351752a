use std::collections::BTreeMap;

use super::{StashEntry, State};
use crate::error::Result;

/// Trait for mutable state management
pub trait MutableState {
    /// Read the current state.
    /// Returns a fresh state if none has been written yet.
    /// A state file that exists but cannot be parsed is an error, never a default.
    fn read_state(&self) -> Result<State>;

    /// Atomically write new state.
    /// Implementation should ensure atomicity (temp file + rename or equivalent).
    fn write_state(&self, state: &State) -> Result<()>;
}

/// Trait for the stack of saved staging areas
pub trait StashStore {
    /// Read stash entries, newest first. Empty if none were saved.
    fn read_stash(&self) -> Result<Vec<StashEntry>>;

    /// Atomically replace the stored stash entries.
    fn write_stash(&self, entries: &[StashEntry]) -> Result<()>;
}

/// Trait for the per-workspace key/value settings
pub trait SettingsStore {
    /// Read all settings. Empty if none were written.
    fn read_settings(&self) -> Result<BTreeMap<String, String>>;

    /// Atomically replace the stored settings.
    fn write_settings(&self, settings: &BTreeMap<String, String>) -> Result<()>;
}

/// Combined storage backend trait
pub trait StorageBackend: MutableState + StashStore + SettingsStore {
    /// Initialize storage (create directories, verify access, etc.)
    fn initialize(&self) -> Result<()>;
}
