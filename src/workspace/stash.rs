use super::Workspace;
use crate::error::{Result, WorkspaceError};
use crate::storage::{StashEntry, StashStore};

impl Workspace {
    /// Push the staging area onto the stash and clear it.
    /// Returns `None` when there is nothing staged to save.
    pub fn stash_save(&mut self, message: Option<&str>) -> Result<Option<StashEntry>> {
        if self.state.staging_area.is_empty() {
            return Ok(None);
        }

        let entry = StashEntry::new(
            message,
            &self.state.current_branch,
            self.state.staging_area.clone(),
        );

        let previous = self.storage.read_stash()?;
        let mut entries = previous.clone();
        entries.insert(0, entry.clone());
        self.storage.write_stash(&entries)?;

        if let Err(e) = self.clear_staging() {
            self.rollback_stash(&previous);
            return Err(e);
        }
        tracing::info!("stashed {} file(s): {}", entry.files.len(), entry.message);
        Ok(Some(entry))
    }

    /// Stash entries, newest first (index 0 is `stash@{0}`)
    pub fn stash_list(&self) -> Result<Vec<StashEntry>> {
        self.storage.read_stash()
    }

    /// Replace the staging area with the newest stash entry, keeping the entry
    pub fn stash_apply(&mut self) -> Result<StashEntry> {
        let entries = self.storage.read_stash()?;
        let entry = entries.first().cloned().ok_or(WorkspaceError::NoStash)?;
        self.restore(&entry)?;
        Ok(entry)
    }

    /// Replace the staging area with the newest stash entry and drop it.
    /// The entry leaves the stash file before staging is restored, so a failed
    /// stash write never leaves the same entry both staged and stashed.
    pub fn stash_pop(&mut self) -> Result<StashEntry> {
        let previous = self.storage.read_stash()?;
        let Some((entry, remaining)) = previous.split_first() else {
            return Err(WorkspaceError::NoStash);
        };
        let entry = entry.clone();

        self.storage.write_stash(remaining)?;
        if let Err(e) = self.restore(&entry) {
            self.rollback_stash(&previous);
            return Err(e);
        }
        Ok(entry)
    }

    fn restore(&mut self, entry: &StashEntry) -> Result<()> {
        self.update(|state| {
            state.staging_area = entry.files.clone();
            Ok(())
        })?;
        tracing::info!("restored {} file(s) from stash", entry.files.len());
        Ok(())
    }

    fn rollback_stash(&self, entries: &[StashEntry]) {
        if let Err(e) = self.storage.write_stash(entries) {
            tracing::warn!("could not restore stash for {}: {}", self.name, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn open(temp: &TempDir) -> Workspace {
        Workspace::open("repo", temp.path().join("repo"), "main").unwrap()
    }

    #[test]
    fn test_save_with_nothing_staged() {
        let temp = TempDir::new().unwrap();
        let mut ws = open(&temp);

        assert!(ws.stash_save(Some("nothing")).unwrap().is_none());
        assert!(ws.stash_list().unwrap().is_empty());
    }

    #[test]
    fn test_save_and_pop() {
        let temp = TempDir::new().unwrap();
        let mut ws = open(&temp);
        ws.stage("a.txt", "hello").unwrap();

        let saved = ws.stash_save(None).unwrap().unwrap();
        assert_eq!(saved.message, "WIP on main");
        assert!(ws.staging().is_empty());

        let popped = ws.stash_pop().unwrap();
        assert_eq!(popped, saved);
        assert_eq!(ws.staging().get("a.txt").map(String::as_str), Some("hello"));
        assert!(ws.stash_list().unwrap().is_empty());

        assert!(matches!(ws.stash_pop(), Err(WorkspaceError::NoStash)));
    }

    #[test]
    fn test_stash_is_lifo() {
        let temp = TempDir::new().unwrap();
        let mut ws = open(&temp);

        ws.stage("first.txt", "1").unwrap();
        ws.stash_save(Some("first")).unwrap();
        ws.stage("second.txt", "2").unwrap();
        ws.stash_save(Some("second")).unwrap();

        let messages: Vec<_> = ws
            .stash_list()
            .unwrap()
            .into_iter()
            .map(|e| e.message)
            .collect();
        assert_eq!(messages, vec!["second", "first"]);

        let applied = ws.stash_apply().unwrap();
        assert_eq!(applied.message, "second");
        assert!(ws.staging().contains_key("second.txt"));
        assert_eq!(ws.stash_list().unwrap().len(), 2);
    }

    #[test]
    fn test_apply_empty_stash() {
        let temp = TempDir::new().unwrap();
        let mut ws = open(&temp);
        assert!(matches!(ws.stash_apply(), Err(WorkspaceError::NoStash)));
    }

    #[test]
    fn test_stash_survives_reopen() {
        let temp = TempDir::new().unwrap();
        {
            let mut ws = open(&temp);
            ws.stage("a.txt", "x").unwrap();
            ws.stash_save(Some("keep me")).unwrap();
        }

        let mut ws = open(&temp);
        assert!(ws.staging().is_empty());
        assert_eq!(ws.stash_pop().unwrap().message, "keep me");
        assert_eq!(open(&temp).staging().len(), 1);
    }

    #[test]
    fn test_pop_removes_entry_from_disk() {
        let temp = TempDir::new().unwrap();
        let mut ws = open(&temp);
        ws.stage("a.txt", "x").unwrap();
        ws.stash_save(None).unwrap();

        ws.stash_pop().unwrap();
        let mut reloaded = open(&temp);
        assert!(reloaded.stash_list().unwrap().is_empty());
        assert!(matches!(reloaded.stash_apply(), Err(WorkspaceError::NoStash)));
        assert_eq!(reloaded.staging().len(), 1);
    }

    #[test]
    fn test_failed_pop_keeps_entry() {
        let temp = TempDir::new().unwrap();
        let mut ws = open(&temp);
        ws.stage("a.txt", "x").unwrap();
        ws.stash_save(Some("keep")).unwrap();

        // A directory in place of state.json makes the staging write fail
        let state_path = ws.storage.state_path();
        fs::remove_file(&state_path).unwrap();
        fs::create_dir(&state_path).unwrap();

        assert!(matches!(ws.stash_pop(), Err(WorkspaceError::Io { .. })));
        assert!(ws.staging().is_empty());
        let stashed = ws.stash_list().unwrap();
        assert_eq!(stashed.len(), 1);
        assert_eq!(stashed[0].message, "keep");
    }
}
