use std::collections::BTreeMap;

use super::Workspace;
use crate::error::{Result, WorkspaceError};
use crate::storage::SettingsStore;

impl Workspace {
    /// Value stored under `key`, if any
    pub fn config_get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.storage.read_settings()?.remove(key.trim()))
    }

    /// Every stored setting, sorted by key
    pub fn config_list(&self) -> Result<BTreeMap<String, String>> {
        self.storage.read_settings()
    }

    /// Store `value` under `key`, replacing any previous value
    pub fn config_set(&mut self, key: &str, value: &str) -> Result<()> {
        let key = key.trim();
        if key.is_empty() || key.contains(char::is_whitespace) || key.contains('=') {
            return Err(WorkspaceError::InvalidConfigKey(key.to_string()));
        }

        let mut settings = self.storage.read_settings()?;
        settings.insert(key.to_string(), value.to_string());
        self.storage.write_settings(&settings)?;
        tracing::info!("set {} in {}", key, self.name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open(temp: &TempDir) -> Workspace {
        Workspace::open("repo", temp.path().join("repo"), "main").unwrap()
    }

    #[test]
    fn test_config_set_and_get() {
        let temp = TempDir::new().unwrap();
        let mut ws = open(&temp);
        assert_eq!(ws.config_get("user.name").unwrap(), None);

        ws.config_set("user.name", "Octo Cat").unwrap();
        ws.config_set("core.editor", "vim").unwrap();
        ws.config_set("user.name", "Mona").unwrap();

        let reloaded = open(&temp);
        assert_eq!(reloaded.config_get("user.name").unwrap().as_deref(), Some("Mona"));
        let keys: Vec<String> = reloaded.config_list().unwrap().into_keys().collect();
        assert_eq!(keys, vec!["core.editor", "user.name"]);
    }

    #[test]
    fn test_config_does_not_touch_state() {
        let temp = TempDir::new().unwrap();
        let mut ws = open(&temp);
        ws.stage("a.txt", "x").unwrap();
        let before = ws.state().clone();

        ws.config_set("user.email", "octo@example.com").unwrap();
        assert_eq!(open(&temp).state(), &before);
    }

    #[test]
    fn test_config_rejects_bad_keys() {
        let temp = TempDir::new().unwrap();
        let mut ws = open(&temp);

        for key in ["", "  ", "two words", "a=b"] {
            assert!(
                matches!(ws.config_set(key, "v"), Err(WorkspaceError::InvalidConfigKey(_))),
                "{:?} should be rejected",
                key
            );
        }
        assert!(ws.config_list().unwrap().is_empty());
    }
}
