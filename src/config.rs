use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(s) = path.to_str() {
        if let Some(stripped) = s.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if s == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

/// Configuration for git-workspace
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct WorkspaceConfig {
    /// Directory holding one subdirectory per repository workspace
    #[serde(default = "defaults::workspace_root")]
    pub workspace_root: PathBuf,
    /// Branch a never-before-seen workspace starts on
    #[serde(default = "defaults::default_branch")]
    pub default_branch: String,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        WorkspaceConfig {
            workspace_root: defaults::workspace_root(),
            default_branch: defaults::default_branch(),
        }
    }
}

impl WorkspaceConfig {
    /// Load configuration from the config file (if any) and environment variables
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;
        tracing::debug!("loading git-workspace config from {:?}", config_path);
        let mut config = if config_path.exists() {
            Self::load_from_file(&config_path)?
        } else {
            Self::default()
        };

        config.apply_overrides(|key| env::var(key).ok());
        Ok(config)
    }

    /// Apply `GIT_WORKSPACE_*` overrides using `lookup` to resolve variables
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("GIT_WORKSPACE_ROOT") {
            self.workspace_root = expand_tilde(&PathBuf::from(path));
        }

        if let Some(branch) = lookup("GIT_WORKSPACE_DEFAULT_BRANCH") {
            let branch = branch.trim();
            if branch.is_empty() {
                tracing::warn!("ignoring empty GIT_WORKSPACE_DEFAULT_BRANCH");
            } else {
                self.default_branch = branch.to_string();
            }
        }
    }

    /// Load configuration from a file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let mut config: WorkspaceConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        config.workspace_root = expand_tilde(&config.workspace_root);
        Ok(config)
    }

    /// Save configuration to file
    #[allow(dead_code)]
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let content = serde_yaml::to_string(self).context("Failed to serialize config")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {:?}", path))?;

        Ok(())
    }

    /// Get default config file path
    pub fn config_file_path() -> Result<PathBuf> {
        dirs::home_dir()
            .map(|home| home.join(".config/git-workspace/config.yaml"))
            .context("Could not determine home directory for config file")
    }
}

mod defaults {
    use std::path::PathBuf;

    pub(crate) fn workspace_root() -> PathBuf {
        dirs::home_dir()
            .map(|home| home.join(".git-workspace"))
            .unwrap_or_else(|| PathBuf::from(".git-workspace"))
    }

    pub(crate) fn default_branch() -> String {
        crate::storage::DEFAULT_BRANCH.to_string()
    }
}
