use std::collections::BTreeMap;
use std::io::Write;

use anyhow::Result;
use serde::Serialize;

use super::emit;
use crate::cli::{ConfigCommand, OutputFormat};
use crate::registry::WorkspaceRegistry;

#[derive(Serialize)]
struct Setting {
    key: String,
    value: Option<String>,
}

pub fn handle<W: Write>(
    registry: &mut WorkspaceRegistry,
    command: ConfigCommand,
    format: OutputFormat,
    output: &mut W,
) -> Result<()> {
    match command {
        ConfigCommand::Get { repo, key: Some(key) } => {
            let value = registry.open(&repo)?.config_get(&key)?;
            let setting = Setting { key, value };
            emit(output, format, &setting, |out, s| match &s.value {
                Some(value) => writeln!(out, "{}={}", s.key, value),
                None => writeln!(out, "Not set"),
            })
        }
        ConfigCommand::Get { repo, key: None } => {
            let settings: BTreeMap<String, String> = registry.open(&repo)?.config_list()?;
            emit(output, format, &settings, |out, settings| {
                if settings.is_empty() {
                    return writeln!(out, "No configuration found.");
                }
                for (key, value) in settings {
                    writeln!(out, "{}={}", key, value)?;
                }
                Ok(())
            })
        }
        ConfigCommand::Set { repo, key, value } => {
            registry.open(&repo)?.config_set(&key, &value)?;
            let setting = Setting {
                key: key.trim().to_string(),
                value: Some(value),
            };
            emit(output, format, &setting, |out, s| {
                writeln!(out, "Set {}={}", s.key, s.value.as_deref().unwrap_or_default())
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use crate::commands::test_support::run_args;

    #[test]
    fn test_config_get_set() {
        let temp = TempDir::new().unwrap();

        let out = run_args(&temp, &["config", "get", "repo"]).unwrap();
        assert_eq!(out, "No configuration found.\n");
        let out = run_args(&temp, &["config", "get", "repo", "user.name"]).unwrap();
        assert_eq!(out, "Not set\n");

        let out = run_args(&temp, &["config", "set", "repo", "user.name", "Octo Cat"]).unwrap();
        assert_eq!(out, "Set user.name=Octo Cat\n");
        run_args(&temp, &["config", "set", "repo", "core.editor", "vim"]).unwrap();

        let out = run_args(&temp, &["config", "get", "repo", "user.name"]).unwrap();
        assert_eq!(out, "user.name=Octo Cat\n");
        let out = run_args(&temp, &["config", "get", "repo"]).unwrap();
        assert_eq!(out, "core.editor=vim\nuser.name=Octo Cat\n");
    }

    #[test]
    fn test_config_set_rejects_empty_key() {
        let temp = TempDir::new().unwrap();
        let err = run_args(&temp, &["config", "set", "repo", " ", "v"]).unwrap_err();
        assert!(err.to_string().contains("invalid config key"));
    }
}
