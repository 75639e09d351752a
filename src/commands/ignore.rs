use std::io::Write;

use anyhow::Result;
use serde::Serialize;

use super::emit;
use crate::cli::{IgnoreCommand, OutputFormat};
use crate::ignore_rules;
use crate::registry::WorkspaceRegistry;

#[derive(Serialize)]
struct PatternsReport {
    added: Vec<String>,
}

#[derive(Serialize)]
struct ContentReport {
    content: Option<String>,
}

pub fn handle<W: Write>(
    registry: &mut WorkspaceRegistry,
    command: IgnoreCommand,
    format: OutputFormat,
    output: &mut W,
) -> Result<()> {
    match command {
        IgnoreCommand::Add { repo, patterns } => {
            let workspace = registry.open(&repo)?;
            let added = ignore_rules::add_patterns(workspace.path(), &patterns)?;
            emit(output, format, &PatternsReport { added }, |out, r| {
                writeln!(out, "Added {} patterns to .gitignore", r.added.len())?;
                for pattern in &r.added {
                    writeln!(out, "  + {}", pattern)?;
                }
                Ok(())
            })
        }
        IgnoreCommand::List { repo } => {
            let content = ignore_rules::list(registry.open(&repo)?.path())?;
            emit(output, format, &ContentReport { content }, |out, r| match &r.content {
                Some(content) => write!(out, "{}", content),
                None => writeln!(out, "No .gitignore file found."),
            })
        }
        IgnoreCommand::Create { repo, template } => {
            ignore_rules::create_from_template(registry.open(&repo)?.path(), &template)?;
            let report = ContentReport {
                content: ignore_rules::template(&template).map(str::to_string),
            };
            emit(output, format, &report, |out, _| {
                writeln!(out, "Created .gitignore from {} template", template)
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use crate::commands::test_support::run_args;

    #[test]
    fn test_ignore_commands() {
        let temp = TempDir::new().unwrap();

        let out = run_args(&temp, &["ignore", "list", "repo"]).unwrap();
        assert_eq!(out, "No .gitignore file found.\n");

        let out = run_args(&temp, &["ignore", "add", "repo", "*.log", "tmp/"]).unwrap();
        assert_eq!(out, "Added 2 patterns to .gitignore\n  + *.log\n  + tmp/\n");

        let out = run_args(&temp, &["ignore", "list", "repo"]).unwrap();
        assert_eq!(out, "*.log\ntmp/\n");

        let out = run_args(&temp, &["ignore", "create", "repo", "rust"]).unwrap();
        assert_eq!(out, "Created .gitignore from rust template\n");
        assert!(run_args(&temp, &["ignore", "create", "repo", "cobol"]).is_err());
    }
}
