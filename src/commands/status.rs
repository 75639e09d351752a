use std::io::Write;

use anyhow::Result;
use serde::Serialize;

use super::emit;
use crate::cli::{InitArgs, OutputFormat};
use crate::registry::WorkspaceRegistry;

/// Untracked files beyond this many are summarized in text output
const MAX_LISTED: usize = 20;

#[derive(Serialize)]
struct InitReport<'a> {
    repo: &'a str,
    path: String,
    branch: &'a str,
    created: Vec<String>,
}

pub fn init<W: Write>(
    registry: &mut WorkspaceRegistry,
    args: InitArgs,
    format: OutputFormat,
    output: &mut W,
) -> Result<()> {
    let workspace = registry.open(&args.repo)?;
    let created = workspace.init(!args.no_readme, args.gitignore.as_deref())?;

    let report = InitReport {
        repo: workspace.name(),
        path: workspace.path().display().to_string(),
        branch: workspace.current_branch(),
        created,
    };
    emit(output, format, &report, |out, r| {
        writeln!(out, "Initialized workspace for {} in {}", r.repo, r.path)?;
        for file in &r.created {
            writeln!(out, "  created {}", file)?;
        }
        Ok(())
    })
}

pub fn handle<W: Write>(
    registry: &mut WorkspaceRegistry,
    repo: &str,
    format: OutputFormat,
    output: &mut W,
) -> Result<()> {
    let report = registry.open(repo)?.status()?;

    emit(output, format, &report, |out, r| {
        writeln!(out, "On branch {}", r.branch)?;
        if !r.staged.is_empty() {
            writeln!(out, "\nChanges to be committed:")?;
            for file in &r.staged {
                writeln!(out, "        new/modified:    {}", file)?;
            }
        }
        if !r.untracked.is_empty() {
            writeln!(out, "\nUntracked files:")?;
            for file in r.untracked.iter().take(MAX_LISTED) {
                writeln!(out, "        {}", file)?;
            }
            if r.untracked.len() > MAX_LISTED {
                writeln!(out, "        ... and {} more files", r.untracked.len() - MAX_LISTED)?;
            }
        }
        if r.clean {
            writeln!(out, "nothing to commit, working tree clean")?;
        }
        Ok(())
    })
}
