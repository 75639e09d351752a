use std::io::Write;

use anyhow::Result;
use serde::Serialize;

use super::emit;
use crate::cli::{CheckoutArgs, CommitArgs, OutputFormat};
use crate::registry::WorkspaceRegistry;

const MAX_LISTED: usize = 10;

pub fn handle<W: Write>(
    registry: &mut WorkspaceRegistry,
    args: CommitArgs,
    format: OutputFormat,
    output: &mut W,
) -> Result<()> {
    let record = registry
        .open(&args.repo)?
        .commit(&args.message, args.description.as_deref())?;

    emit(output, format, &record, |out, r| {
        writeln!(out, "[{} {}] {}", r.branch, r.id, r.message)?;
        writeln!(out, "{} files changed", r.files.len())?;
        for file in r.files.iter().take(MAX_LISTED) {
            writeln!(out, "  {}", file)?;
        }
        if r.files.len() > MAX_LISTED {
            writeln!(out, "  ... and {} more files", r.files.len() - MAX_LISTED)?;
        }
        Ok(())
    })
}

#[derive(Serialize)]
struct BranchReport<'a> {
    branch: &'a str,
}

pub fn checkout<W: Write>(
    registry: &mut WorkspaceRegistry,
    args: CheckoutArgs,
    format: OutputFormat,
    output: &mut W,
) -> Result<()> {
    let workspace = registry.open(&args.repo)?;
    workspace.switch_branch(&args.branch)?;

    let report = BranchReport {
        branch: workspace.current_branch(),
    };
    emit(output, format, &report, |out, r| {
        writeln!(out, "Switched to branch '{}'", r.branch)
    })
}
