use std::io::Write;

use anyhow::Result;

use super::emit;
use crate::cli::{DiffArgs, OutputFormat};
use crate::registry::WorkspaceRegistry;

pub fn handle<W: Write>(
    registry: &mut WorkspaceRegistry,
    args: DiffArgs,
    format: OutputFormat,
    output: &mut W,
) -> Result<()> {
    let workspace = registry.open(&args.repo)?;
    // Only staged content is kept, so a plain diff has nothing to compare
    let diffs = if args.staged {
        workspace.staged_diff(args.file.as_deref())?
    } else {
        Vec::new()
    };

    emit(output, format, &diffs, |out, diffs| {
        if diffs.is_empty() {
            return writeln!(out, "No changes to show.");
        }
        writeln!(out, "Staged changes:")?;
        for diff in diffs {
            writeln!(out)?;
            writeln!(out, "--- {}", diff.path)?;
            writeln!(out, "+++ {} (staged)", diff.path)?;
            for line in &diff.lines {
                writeln!(out, "+ {}", line)?;
            }
            if diff.omitted > 0 {
                writeln!(out, "... and {} more lines", diff.omitted)?;
            }
        }
        Ok(())
    })
}
