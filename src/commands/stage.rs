use std::io::Write;

use anyhow::Result;
use serde::Serialize;

use super::emit;
use crate::cli::{AddArgs, MvArgs, OutputFormat, RmArgs, StageArgs, UnstageArgs};
use crate::registry::WorkspaceRegistry;

/// Files beyond this many are summarized in text output
const MAX_LISTED: usize = 20;

#[derive(Serialize)]
struct PathsReport {
    paths: Vec<String>,
}

fn write_paths<W: Write>(out: &mut W, prefix: &str, paths: &[String]) -> std::io::Result<()> {
    for path in paths.iter().take(MAX_LISTED) {
        writeln!(out, "  {} {}", prefix, path)?;
    }
    if paths.len() > MAX_LISTED {
        writeln!(out, "  ... and {} more files", paths.len() - MAX_LISTED)?;
    }
    Ok(())
}

pub fn add<W: Write>(
    registry: &mut WorkspaceRegistry,
    args: AddArgs,
    format: OutputFormat,
    output: &mut W,
) -> Result<()> {
    let paths = registry.open(&args.repo)?.add_paths(&args.files)?;

    emit(output, format, &PathsReport { paths }, |out, r| {
        writeln!(out, "Added {} files to staging area", r.paths.len())?;
        write_paths(out, "+", &r.paths)
    })
}

pub fn stage<W: Write>(
    registry: &mut WorkspaceRegistry,
    args: StageArgs,
    format: OutputFormat,
    output: &mut W,
) -> Result<()> {
    let path = registry.open(&args.repo)?.stage(&args.path, args.content)?;

    emit(output, format, &PathsReport { paths: vec![path] }, |out, r| {
        write_paths(out, "staged", &r.paths)
    })
}

#[derive(Serialize)]
struct UnstageReport {
    path: String,
    removed: bool,
}

pub fn unstage<W: Write>(
    registry: &mut WorkspaceRegistry,
    args: UnstageArgs,
    format: OutputFormat,
    output: &mut W,
) -> Result<()> {
    let workspace = registry.open(&args.repo)?;
    let removed = if args.strict {
        workspace.unstage_strict(&args.path)?;
        true
    } else {
        workspace.unstage(&args.path)?
    };

    let report = UnstageReport {
        path: args.path,
        removed,
    };
    emit(output, format, &report, |out, r| {
        if r.removed {
            writeln!(out, "Unstaged {}", r.path)
        } else {
            writeln!(out, "{} was not staged", r.path)
        }
    })
}

#[derive(Serialize)]
struct ResetReport {
    cleared: usize,
}

pub fn reset<W: Write>(
    registry: &mut WorkspaceRegistry,
    repo: &str,
    format: OutputFormat,
    output: &mut W,
) -> Result<()> {
    let cleared = registry.open(repo)?.clear_staging()?;

    emit(output, format, &ResetReport { cleared }, |out, r| {
        writeln!(out, "Unstaged {} files", r.cleared)
    })
}

pub fn rm<W: Write>(
    registry: &mut WorkspaceRegistry,
    args: RmArgs,
    format: OutputFormat,
    output: &mut W,
) -> Result<()> {
    let paths = registry.open(&args.repo)?.remove(&args.files, args.cached)?;

    emit(output, format, &PathsReport { paths }, |out, r| {
        writeln!(out, "Removed {} files", r.paths.len())?;
        write_paths(out, "rm", &r.paths)
    })
}

#[derive(Serialize)]
struct MoveReport {
    source: String,
    destination: String,
}

pub fn mv<W: Write>(
    registry: &mut WorkspaceRegistry,
    args: MvArgs,
    format: OutputFormat,
    output: &mut W,
) -> Result<()> {
    let (source, destination) = registry
        .open(&args.repo)?
        .rename(&args.source, &args.destination)?;

    emit(output, format, &MoveReport { source, destination }, |out, r| {
        writeln!(out, "Moved '{}' to '{}'", r.source, r.destination)
    })
}
