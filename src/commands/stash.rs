use std::io::Write;

use anyhow::Result;

use super::emit;
use crate::cli::{OutputFormat, StashCommand};
use crate::registry::WorkspaceRegistry;

pub fn handle<W: Write>(
    registry: &mut WorkspaceRegistry,
    command: StashCommand,
    format: OutputFormat,
    output: &mut W,
) -> Result<()> {
    match command {
        StashCommand::Save { repo, message } => {
            let saved = registry.open(&repo)?.stash_save(message.as_deref())?;
            emit(output, format, &saved, |out, entry| match entry {
                Some(entry) => writeln!(out, "Saved working directory and index state\n{}", entry.message),
                None => writeln!(out, "No local changes to save."),
            })
        }
        StashCommand::List { repo } => {
            let entries = registry.open(&repo)?.stash_list()?;
            emit(output, format, &entries, |out, entries| {
                if entries.is_empty() {
                    return writeln!(out, "No stashes found.");
                }
                for (i, entry) in entries.iter().enumerate() {
                    writeln!(out, "stash@{{{}}}: {} ({})", i, entry.message, entry.branch)?;
                }
                Ok(())
            })
        }
        StashCommand::Apply { repo } => {
            let entry = registry.open(&repo)?.stash_apply()?;
            emit(output, format, &entry, |out, entry| {
                writeln!(out, "Applied stash: {}\nFiles restored: {}", entry.message, entry.files.len())
            })
        }
        StashCommand::Pop { repo } => {
            let entry = registry.open(&repo)?.stash_pop()?;
            emit(output, format, &entry, |out, entry| {
                writeln!(out, "Popped stash: {}\nFiles restored: {}", entry.message, entry.files.len())
            })
        }
    }
}
