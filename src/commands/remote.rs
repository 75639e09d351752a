use std::io::Write;

use anyhow::Result;
use serde::Serialize;

use super::emit;
use crate::cli::{OutputFormat, RemoteCommand};
use crate::registry::WorkspaceRegistry;

/// The workspace has a single remote, always shown under this name
const REMOTE_NAME: &str = "origin";

#[derive(Serialize)]
struct RemoteReport {
    name: &'static str,
    url: Option<String>,
}

pub fn handle<W: Write>(
    registry: &mut WorkspaceRegistry,
    command: RemoteCommand,
    format: OutputFormat,
    output: &mut W,
) -> Result<()> {
    match command {
        RemoteCommand::List { repo } => {
            let url = registry.open(&repo)?.remote_url().map(str::to_string);
            let report = RemoteReport {
                name: REMOTE_NAME,
                url,
            };
            emit(output, format, &report, |out, r| match &r.url {
                Some(url) => {
                    writeln!(out, "{}  {} (fetch)", r.name, url)?;
                    writeln!(out, "{}  {} (push)", r.name, url)
                }
                None => writeln!(out, "No remote configured."),
            })
        }
        RemoteCommand::Add { repo, url } => {
            registry.open(&repo)?.set_remote(&url)?;
            let report = RemoteReport {
                name: REMOTE_NAME,
                url: Some(url.trim().to_string()),
            };
            emit(output, format, &report, |out, r| {
                writeln!(out, "Added remote '{}' -> {}", r.name, r.url.as_deref().unwrap_or_default())
            })
        }
        RemoteCommand::Remove { repo } => {
            let previous = registry.open(&repo)?.remove_remote()?;
            let report = RemoteReport {
                name: REMOTE_NAME,
                url: previous,
            };
            emit(output, format, &report, |out, r| match &r.url {
                Some(_) => writeln!(out, "Removed remote '{}'", r.name),
                None => writeln!(out, "No remote configured."),
            })
        }
    }
}
