pub mod commit;
pub mod config;
pub mod diff;
pub mod ignore;
pub mod remote;
pub mod stage;
pub mod stash;
pub mod status;

use std::io::{self, Write};

use anyhow::Result;
use serde::Serialize;

use crate::cli::{Command, OutputFormat};
use crate::registry::WorkspaceRegistry;

/// Dispatch one CLI command against the registry, writing results to `output`
pub fn run<W: Write>(
    registry: &mut WorkspaceRegistry,
    command: Command,
    format: OutputFormat,
    output: &mut W,
) -> Result<()> {
    match command {
        Command::Init(args) => status::init(registry, args, format, output),
        Command::Status(args) => status::handle(registry, &args.repo, format, output),
        Command::Add(args) => stage::add(registry, args, format, output),
        Command::Stage(args) => stage::stage(registry, args, format, output),
        Command::Unstage(args) => stage::unstage(registry, args, format, output),
        Command::Reset(args) => stage::reset(registry, &args.repo, format, output),
        Command::Rm(args) => stage::rm(registry, args, format, output),
        Command::Mv(args) => stage::mv(registry, args, format, output),
        Command::Commit(args) => commit::handle(registry, args, format, output),
        Command::Checkout(args) => commit::checkout(registry, args, format, output),
        Command::Remote(cmd) => remote::handle(registry, cmd, format, output),
        Command::Stash(cmd) => stash::handle(registry, cmd, format, output),
        Command::Ignore(cmd) => ignore::handle(registry, cmd, format, output),
        Command::Diff(args) => diff::handle(registry, args, format, output),
        Command::Config(cmd) => config::handle(registry, cmd, format, output),
    }
}

/// Write `value` as pretty JSON, or hand it to `render` for text output
pub(crate) fn emit<W, T, F>(output: &mut W, format: OutputFormat, value: &T, render: F) -> Result<()>
where
    W: Write,
    T: Serialize + ?Sized,
    F: FnOnce(&mut W, &T) -> io::Result<()>,
{
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *output, value)?;
            writeln!(output)?;
        }
        OutputFormat::Text => render(output, value)?,
    }
    Ok(())
}
