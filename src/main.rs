#![deny(clippy::mod_module_files)]
use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod config;
mod digest;
mod error;
mod ignore_rules;
mod registry;
mod storage;
mod workspace;

use cli::Cli;
use config::WorkspaceConfig;
use registry::WorkspaceRegistry;

fn main() {
    // Logs go to stderr so stdout carries only command results
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = WorkspaceConfig::load()?;
    if let Some(root) = cli.root {
        config.workspace_root = root;
    }

    let mut registry = WorkspaceRegistry::new(&config.workspace_root, config.default_branch);
    tracing::debug!("workspace root: {:?}", registry.root());

    let stdout = std::io::stdout();
    let mut output = stdout.lock();
    commands::run(&mut registry, cli.command, cli.format, &mut output)
}
