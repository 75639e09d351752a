use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "git-workspace",
    about = "Local staging area, tracked digests and stash for named repositories",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Workspace root directory (overrides config file and GIT_WORKSPACE_ROOT)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    #[arg(long, global = true, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create a workspace, optionally seeding README.md and .gitignore
    Init(InitArgs),
    /// Show staged and untracked files
    Status(RepoArgs),
    /// Stage files from the workspace directory ("." for everything)
    Add(AddArgs),
    /// Stage explicit content for a path
    Stage(StageArgs),
    /// Remove a path from the staging area
    Unstage(UnstageArgs),
    /// Clear the staging area
    Reset(RepoArgs),
    /// Record staged content digests as tracked
    Commit(CommitArgs),
    /// Switch the active branch name
    Checkout(CheckoutArgs),
    /// Show, set or remove the remote URL
    #[command(subcommand)]
    Remote(RemoteCommand),
    /// Stop tracking files and delete them from the workspace
    Rm(RmArgs),
    /// Move a file and its tracked/staged entries
    Mv(MvArgs),
    /// Save, list and restore staging areas
    #[command(subcommand)]
    Stash(StashCommand),
    /// Manage the workspace .gitignore
    #[command(subcommand)]
    Ignore(IgnoreCommand),
    /// Preview staged content
    Diff(DiffArgs),
    /// Read or write workspace settings
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Args)]
pub struct RepoArgs {
    /// Repository name, e.g. owner/repo
    pub repo: String,
}

#[derive(Args)]
pub struct InitArgs {
    pub repo: String,
    /// Do not write README.md
    #[arg(long)]
    pub no_readme: bool,
    /// Write .gitignore from a template (python, node, rust)
    #[arg(long)]
    pub gitignore: Option<String>,
}

#[derive(Args)]
pub struct AddArgs {
    pub repo: String,
    #[arg(required = true)]
    pub files: Vec<String>,
}

#[derive(Args)]
pub struct StageArgs {
    pub repo: String,
    pub path: String,
    pub content: String,
}

#[derive(Args)]
pub struct UnstageArgs {
    pub repo: String,
    pub path: String,
    /// Fail if the path is not staged
    #[arg(long)]
    pub strict: bool,
}

#[derive(Args)]
pub struct CommitArgs {
    pub repo: String,
    #[arg(short, long)]
    pub message: String,
    #[arg(short, long)]
    pub description: Option<String>,
}

#[derive(Args)]
pub struct CheckoutArgs {
    pub repo: String,
    pub branch: String,
}

#[derive(Args)]
pub struct RmArgs {
    pub repo: String,
    #[arg(required = true)]
    pub files: Vec<String>,
    /// Only stop tracking; keep the files on disk
    #[arg(long)]
    pub cached: bool,
}

#[derive(Args)]
pub struct MvArgs {
    pub repo: String,
    pub source: String,
    pub destination: String,
}

#[derive(Args)]
pub struct DiffArgs {
    pub repo: String,
    /// Show staged content (the only source a diff is taken from)
    #[arg(long)]
    pub staged: bool,
    /// Limit the preview to one path
    #[arg(long)]
    pub file: Option<String>,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print one setting, or all of them when no key is given
    Get { repo: String, key: Option<String> },
    Set {
        repo: String,
        key: String,
        value: String,
    },
}

#[derive(Subcommand)]
pub enum RemoteCommand {
    List { repo: String },
    Add { repo: String, url: String },
    Remove { repo: String },
}

#[derive(Subcommand)]
pub enum StashCommand {
    Save {
        repo: String,
        #[arg(short, long)]
        message: Option<String>,
    },
    List { repo: String },
    Apply { repo: String },
    Pop { repo: String },
}

#[derive(Subcommand)]
pub enum IgnoreCommand {
    Add {
        repo: String,
        #[arg(required = true)]
        patterns: Vec<String>,
    },
    List { repo: String },
    Create { repo: String, template: String },
}
