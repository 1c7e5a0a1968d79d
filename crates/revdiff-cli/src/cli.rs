use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use revdiff_remote::ChangeListing;

#[derive(Parser)]
#[command(
    name = "revdiff",
    about = "Structural JSON diffs between two revisions of a remote repository",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML file with `[remote]` and `[compare]` tables
    #[arg(long, global = true, env = "REVDIFF_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum ListingArg {
    Diffstat,
    CompareDiff,
}

impl From<ListingArg> for ChangeListing {
    fn from(arg: ListingArg) -> Self {
        match arg {
            ListingArg::Diffstat => ChangeListing::Diffstat,
            ListingArg::CompareDiff => ChangeListing::CompareDiff,
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Diff every changed JSON file between two revisions
    Compare(CompareArgs),
    /// List the files changed between two revisions
    List(ListArgs),
    /// Diff two local JSON documents
    Diff(DiffArgs),
}

/// Connection settings. Unset values fall back to the config file.
#[derive(Args, Clone, Debug, Default)]
pub struct RemoteArgs {
    /// Server root, e.g. https://git.example.com
    #[arg(long, env = "REVDIFF_BASE_URL")]
    pub base_url: Option<String>,

    /// Project key
    #[arg(long, env = "REVDIFF_PROJECT")]
    pub project: Option<String>,

    /// Repository slug
    #[arg(long, env = "REVDIFF_REPO")]
    pub repo: Option<String>,

    #[arg(long, env = "REVDIFF_USERNAME")]
    pub username: Option<String>,

    #[arg(long, env = "REVDIFF_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// REST resource used to list changed files
    #[arg(long)]
    pub listing: Option<ListingArg>,

    /// Maximum number of changed files requested from the remote
    #[arg(long)]
    pub limit: Option<u32>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

#[derive(Args)]
pub struct CompareArgs {
    /// Older revision (commit id, branch or tag)
    pub from: String,
    /// Newer revision
    pub to: String,

    #[command(flatten)]
    pub remote: RemoteArgs,

    /// Number of files compared at once
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Descend into nested objects and report dotted property paths
    #[arg(long)]
    pub recursive: bool,

    /// Upper bound in seconds for fetching and diffing one file
    #[arg(long)]
    pub file_timeout_secs: Option<u64>,

    /// Also write every fetched revision below this directory
    #[arg(long)]
    pub save_dir: Option<PathBuf>,
}

#[derive(Args)]
pub struct ListArgs {
    pub from: String,
    pub to: String,

    #[command(flatten)]
    pub remote: RemoteArgs,
}

#[derive(Args)]
pub struct DiffArgs {
    /// Older document
    pub old: PathBuf,
    /// Newer document
    pub new: PathBuf,

    #[arg(long)]
    pub recursive: bool,
}
