//! Settings file and flag resolution.
//!
//! Each setting is taken from the first source that provides it: command-line
//! flag, environment variable (both handled by clap), the TOML file, then the
//! built-in default.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context};
use revdiff_compare::{CancelSignal, CompareOptions, DiffOptions};
use revdiff_remote::{AuthMethod, ChangeListing, RemoteConfig};
use serde::Deserialize;

use crate::cli::{CompareArgs, RemoteArgs};

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub remote: RemoteSection,
    pub compare: CompareSection,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RemoteSection {
    pub base_url: Option<String>,
    pub project: Option<String>,
    pub repository: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub listing: Option<ChangeListing>,
    pub page_limit: Option<u32>,
    pub timeout_secs: Option<u64>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompareSection {
    pub concurrency: Option<usize>,
    pub recursive: Option<bool>,
    pub file_timeout_secs: Option<u64>,
    pub save_dir: Option<PathBuf>,
}

impl FileConfig {
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        toml::from_str(text).context("invalid config file")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("in {}", path.display()))
    }

    /// Load `path` if given; otherwise an empty configuration.
    pub fn load_optional(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn resolve_remote(&self, args: &RemoteArgs) -> anyhow::Result<RemoteConfig> {
        let file = &self.remote;
        let base_url = pick(&args.base_url, &file.base_url)
            .context("no base url given (use --base-url, REVDIFF_BASE_URL or [remote].base_url)")?;
        let project = pick(&args.project, &file.project)
            .context("no project given (use --project, REVDIFF_PROJECT or [remote].project)")?;
        let repository = pick(&args.repo, &file.repository)
            .context("no repository given (use --repo, REVDIFF_REPO or [remote].repository)")?;

        let auth = match (
            pick(&args.username, &file.username),
            pick(&args.password, &file.password),
        ) {
            (Some(username), Some(password)) => AuthMethod::basic(username, password),
            (None, None) => AuthMethod::Anonymous,
            (Some(_), None) => bail!("a username was given without a password"),
            (None, Some(_)) => bail!("a password was given without a username"),
        };

        let listing = args
            .listing
            .map(ChangeListing::from)
            .or(file.listing)
            .unwrap_or_default();

        let mut config = RemoteConfig::new(base_url, project, repository)
            .with_auth(auth)
            .with_listing(listing);
        if let Some(limit) = args.limit.or(file.page_limit) {
            if limit == 0 {
                bail!("the listing limit must be at least 1");
            }
            config.page_limit = limit;
        }
        if let Some(secs) = args.timeout_secs.or(file.timeout_secs) {
            config.timeout_secs = secs;
        }
        Ok(config)
    }

    pub fn resolve_compare(&self, args: &CompareArgs, cancel: CancelSignal) -> CompareOptions {
        let file = &self.compare;
        let mut options = CompareOptions::default().with_cancel(cancel);
        if let Some(n) = args.concurrency.or(file.concurrency) {
            options = options.with_concurrency(n);
        }
        if args.recursive || file.recursive.unwrap_or(false) {
            options = options.with_diff(DiffOptions::recursive());
        }
        if let Some(secs) = args.file_timeout_secs.or(file.file_timeout_secs) {
            options = options.with_file_timeout(Duration::from_secs(secs));
        }
        if let Some(dir) = args.save_dir.clone().or_else(|| file.save_dir.clone()) {
            options = options.with_snapshot_dir(dir);
        }
        options
    }
}

fn pick(flag: &Option<String>, file: &Option<String>) -> Option<String> {
    flag.clone()
        .or_else(|| file.clone())
        .filter(|value| !value.is_empty())
}
