use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Maximum number of changed files requested in a single listing call.
pub const DEFAULT_PAGE_LIMIT: u32 = 1000;

/// Authentication sent on every request.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AuthMethod {
    /// HTTP Basic with a username and an application-scoped password.
    Basic { username: String, password: String },
    #[default]
    Anonymous,
}

impl AuthMethod {
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        !matches!(self, Self::Anonymous)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Basic { .. } => "basic",
            Self::Anonymous => "anonymous",
        }
    }
}

impl fmt::Debug for AuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
            Self::Anonymous => write!(f, "Anonymous"),
        }
    }
}

/// Which REST resource is used to list changed files.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChangeListing {
    /// `diffstat/{from}..{to}`; paths from `values[].path.toString`.
    #[default]
    Diffstat,
    /// `compare/diff?from=..&to=..`; paths from `diffs[].destination` (or
    /// `source` for deletions).
    CompareDiff,
}

/// Connection settings for a remote repository.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Server root, e.g. `https://bitbucket.example.com`.
    pub base_url: String,
    /// Project key.
    pub project: String,
    /// Repository slug.
    pub repository: String,
    #[serde(default)]
    pub auth: AuthMethod,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_page_limit")]
    pub page_limit: u32,
    #[serde(default)]
    pub listing: ChangeListing,
}

impl RemoteConfig {
    pub fn new(
        base_url: impl Into<String>,
        project: impl Into<String>,
        repository: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            project: project.into(),
            repository: repository.into(),
            auth: AuthMethod::Anonymous,
            timeout_secs: default_timeout_secs(),
            page_limit: default_page_limit(),
            listing: ChangeListing::default(),
        }
    }

    pub fn with_auth(mut self, auth: AuthMethod) -> Self {
        self.auth = auth;
        self
    }

    pub fn with_listing(mut self, listing: ChangeListing) -> Self {
        self.listing = listing;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_page_limit() -> u32 {
    DEFAULT_PAGE_LIMIT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_defaults() {
        let c = RemoteConfig::new("https://git.example.com", "PRJ", "repo");
        assert_eq!(c.page_limit, 1000);
        assert_eq!(c.timeout(), Duration::from_secs(30));
        assert_eq!(c.listing, ChangeListing::Diffstat);
        assert!(!c.auth.is_authenticated());
    }

    #[test]
    fn debug_redacts_password() {
        let auth = AuthMethod::basic("alice", "s3cret");
        let text = format!("{auth:?}");
        assert!(text.contains("alice"));
        assert!(!text.contains("s3cret"));
        assert_eq!(auth.display_name(), "basic");
    }

    #[test]
    fn deserializes_with_defaults() {
        let json = r#"{
            "base_url": "https://git.example.com",
            "project": "PRJ",
            "repository": "repo",
            "auth": {"type": "basic", "username": "u", "password": "p"},
            "listing": "compare-diff"
        }"#;
        let c: RemoteConfig = serde_json::from_str(json).unwrap();
        assert_eq!(c.auth, AuthMethod::basic("u", "p"));
        assert_eq!(c.listing, ChangeListing::CompareDiff);
        assert_eq!(c.timeout_secs, 30);
        assert_eq!(c.page_limit, DEFAULT_PAGE_LIMIT);
    }
}
