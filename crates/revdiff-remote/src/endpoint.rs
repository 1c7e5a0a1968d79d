//! REST resource locations on the remote host.

use reqwest::Url;
use revdiff_types::{ChangedFile, Revision};

use crate::config::RemoteConfig;
use crate::error::{GatewayError, GatewayResult};

/// Path segments between the server root and the project resources.
pub const API_ROOT: [&str; 3] = ["rest", "api", "1.0"];

/// Builds request URLs for one repository. Every path component is
/// percent-encoded individually.
#[derive(Clone, Debug)]
pub struct Endpoints {
    repo_root: Url,
}

impl Endpoints {
    pub fn new(config: &RemoteConfig) -> GatewayResult<Self> {
        let mut repo_root = Url::parse(&config.base_url).map_err(|e| {
            GatewayError::Validation(format!("invalid base url {:?}: {e}", config.base_url))
        })?;
        if config.project.is_empty() || config.repository.is_empty() {
            return Err(GatewayError::Validation(
                "project and repository must not be empty".into(),
            ));
        }
        repo_root
            .path_segments_mut()
            .map_err(|_| {
                GatewayError::Validation(format!(
                    "base url {:?} cannot carry a path",
                    config.base_url
                ))
            })?
            .pop_if_empty()
            .extend(API_ROOT)
            .extend(["projects", config.project.as_str()])
            .extend(["repos", config.repository.as_str()]);
        Ok(Self { repo_root })
    }

    /// `.../diffstat/{from}..{to}?limit={limit}`
    ///
    /// The range is one path segment, so a `/` inside a ref is sent as `%2F`.
    /// Servers that refuse encoded slashes in paths need
    /// [`compare_diff`](Self::compare_diff), which carries both revisions in
    /// the query string.
    pub fn diffstat(&self, from: &Revision, to: &Revision, limit: u32) -> GatewayResult<Url> {
        let range = format!("{from}..{to}");
        let mut url = self.resource(["diffstat", range.as_str()])?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string());
        Ok(url)
    }

    /// `.../compare/diff?from={from}&to={to}&limit={limit}`
    pub fn compare_diff(&self, from: &Revision, to: &Revision, limit: u32) -> GatewayResult<Url> {
        let mut url = self.resource(["compare", "diff"])?;
        url.query_pairs_mut()
            .append_pair("from", from.as_str())
            .append_pair("to", to.as_str())
            .append_pair("limit", &limit.to_string());
        Ok(url)
    }

    /// `.../raw/{path}?at={revision}`
    pub fn raw(&self, file: &ChangedFile, revision: &Revision) -> GatewayResult<Url> {
        let segments = std::iter::once("raw").chain(file.path().split('/'));
        let mut url = self.resource(segments)?;
        url.query_pairs_mut().append_pair("at", revision.as_str());
        Ok(url)
    }

    fn resource<'a, I>(&self, segments: I) -> GatewayResult<Url>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut url = self.repo_root.clone();
        url.path_segments_mut()
            .map_err(|_| GatewayError::Validation("base url cannot carry a path".into()))?
            .extend(segments);
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoints(base: &str) -> Endpoints {
        Endpoints::new(&RemoteConfig::new(base, "PRJ", "my-repo")).unwrap()
    }

    fn rev(s: &str) -> Revision {
        Revision::new(s).unwrap()
    }

    #[test]
    fn diffstat_url() {
        let url = endpoints("https://git.example.com")
            .diffstat(&rev("abc"), &rev("def"), 1000)
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://git.example.com/rest/api/1.0/projects/PRJ/repos/my-repo/diffstat/abc..def?limit=1000"
        );
    }

    #[test]
    fn base_path_is_kept() {
        let url = endpoints("https://git.example.com/bitbucket/")
            .compare_diff(&rev("abc"), &rev("def"), 50)
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://git.example.com/bitbucket/rest/api/1.0/projects/PRJ/repos/my-repo/compare/diff?from=abc&to=def&limit=50"
        );
    }

    #[test]
    fn raw_url_encodes_components() {
        let file = ChangedFile::new("conf/app settings.json").unwrap();
        let url = endpoints("https://git.example.com")
            .raw(&file, &rev("refs/heads/main"))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://git.example.com/rest/api/1.0/projects/PRJ/repos/my-repo/raw/conf/app%20settings.json?at=refs%2Fheads%2Fmain"
        );
    }

    #[test]
    fn slashed_refs_stay_in_one_segment() {
        let endpoints = endpoints("https://git.example.com");
        let from = rev("release/1.2");
        let to = rev("main");

        let diffstat = endpoints.diffstat(&from, &to, 10).unwrap();
        assert!(diffstat.path().ends_with("/diffstat/release%2F1.2..main"));

        let compare = endpoints.compare_diff(&from, &to, 10).unwrap();
        assert!(compare.path().ends_with("/compare/diff"));
        let pairs: Vec<(String, String)> = compare.query_pairs().into_owned().collect();
        assert_eq!(pairs[0], ("from".to_string(), "release/1.2".to_string()));
    }

    #[test]
    fn rejects_bad_base_url() {
        let err = Endpoints::new(&RemoteConfig::new("not a url", "P", "r")).unwrap_err();
        assert!(matches!(err, GatewayError::Validation(_)));
        let err = Endpoints::new(&RemoteConfig::new("mailto:a@b.c", "P", "r")).unwrap_err();
        assert!(matches!(err, GatewayError::Validation(_)));
    }

    #[test]
    fn rejects_empty_project() {
        let err = Endpoints::new(&RemoteConfig::new("https://x", "", "r")).unwrap_err();
        assert!(matches!(err, GatewayError::Validation(_)));
    }
}
