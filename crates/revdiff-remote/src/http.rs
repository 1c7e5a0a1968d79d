//! Bitbucket Server REST implementation of [`RevisionGateway`].

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use revdiff_types::{ChangedFile, Revision};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::{AuthMethod, ChangeListing, RemoteConfig};
use crate::endpoint::Endpoints;
use crate::error::{GatewayError, GatewayResult};
use crate::gateway::RevisionGateway;

/// Gateway talking to a Bitbucket Server style REST API.
///
/// Holds only an immutable `reqwest::Client` and configuration, so one
/// instance can serve concurrent calls.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    http_client: Client,
    endpoints: Endpoints,
    auth: AuthMethod,
    page_limit: u32,
    listing: ChangeListing,
}

#[derive(Deserialize)]
struct PathRef {
    #[serde(rename = "toString")]
    text: String,
}

#[derive(Deserialize)]
struct DiffstatPage {
    values: Vec<DiffstatEntry>,
    #[serde(rename = "isLastPage", default = "last_page")]
    is_last_page: bool,
}

#[derive(Deserialize)]
struct DiffstatEntry {
    path: PathRef,
}

#[derive(Deserialize)]
struct CompareDiffPage {
    diffs: Vec<CompareDiffEntry>,
    #[serde(rename = "isLastPage", default = "last_page")]
    is_last_page: bool,
}

#[derive(Deserialize)]
struct CompareDiffEntry {
    #[serde(default)]
    source: Option<PathRef>,
    #[serde(default)]
    destination: Option<PathRef>,
}

fn last_page() -> bool {
    true
}

impl HttpGateway {
    /// Creates a gateway from explicit configuration.
    pub fn new(config: RemoteConfig) -> GatewayResult<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| GatewayError::Transport(format!("failed to build HTTP client: {e}")))?;
        Self::with_client(http_client, config)
    }

    /// Creates a gateway with a custom `reqwest::Client`.
    pub fn with_client(http_client: Client, config: RemoteConfig) -> GatewayResult<Self> {
        let endpoints = Endpoints::new(&config)?;
        Ok(Self {
            http_client,
            endpoints,
            auth: config.auth,
            page_limit: config.page_limit,
            listing: config.listing,
        })
    }

    fn add_auth(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.auth {
            AuthMethod::Basic { username, password } => builder.basic_auth(username, Some(password)),
            AuthMethod::Anonymous => builder,
        }
    }

    async fn get(&self, url: Url) -> GatewayResult<Response> {
        debug!(%url, "GET");
        let builder = self.http_client.get(url);
        Ok(self.add_auth(builder).send().await?)
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(&self, url: Url) -> GatewayResult<T> {
        let response = self.get(url.clone()).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let body = response.bytes().await?;
        serde_json::from_slice(&body)
            .map_err(|e| GatewayError::Format(format!("{url}: {e}")))
    }

    async fn list_diffstat(&self, from: &Revision, to: &Revision) -> GatewayResult<(Vec<String>, bool)> {
        if from.as_str().contains('/') || to.as_str().contains('/') {
            warn!(
                %from,
                %to,
                "ref with '/' is sent as %2F in the diffstat path; use the compare-diff listing if the server rejects it"
            );
        }
        let url = self.endpoints.diffstat(from, to, self.page_limit)?;
        let page: DiffstatPage = self.get_json(url).await?;
        let paths = page.values.into_iter().map(|v| v.path.text).collect();
        Ok((paths, page.is_last_page))
    }

    async fn list_compare_diff(
        &self,
        from: &Revision,
        to: &Revision,
    ) -> GatewayResult<(Vec<String>, bool)> {
        let url = self.endpoints.compare_diff(from, to, self.page_limit)?;
        let page: CompareDiffPage = self.get_json(url).await?;
        let paths = page
            .diffs
            .into_iter()
            .map(|d| {
                d.destination
                    .or(d.source)
                    .map(|p| p.text)
                    .ok_or_else(|| GatewayError::Format("diff entry without source or destination".into()))
            })
            .collect::<GatewayResult<Vec<_>>>()?;
        Ok((paths, page.is_last_page))
    }
}

#[async_trait]
impl RevisionGateway for HttpGateway {
    async fn list_changed_files(
        &self,
        from: &Revision,
        to: &Revision,
    ) -> GatewayResult<Vec<ChangedFile>> {
        let (paths, is_last_page) = match self.listing {
            ChangeListing::Diffstat => self.list_diffstat(from, to).await?,
            ChangeListing::CompareDiff => self.list_compare_diff(from, to).await?,
        };

        let limit = self.page_limit as usize;
        if !is_last_page || paths.len() > limit {
            warn!(
                from = from.short(),
                to = to.short(),
                limit,
                "changed-file listing truncated to one page"
            );
        }

        let files = paths
            .into_iter()
            .take(limit)
            .map(|p| ChangedFile::new(p).map_err(|e| GatewayError::Format(e.to_string())))
            .collect::<GatewayResult<Vec<_>>>()?;
        debug!(count = files.len(), "listed changed files");
        Ok(files)
    }

    async fn fetch_file_content(
        &self,
        file: &ChangedFile,
        revision: &Revision,
    ) -> GatewayResult<Vec<u8>> {
        let url = self.endpoints.raw(file, revision)?;
        let response = self.get(url.clone()).await?;
        match response.status() {
            StatusCode::NOT_FOUND => Err(GatewayError::NotFound {
                path: file.path().to_string(),
                revision: revision.to_string(),
            }),
            status if !status.is_success() => Err(GatewayError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            }),
            _ => {
                let body = response.bytes().await?;
                debug!(path = %file, revision = revision.short(), bytes = body.len(), "fetched file");
                Ok(body.to_vec())
            }
        }
    }
}
