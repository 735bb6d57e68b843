//! Fetcher over the GitLab "raw repository file" endpoint
//!
//! `GET {base_url}/projects/{project}/repository/files/{file_path}/raw?ref={branch}`
//!
//! Project and file path are sent as single percent-encoded segments, the
//! way the GitLab API expects them (`group%2Fproject`).

use crate::config::GitLabConfig;
use backoff::ExponentialBackoffBuilder;
use extends_core::{Document, FetchError, Fetcher, parse_document};
use reqwest::blocking::Client;
use reqwest::{StatusCode, Url};
use std::time::Duration;

const USER_AGENT_VALUE: &str = concat!("extends/", env!("CARGO_PKG_VERSION"));
const TOKEN_HEADER: &str = "PRIVATE-TOKEN";

/// Reads each project's config file from a GitLab instance.
///
/// Requests block the calling thread. Transient failures (connection errors,
/// HTTP 429 and 5xx) are retried with exponential backoff for up to
/// [`GitLabConfig::max_retry_elapsed`].
#[derive(Debug, Clone)]
pub struct GitLabFetcher {
    client: Client,
    config: GitLabConfig,
}

impl GitLabFetcher {
    /// Build a fetcher; fails on a zero timeout or if the HTTP client cannot be created
    pub fn new(config: GitLabConfig) -> Result<Self, FetchError> {
        if config.timeout().is_zero() {
            return Err(FetchError::transport("GitLab request timeout must be non-zero"));
        }
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(USER_AGENT_VALUE)
            .build()
            .map_err(|e| FetchError::transport(format!("failed to create GitLab client: {e}")))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &GitLabConfig {
        &self.config
    }

    /// URL of the raw config file for `project` at `branch`
    pub fn file_url(&self, branch: &str, project: &str) -> Result<Url, FetchError> {
        let mut url = Url::parse(&self.config.base_url).map_err(|e| {
            FetchError::transport(format!("invalid GitLab URL {}: {e}", self.config.base_url))
        })?;
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                FetchError::transport(format!(
                    "GitLab URL cannot carry a path: {}",
                    self.config.base_url
                ))
            })?;
            segments
                .pop_if_empty()
                .push("projects")
                .push(project)
                .push("repository")
                .push("files")
                .push(&self.config.file_path)
                .push("raw");
        }
        url.query_pairs_mut().append_pair("ref", branch);
        Ok(url)
    }

    fn fetch_once(
        &self,
        branch: &str,
        project: &str,
    ) -> Result<Document, backoff::Error<FetchError>> {
        let url = self.file_url(branch, project).map_err(backoff::Error::permanent)?;

        let mut request = self.client.get(url);
        if let Some(token) = self.config.effective_token() {
            request = request.header(TOKEN_HEADER, token);
        }

        let response = request.send().map_err(|e| {
            backoff::Error::transient(FetchError::transport(format!(
                "failed to fetch {project}@{branch}: {e}"
            )))
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(classify_status(status, branch, project));
        }

        let body = response.text().map_err(|e| {
            backoff::Error::transient(FetchError::transport(format!(
                "failed to read {project}@{branch}: {e}"
            )))
        })?;

        parse_document(&body).map_err(|e| {
            backoff::Error::permanent(FetchError::InvalidDocument {
                branch: branch.to_string(),
                project: project.to_string(),
                message: e.to_string(),
            })
        })
    }
}

impl Fetcher for GitLabFetcher {
    fn fetch(&self, branch: &str, project_path: &str) -> Result<Document, FetchError> {
        tracing::debug!(branch, project = project_path, "Fetching config from GitLab");

        let max_elapsed = self.config.max_retry_elapsed();
        if max_elapsed.is_zero() {
            return self.fetch_once(branch, project_path).map_err(into_inner);
        }

        let policy = ExponentialBackoffBuilder::new()
            .with_max_elapsed_time(Some(max_elapsed))
            .build();

        backoff::retry_notify(
            policy,
            || self.fetch_once(branch, project_path),
            |err: FetchError, wait: Duration| {
                tracing::warn!(
                    branch,
                    project = project_path,
                    error = %err,
                    retry_in_ms = wait.as_millis() as u64,
                    "Transient GitLab failure, retrying"
                );
            },
        )
        .map_err(into_inner)
    }
}

/// Map a non-success status to a fetch error, marking which ones may be retried
fn classify_status(status: StatusCode, branch: &str, project: &str) -> backoff::Error<FetchError> {
    match status {
        StatusCode::NOT_FOUND => backoff::Error::permanent(FetchError::not_found(branch, project)),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            backoff::Error::permanent(FetchError::Unauthorized {
                branch: branch.to_string(),
                project: project.to_string(),
            })
        }
        _ => {
            let error = FetchError::Http {
                status: status.as_u16(),
                branch: branch.to_string(),
                project: project.to_string(),
            };
            if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
                backoff::Error::transient(error)
            } else {
                backoff::Error::permanent(error)
            }
        }
    }
}

fn into_inner(error: backoff::Error<FetchError>) -> FetchError {
    match error {
        backoff::Error::Permanent(err) => err,
        backoff::Error::Transient { err, .. } => err,
    }
}
