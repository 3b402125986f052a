//! GitHub REST collaborator for workflow management.
//!
//! [`AutomationApi`] is the narrow surface the executors need: list the
//! repository's workflow definitions and commit a file. [`GithubClient`]
//! implements it over `reqwest`.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::error::ApiError;

/// One workflow definition as reported by the Actions API.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Workflow {
    pub id: u64,
    pub name: String,
    pub state: String,
}

/// Response of `GET /repos/{owner}/{repo}/actions/workflows`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct WorkflowList {
    #[serde(default)]
    pub total_count: usize,
    #[serde(default)]
    pub workflows: Vec<Workflow>,
}

/// A single-file commit through the contents API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FileCommit {
    /// Repository-relative path, e.g. `.github/workflows/ci.yml`.
    #[serde(skip)]
    pub path: String,
    pub message: String,
    /// Base64-encoded file body.
    #[serde(rename = "content")]
    pub content_base64: String,
}

/// Raw status and body returned for a [`FileCommit`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileCommitResponse {
    pub status: u16,
    pub body: String,
}

impl FileCommitResponse {
    /// GitHub answers `201 Created` for a new file.
    pub fn created(&self) -> bool {
        self.status == 201
    }
}

#[async_trait]
pub trait AutomationApi: Send + Sync {
    async fn list_workflows(&self) -> Result<WorkflowList, ApiError>;

    /// Create or update a file. Any HTTP status is returned as a response;
    /// only transport failures are errors.
    async fn create_file(&self, commit: &FileCommit) -> Result<FileCommitResponse, ApiError>;
}

/// `reqwest`-backed GitHub client bound to one repository.
pub struct GithubClient {
    http: reqwest::Client,
    api_url: String,
    owner: String,
    repo: String,
    token: Option<String>,
}

impl GithubClient {
    pub fn new(config: &AppConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.github_timeout_secs))
            .user_agent(concat!("pipewright/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Transport(format!("failed to build client: {e}")))?;

        Ok(Self {
            http,
            api_url: config.github_api_url.trim_end_matches('/').to_string(),
            owner: config.repo_owner.clone(),
            repo: config.repo_name.clone(),
            token: config.github_token.clone(),
        })
    }

    fn workflows_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/actions/workflows",
            self.api_url, self.owner, self.repo
        )
    }

    fn contents_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_url,
            self.owner,
            self.repo,
            path.trim_start_matches('/')
        )
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let request = request.header("Accept", "application/vnd.github.v3+json");
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

/// Map a non-success listing response to an [`ApiError`].
fn status_error(status: reqwest::StatusCode, body: String) -> ApiError {
    if status == reqwest::StatusCode::NOT_FOUND {
        ApiError::NotFound
    } else {
        ApiError::Status {
            status: status.as_u16(),
            body,
        }
    }
}

#[async_trait]
impl AutomationApi for GithubClient {
    async fn list_workflows(&self) -> Result<WorkflowList, ApiError> {
        let url = self.workflows_url();
        tracing::debug!(%url, "Listing workflows");

        let response = self
            .authorized(self.http.get(&url))
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, body));
        }

        response
            .json::<WorkflowList>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn create_file(&self, commit: &FileCommit) -> Result<FileCommitResponse, ApiError> {
        let url = self.contents_url(&commit.path);
        tracing::debug!(%url, "Committing file");

        let response = self
            .authorized(self.http.put(&url))
            .json(commit)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(format!("failed to read body: {e}")))?;

        Ok(FileCommitResponse { status, body })
    }
}
