//! GitHub pull request author lookup

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use herald_core::config::{IdentityConfig, Provider, RepoConfig};
use herald_core::error::LookupError;

use super::{request_error, LookupResult, PullRequestAuthors};

const PUBLIC_API_URL: &str = "https://api.github.com";

#[derive(Debug, Deserialize)]
struct PullRequest {
    user: Option<PullRequestUser>,
}

#[derive(Debug, Deserialize)]
struct PullRequestUser {
    login: Option<String>,
}

/// Reads pull request authors from the GitHub REST API
pub struct GitHubPulls {
    api_url: Option<String>,
    client: Client,
}

impl GitHubPulls {
    /// Create a client that derives the API URL from the repository domain
    pub fn new() -> Self {
        Self {
            api_url: None,
            client: Client::new(),
        }
    }

    /// Use a fixed API base URL
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = Some(url.into());
        self
    }

    /// Create a client from configuration
    pub fn from_config(config: &IdentityConfig) -> Self {
        match &config.github_api_url {
            Some(url) => Self::new().with_api_url(url),
            None => Self::new(),
        }
    }

    /// API base for a repository: api.github.com, or `/api/v3` on Enterprise hosts
    fn api_base(&self, repo: &RepoConfig) -> String {
        if let Some(url) = &self.api_url {
            return url.trim_end_matches('/').to_string();
        }
        match repo.domain() {
            "github.com" => PUBLIC_API_URL.to_string(),
            domain => format!("https://{}/api/v3", domain),
        }
    }
}

impl Default for GitHubPulls {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PullRequestAuthors for GitHubPulls {
    #[instrument(skip(self, repo), fields(repo = %repo.repo))]
    async fn author_login(&self, repo: &RepoConfig, number: u64) -> LookupResult<String> {
        if repo.provider != Provider::Github {
            return Err(LookupError::Unsupported(repo.provider.to_string()));
        }

        let url = format!("{}/repos/{}/pulls/{}", self.api_base(repo), repo.repo, number);
        let mut request = self
            .client
            .get(&url)
            .header(ACCEPT, "application/vnd.github+json")
            .header(USER_AGENT, concat!("herald/", env!("CARGO_PKG_VERSION")));
        if let Some(token) = repo.resolved_token() {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        let response = request.send().await.map_err(request_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let pull: PullRequest = response
            .json()
            .await
            .map_err(|e| LookupError::Decode(e.to_string()))?;

        let login = pull
            .user
            .and_then(|u| u.login)
            .filter(|l| !l.is_empty())
            .ok_or_else(|| LookupError::NotFound(format!("pull request #{}", number)))?;

        debug!(number, login = %login, "pull request author found");
        Ok(login)
    }
}
