//! Remote operations

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use herald_core::config::{Provider, RepoConfig};
use herald_core::error::GitError;

use crate::repository::{GitRepo, Result};

/// `https://host/owner/name(.git)`, `ssh://git@host/owner/name` or `git@host:owner/name(.git)`
static REMOTE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:[a-z+]+://)?(?:[^@/]+@)?(?P<host>[^:/]+)(?::\d+)?[:/](?P<path>[^/]+/[^/]+?)(?:\.git)?/?$",
    )
    .expect("Invalid regex")
});

/// Hosting repository inferred from a remote URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteInfo {
    /// Host name
    pub domain: String,
    /// Repository path in `owner/name` form
    pub repo: String,
    /// Provider, when the host is recognised
    pub provider: Option<Provider>,
}

impl RemoteInfo {
    /// Parse a remote URL
    pub fn parse(url: &str) -> Option<Self> {
        let caps = REMOTE_REGEX.captures(url.trim())?;
        let domain = caps.name("host")?.as_str().to_string();
        let repo = caps.name("path")?.as_str().to_string();
        let provider = Provider::from_domain(&domain);

        Some(Self {
            domain,
            repo,
            provider,
        })
    }

    /// Convert to a repository config, if the provider is known
    pub fn to_repo_config(&self) -> Option<RepoConfig> {
        let provider = self.provider?;
        let config = RepoConfig::new(provider, &self.repo);
        if self.domain == provider.default_domain() {
            Some(config)
        } else {
            Some(config.with_domain(&self.domain))
        }
    }
}

impl GitRepo {
    /// Get the URL for a remote
    pub fn remote_url(&self, name: &str) -> Result<Option<String>> {
        match self.repo.find_remote(name) {
            Ok(remote) => Ok(remote.url().map(|s| s.to_string())),
            Err(e) if e.code() == git2::ErrorCode::NotFound => {
                Err(GitError::RemoteNotFound(name.to_string()))
            }
            Err(e) => Err(GitError::Git2(e)),
        }
    }

    /// Infer the hosting repository from a remote
    pub fn remote_info(&self, name: &str) -> Result<Option<RemoteInfo>> {
        let info = self.remote_url(name)?.as_deref().and_then(RemoteInfo::parse);
        debug!(remote = name, info = ?info, "inferred remote repository");
        Ok(info)
    }
}
