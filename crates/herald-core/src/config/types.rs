//! Configuration types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use super::defaults::{default_commit_types, DEFAULT_DIRECTORY_URL, DEFAULT_TAG_BODY};

/// Main configuration for Herald
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Changelog configuration
    pub changelog: ChangelogConfig,

    /// Hosting repository, inferred from the git remote when absent
    pub repo: Option<RepoConfig>,

    /// Contributor identity lookup configuration
    pub identity: IdentityConfig,
}

/// Changelog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangelogConfig {
    /// Changelog file path
    pub file: PathBuf,

    /// Commit types to render, in section order
    pub types: Vec<CommitTypeConfig>,

    /// Version title template; `{{newVersion}}` is substituted
    pub tag_body: String,

    /// Authors whose name or email contains any of these terms are left out
    pub exclude_authors: Vec<String>,

    /// Skip the contributors section
    pub no_authors: bool,

    /// Never fall back to showing an author's email
    pub hide_author_email: bool,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("CHANGELOG.md"),
            types: default_commit_types(),
            tag_body: DEFAULT_TAG_BODY.to_string(),
            exclude_authors: Vec::new(),
            no_authors: false,
            hide_author_email: false,
        }
    }
}

/// Configuration for one commit type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitTypeConfig {
    /// Commit type key (feat, fix, ...)
    #[serde(rename = "type")]
    pub kind: String,
    /// Section heading in the changelog
    pub title: String,
}

impl CommitTypeConfig {
    /// Create a new commit type entry
    pub fn new(kind: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            title: title.into(),
        }
    }
}

/// Source hosting provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// GitHub or GitHub Enterprise
    Github,
    /// GitLab
    Gitlab,
    /// Bitbucket
    Bitbucket,
}

impl Provider {
    /// Canonical public domain for the provider
    pub fn default_domain(&self) -> &'static str {
        match self {
            Self::Github => "github.com",
            Self::Gitlab => "gitlab.com",
            Self::Bitbucket => "bitbucket.org",
        }
    }

    /// Guess the provider from a host name
    pub fn from_domain(domain: &str) -> Option<Self> {
        let domain = domain.to_lowercase();
        if domain.contains("github") {
            Some(Self::Github)
        } else if domain.contains("gitlab") {
            Some(Self::Gitlab)
        } else if domain.contains("bitbucket") {
            Some(Self::Bitbucket)
        } else {
            None
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Github => "github",
            Self::Gitlab => "gitlab",
            Self::Bitbucket => "bitbucket",
        };
        f.write_str(name)
    }
}


/// Hosting repository configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoConfig {
    /// Hosting provider
    pub provider: Provider,

    /// Host name (defaults to the provider's public domain)
    #[serde(default)]
    pub domain: Option<String>,

    /// Repository path in `owner/name` form
    pub repo: String,

    /// API token for provider lookups
    #[serde(default, skip_serializing)]
    pub token: Option<String>,
}

impl RepoConfig {
    /// Create a repository config on the provider's public domain
    pub fn new(provider: Provider, repo: impl Into<String>) -> Self {
        Self {
            provider,
            domain: None,
            repo: repo.into(),
            token: None,
        }
    }

    /// Set a custom domain
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Set the API token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Host name in use
    pub fn domain(&self) -> &str {
        self.domain
            .as_deref()
            .unwrap_or_else(|| self.provider.default_domain())
    }

    /// Web URL of the repository
    pub fn base_url(&self) -> String {
        format!("https://{}/{}", self.domain(), self.repo)
    }

    /// API token, falling back to `GITHUB_TOKEN` / `GH_TOKEN` for GitHub
    pub fn resolved_token(&self) -> Option<String> {
        if let Some(token) = self.token.as_ref().filter(|t| !t.is_empty()) {
            return Some(token.clone());
        }
        if self.provider != Provider::Github {
            return None;
        }
        ["GITHUB_TOKEN", "GH_TOKEN"]
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|t| !t.is_empty())
    }
}

/// Contributor identity lookup configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    /// User-directory endpoint; `{email}` is substituted
    pub directory_url: String,

    /// GitHub API base URL override
    pub github_api_url: Option<String>,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            directory_url: DEFAULT_DIRECTORY_URL.to_string(),
            github_api_url: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_order_preserved_from_toml() {
        let config: Config = toml::from_str(
            r#"
[changelog]
types = [
  { type = "fix", title = "Fixes" },
  { type = "feat", title = "Features" },
]
"#,
        )
        .unwrap();

        let kinds: Vec<_> = config.changelog.types.iter().map(|t| t.kind.as_str()).collect();
        assert_eq!(kinds, vec!["fix", "feat"]);
        assert_eq!(config.changelog.types[1].title, "Features");
    }

    #[test]
    fn test_repo_defaults() {
        let repo = RepoConfig::new(Provider::Github, "acme/rocket");
        assert_eq!(repo.domain(), "github.com");
        assert_eq!(repo.base_url(), "https://github.com/acme/rocket");

        let repo = repo.with_domain("git.acme.dev");
        assert_eq!(repo.base_url(), "https://git.acme.dev/acme/rocket");
    }

    #[test]
    fn test_configured_token_wins() {
        let repo = RepoConfig::new(Provider::Github, "acme/rocket").with_token("abc");
        assert_eq!(repo.resolved_token(), Some("abc".to_string()));

        let repo = RepoConfig::new(Provider::Gitlab, "acme/rocket");
        assert_eq!(repo.resolved_token(), None);
    }

    #[test]
    fn test_provider_from_domain() {
        assert_eq!(Provider::from_domain("github.com"), Some(Provider::Github));
        assert_eq!(Provider::from_domain("gitlab.example.org"), Some(Provider::Gitlab));
        assert_eq!(Provider::from_domain("bitbucket.org"), Some(Provider::Bitbucket));
        assert_eq!(Provider::from_domain("example.com"), None);
    }
}
