//! Remote identity lookups
//!
//! Collaborators the contributor resolver queries for public handles. Every
//! failure is reported as a [`LookupError`] and treated by the resolver as
//! "not found".

mod github;
mod ungh;

pub use github::GitHubPulls;
pub use ungh::UnghDirectory;

use async_trait::async_trait;
use herald_core::config::RepoConfig;
use herald_core::error::LookupError;

/// Result type for lookups
pub type LookupResult<T> = std::result::Result<T, LookupError>;

/// A user directory keyed by email
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Find the username registered for `email`
    async fn find_username(&self, email: &str) -> LookupResult<String>;
}

/// Pull request author lookup on the hosting provider
#[async_trait]
pub trait PullRequestAuthors: Send + Sync {
    /// Login of the author of pull request `number`
    async fn author_login(&self, repo: &RepoConfig, number: u64) -> LookupResult<String>;
}

fn request_error(err: reqwest::Error) -> LookupError {
    LookupError::Request(err.to_string())
}
