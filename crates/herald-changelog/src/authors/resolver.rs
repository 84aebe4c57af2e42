//! Contributor handle resolution
//!
//! Each author runs the strategies of [`Strategy::CHAIN`] in order and stops at
//! the first handle found. Authors resolve concurrently on the caller's task.

use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, instrument, trace};

use herald_core::config::{Config, Provider, RepoConfig};

use super::noreply::{is_noreply, login_from_noreply};
use super::AuthorRecord;
use crate::lookup::{GitHubPulls, PullRequestAuthors, UnghDirectory, UserDirectory};

/// One way of discovering a contributor's public handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Read the handle out of a GitHub no-reply email
    NoReplyEmail,
    /// Ask the user directory about each non no-reply email
    EmailDirectory,
    /// Use the author of a referenced pull request (GitHub only)
    PullRequestAuthor,
}

impl Strategy {
    /// Strategies in the order they are attempted
    pub const CHAIN: [Strategy; 3] = [
        Strategy::NoReplyEmail,
        Strategy::EmailDirectory,
        Strategy::PullRequestAuthor,
    ];
}

/// Resolves author records to public handles
#[derive(Clone, Default)]
pub struct IdentityResolver {
    directory: Option<Arc<dyn UserDirectory>>,
    pulls: Option<Arc<dyn PullRequestAuthors>>,
    repo: Option<RepoConfig>,
}

impl IdentityResolver {
    /// A resolver that only uses local information
    pub fn offline() -> Self {
        Self::default()
    }

    /// A resolver backed by the configured HTTP collaborators
    pub fn from_config(config: &Config, repo: Option<RepoConfig>) -> Self {
        Self::offline()
            .with_directory(UnghDirectory::from_config(&config.identity))
            .with_pull_requests(GitHubPulls::from_config(&config.identity), repo)
    }

    /// Set the user directory
    pub fn with_directory<D: UserDirectory + 'static>(mut self, directory: D) -> Self {
        self.directory = Some(Arc::new(directory));
        self
    }

    /// Set the pull request author lookup and the repository it queries
    pub fn with_pull_requests<P: PullRequestAuthors + 'static>(
        mut self,
        pulls: P,
        repo: Option<RepoConfig>,
    ) -> Self {
        self.pulls = Some(Arc::new(pulls));
        self.repo = repo;
        self
    }

    /// Resolve every record in place, one concurrent chain per record
    #[instrument(skip_all, fields(author_count = records.len()))]
    pub async fn resolve_all(&self, records: &mut [AuthorRecord]) {
        let handles = join_all(records.iter().map(|record| self.resolve(record))).await;

        for (record, handle) in records.iter_mut().zip(handles) {
            record.handle = handle;
        }
    }

    /// Run the strategy chain for one record
    pub async fn resolve(&self, record: &AuthorRecord) -> Option<String> {
        for strategy in Strategy::CHAIN {
            if let Some(handle) = self.attempt(strategy, record).await {
                debug!(author = %record.name, ?strategy, handle = %handle, "resolved contributor handle");
                return Some(handle);
            }
        }

        debug!(author = %record.name, "no handle found");
        None
    }

    async fn attempt(&self, strategy: Strategy, record: &AuthorRecord) -> Option<String> {
        match strategy {
            Strategy::NoReplyEmail => record.emails.iter().find_map(|e| login_from_noreply(e)),
            Strategy::EmailDirectory => self.from_directory(record).await,
            Strategy::PullRequestAuthor => self.from_pull_requests(record).await,
        }
    }

    async fn from_directory(&self, record: &AuthorRecord) -> Option<String> {
        let directory = self.directory.as_ref()?;

        for email in record.emails.iter().filter(|e| !is_noreply(e)) {
            match directory.find_username(email).await {
                Ok(username) => return Some(username),
                Err(err) => trace!(email = %email, error = %err, "directory lookup failed"),
            }
        }
        None
    }

    async fn from_pull_requests(&self, record: &AuthorRecord) -> Option<String> {
        let repo = self.repo.as_ref().filter(|r| r.provider == Provider::Github)?;
        let pulls = self.pulls.as_ref()?;

        for &number in &record.pr_numbers {
            match pulls.author_login(repo, number).await {
                Ok(login) => return Some(login),
                Err(err) => trace!(number, error = %err, "pull request lookup failed"),
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::LookupResult;
    use async_trait::async_trait;
    use herald_core::error::LookupError;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio::sync::Notify;

    #[derive(Default)]
    struct FakeDirectory {
        users: HashMap<String, String>,
        calls: Mutex<Vec<String>>,
    }

    impl FakeDirectory {
        fn with_user(mut self, email: &str, username: &str) -> Self {
            self.users.insert(email.to_string(), username.to_string());
            self
        }
    }

    #[async_trait]
    impl UserDirectory for Arc<FakeDirectory> {
        async fn find_username(&self, email: &str) -> LookupResult<String> {
            self.calls.lock().unwrap().push(email.to_string());
            self.users
                .get(email)
                .cloned()
                .ok_or_else(|| LookupError::Request("connection refused".into()))
        }
    }

    #[derive(Default)]
    struct FakePulls {
        authors: HashMap<u64, String>,
        calls: Mutex<Vec<u64>>,
    }

    #[async_trait]
    impl PullRequestAuthors for Arc<FakePulls> {
        async fn author_login(&self, _repo: &RepoConfig, number: u64) -> LookupResult<String> {
            self.calls.lock().unwrap().push(number);
            self.authors
                .get(&number)
                .cloned()
                .ok_or_else(|| LookupError::Status { status: 404, url: String::new() })
        }
    }

    fn record(name: &str, emails: &[&str], prs: &[u64]) -> AuthorRecord {
        let mut record = AuthorRecord::new(name);
        record.emails.extend(emails.iter().map(|e| e.to_string()));
        record.pr_numbers.extend(prs.iter().copied());
        record
    }

    fn github() -> Option<RepoConfig> {
        Some(RepoConfig::new(Provider::Github, "acme/rocket"))
    }

    #[tokio::test]
    async fn test_noreply_wins_without_network() {
        let directory = Arc::new(FakeDirectory::default());
        let resolver = IdentityResolver::offline().with_directory(directory.clone());

        let ada = record("Ada", &["ada@example.com", "1+Ada-L@users.noreply.github.com"], &[]);
        assert_eq!(resolver.resolve(&ada).await.as_deref(), Some("ada-l"));
        assert!(directory.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_directory_skips_noreply_and_failures() {
        let directory = Arc::new(FakeDirectory::default().with_user("b@work.com", "bee"));
        let resolver = IdentityResolver::offline().with_directory(directory.clone());

        let bee = record("Bee", &["a@home.com", "b@work.com", "bee@noreply.github.com"], &[]);
        assert_eq!(resolver.resolve(&bee).await.as_deref(), Some("bee"));
        assert_eq!(
            *directory.calls.lock().unwrap(),
            vec!["a@home.com".to_string(), "b@work.com".to_string()]
        );
    }

    #[tokio::test]
    async fn test_pull_request_fallback_tries_each_number() {
        let directory = Arc::new(FakeDirectory::default());
        let pulls = Arc::new(FakePulls {
            authors: HashMap::from([(9, "octocat".to_string())]),
            ..FakePulls::default()
        });
        let resolver = IdentityResolver::offline()
            .with_directory(directory.clone())
            .with_pull_requests(pulls.clone(), github());

        let cat = record("Cat", &["cat@example.com"], &[3, 9, 12]);
        assert_eq!(resolver.resolve(&cat).await.as_deref(), Some("octocat"));
        assert_eq!(*directory.calls.lock().unwrap(), vec!["cat@example.com".to_string()]);
        assert_eq!(*pulls.calls.lock().unwrap(), vec![3, 9]);
    }

    #[tokio::test]
    async fn test_pull_request_fallback_gated_on_github() {
        let pulls = Arc::new(FakePulls {
            authors: HashMap::from([(1, "octocat".to_string())]),
            ..FakePulls::default()
        });
        let gitlab = Some(RepoConfig::new(Provider::Gitlab, "acme/rocket"));
        let resolver = IdentityResolver::offline().with_pull_requests(pulls.clone(), gitlab);

        assert_eq!(resolver.resolve(&record("Cat", &[], &[1])).await, None);
        assert!(pulls.calls.lock().unwrap().is_empty());

        let resolver = IdentityResolver::offline().with_pull_requests(pulls.clone(), None);
        assert_eq!(resolver.resolve(&record("Cat", &[], &[1])).await, None);
    }

    #[tokio::test]
    async fn test_all_strategies_fail() {
        let resolver = IdentityResolver::offline()
            .with_directory(Arc::new(FakeDirectory::default()))
            .with_pull_requests(Arc::new(FakePulls::default()), github());

        let mut records = vec![record("Dee", &["dee@example.com"], &[5])];
        resolver.resolve_all(&mut records).await;
        assert_eq!(records[0].handle, None);
    }

    struct Rendezvous {
        notify: Notify,
    }

    #[async_trait]
    impl UserDirectory for Arc<Rendezvous> {
        async fn find_username(&self, email: &str) -> LookupResult<String> {
            if email == "first@example.com" {
                self.notify.notified().await;
            } else {
                self.notify.notify_one();
            }
            Ok(email.split('@').next().unwrap_or_default().to_string())
        }
    }

    #[tokio::test]
    async fn test_authors_resolve_concurrently() {
        // The first author's lookup only completes once the second one runs.
        let resolver = IdentityResolver::offline().with_directory(Arc::new(Rendezvous {
            notify: Notify::new(),
        }));

        let mut records = vec![
            record("First", &["first@example.com"], &[]),
            record("Second", &["second@example.com"], &[]),
        ];

        tokio::time::timeout(Duration::from_secs(5), resolver.resolve_all(&mut records))
            .await
            .expect("resolution deadlocked");

        assert_eq!(records[0].handle.as_deref(), Some("first"));
        assert_eq!(records[1].handle.as_deref(), Some("second"));
    }
}
