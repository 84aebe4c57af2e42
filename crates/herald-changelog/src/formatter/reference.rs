//! Issue and pull request reference rendering

use herald_core::config::{Provider, RepoConfig};

use crate::types::{Reference, ReferenceKind};

/// Renders one reference as linked text
pub trait ReferenceFormatter: Send + Sync {
    /// Format a single reference
    fn format(&self, reference: &Reference, repo: Option<&RepoConfig>) -> String;
}

/// Links references to the hosting provider's web UI
#[derive(Debug, Clone, Copy, Default)]
pub struct ProviderReferences;

impl ProviderReferences {
    fn segment(provider: Provider, kind: ReferenceKind) -> &'static str {
        match (provider, kind) {
            (_, ReferenceKind::Hash) => "commit",
            (_, ReferenceKind::Issue) => "issues",
            (Provider::Github, ReferenceKind::PullRequest) => "pull",
            (Provider::Gitlab, ReferenceKind::PullRequest) => "merge_requests",
            (Provider::Bitbucket, ReferenceKind::PullRequest) => "pull-requests",
        }
    }
}

impl ReferenceFormatter for ProviderReferences {
    fn format(&self, reference: &Reference, repo: Option<&RepoConfig>) -> String {
        let Some(repo) = repo else {
            return reference.value.clone();
        };

        format!(
            "[{}]({}/{}/{})",
            reference.value,
            repo.base_url(),
            Self::segment(repo.provider, reference.kind),
            reference.value.trim_start_matches('#')
        )
    }
}

/// Render the reference suffix of a commit line.
///
/// Pull requests come before issues. Without either, only the first
/// remaining reference is shown.
pub fn format_references(
    references: &[Reference],
    formatter: &dyn ReferenceFormatter,
    repo: Option<&RepoConfig>,
) -> String {
    let pull_requests = references
        .iter()
        .filter(|r| r.kind == ReferenceKind::PullRequest);
    let issues = references.iter().filter(|r| r.kind == ReferenceKind::Issue);

    let linked: Vec<String> = pull_requests
        .chain(issues)
        .map(|r| formatter.format(r, repo))
        .collect();

    if !linked.is_empty() {
        return format!(" ({})", linked.join(", "));
    }

    match references.first() {
        Some(first) => format!(" ({})", formatter.format(first, repo)),
        None => String::new(),
    }
}
