//! Commit parsing

mod conventional;

pub use conventional::ConventionalParser;

use crate::types::Commit;
use herald_git::CommitInfo;

/// Trait for commit parsers
pub trait CommitParser: Send + Sync {
    /// Parse a commit into a structured format
    fn parse(&self, commit: &CommitInfo) -> Option<Commit>;

    /// Check if a commit should be included in the changelog
    fn should_include(&self, commit: &Commit) -> bool;
}
