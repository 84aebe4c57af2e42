//! Commit ranges

use chrono::DateTime;
use git2::Sort;
use tracing::{debug, instrument};

use crate::repository::{GitRepo, Result};
use crate::types::CommitInfo;

impl GitRepo {
    /// Commits reachable from `to` but not from `from`, newest first.
    ///
    /// With no `from`, the whole history of `to` is returned.
    #[instrument(skip(self))]
    pub fn commits_between(&self, from: Option<&str>, to: &str) -> Result<Vec<CommitInfo>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push(self.resolve(to)?)?;
        if let Some(from) = from {
            revwalk.hide(self.resolve(from)?)?;
        }

        let commits = revwalk
            .map(|oid| -> Result<CommitInfo> {
                let commit = self.repo.find_commit(oid?)?;
                Ok(to_info(&commit))
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(from, to, count = commits.len(), "commit range read");
        Ok(commits)
    }
}

fn to_info(commit: &git2::Commit<'_>) -> CommitInfo {
    let author = commit.author();
    let timestamp = DateTime::from_timestamp(commit.time().seconds(), 0).unwrap_or_default();

    CommitInfo::from_message(
        commit.id().to_string(),
        &String::from_utf8_lossy(commit.message_bytes()),
        String::from_utf8_lossy(author.name_bytes()),
        String::from_utf8_lossy(author.email_bytes()),
        timestamp,
    )
}
