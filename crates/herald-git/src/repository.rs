//! Repository handle

use std::path::{Path, PathBuf};

use git2::{ErrorCode, Repository};
use tracing::{debug, instrument};

use herald_core::error::GitError;

/// Result type for git operations
pub type Result<T> = std::result::Result<T, GitError>;

/// An open repository and its working directory
pub struct GitRepo {
    pub(crate) repo: Repository,
    root: PathBuf,
}

impl GitRepo {
    /// Open the repository rooted exactly at `path`
    #[instrument(fields(path = %path.display()))]
    pub fn open(path: &Path) -> Result<Self> {
        let repo = Repository::open(path).map_err(|e| match e.code() {
            ErrorCode::NotFound => GitError::RepositoryNotFound(path.to_path_buf()),
            _ => GitError::OpenFailed(e.message().to_string()),
        })?;
        Ok(Self::wrap(repo))
    }

    /// Open the repository containing `start`, searching upwards
    #[instrument(fields(start = %start.display()))]
    pub fn discover(start: &Path) -> Result<Self> {
        let repo = Repository::discover(start).map_err(|e| match e.code() {
            ErrorCode::NotFound => GitError::NotARepository(start.to_path_buf()),
            _ => GitError::OpenFailed(e.message().to_string()),
        })?;
        Ok(Self::wrap(repo))
    }

    fn wrap(repo: Repository) -> Self {
        let root = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();
        debug!(root = %root.display(), "repository opened");
        Self { repo, root }
    }

    /// Working directory, or the git dir of a bare repository
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Resolve a branch, tag or hash to the commit it names
    pub fn resolve(&self, rev: &str) -> Result<git2::Oid> {
        let commit = self
            .repo
            .revparse_single(rev)
            .and_then(|object| object.peel_to_commit())
            .map_err(|_| GitError::UnknownRevision(rev.to_string()))?;
        Ok(commit.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn canonical(path: &Path) -> PathBuf {
        path.canonicalize().unwrap()
    }

    #[test]
    fn test_open_at_root() {
        let temp = TempDir::new().unwrap();
        Repository::init(temp.path()).unwrap();

        let repo = GitRepo::open(temp.path()).unwrap();
        assert_eq!(canonical(repo.path()), canonical(temp.path()));
    }

    #[test]
    fn test_discover_from_nested_dir() {
        let temp = TempDir::new().unwrap();
        Repository::init(temp.path()).unwrap();
        let nested = temp.path().join("crates").join("deep");
        std::fs::create_dir_all(&nested).unwrap();

        let repo = GitRepo::discover(&nested).unwrap();
        assert_eq!(canonical(repo.path()), canonical(temp.path()));
    }

    #[test]
    fn test_open_plain_directory_fails() {
        let temp = TempDir::new().unwrap();
        assert!(GitRepo::open(temp.path()).is_err());
    }

    #[test]
    fn test_unresolvable_revision() {
        let temp = TempDir::new().unwrap();
        Repository::init(temp.path()).unwrap();
        let repo = GitRepo::open(temp.path()).unwrap();

        // An unborn HEAD does not resolve either.
        for rev in ["does-not-exist", "HEAD"] {
            assert!(matches!(repo.resolve(rev), Err(GitError::UnknownRevision(r)) if r == rev));
        }
    }
}
