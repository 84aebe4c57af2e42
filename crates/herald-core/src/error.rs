//! Error taxonomy shared by the Herald crates

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, HeraldError>;

/// Any failure surfaced to a Herald caller
#[derive(Debug, Error)]
pub enum HeraldError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Git(#[from] GitError),

    #[error(transparent)]
    Version(#[from] VersionError),

    #[error(transparent)]
    Changelog(#[from] ChangelogError),

    /// Only produced by callers that query lookups directly; the renderer
    /// never returns it
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

/// Problems finding, reading or validating `herald.toml` / `herald.yaml`
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no herald config found in {0} or its parents")]
    NotFound(PathBuf),

    /// A value parsed but broke a validation rule
    #[error("invalid config value `{field}`: {message}")]
    InvalidValue { field: String, message: String },

    #[error("invalid YAML config: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("invalid TOML config: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
}

/// Repository access failures
#[derive(Debug, Error)]
pub enum GitError {
    #[error("no git repository at {0}")]
    RepositoryNotFound(PathBuf),

    #[error("{0} is not inside a git repository")]
    NotARepository(PathBuf),

    #[error("cannot open repository: {0}")]
    OpenFailed(String),

    /// A `--from` / `--to` value that names no commit
    #[error("revision `{0}` does not name a commit")]
    UnknownRevision(String),

    #[error("remote `{0}` is not configured")]
    RemoteNotFound(String),

    #[error(transparent)]
    Git2(#[from] git2::Error),
}

/// Bad release version input
#[derive(Debug, Error)]
pub enum VersionError {
    /// Raw input and the parser's complaint
    #[error("`{0}` is not a semantic version: {1}")]
    ParseFailed(String, String),

    #[error(transparent)]
    Semver(#[from] semver::Error),
}

/// Changelog file handling failures
#[derive(Debug, Error)]
pub enum ChangelogError {
    #[error("changelog {0} does not exist")]
    FileNotFound(PathBuf),

    #[error("changelog has no release {0}")]
    ReleaseNotFound(String),

    #[error("cannot write changelog: {0}")]
    WriteFailed(String),

    #[error("cannot read changelog: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from remote identity lookups.
///
/// The contributor resolver treats every variant as "not found" and moves on
/// to its next strategy, so these never reach the caller of the renderer.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("{url} answered {status}")]
    Status { status: u16, url: String },

    #[error("unexpected response body: {0}")]
    Decode(String),

    /// Response decoded but carried no handle
    #[error("no handle for {0}")]
    NotFound(String),

    /// Lookup not available for the configured provider
    #[error("lookup unsupported: {0}")]
    Unsupported(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offending_value() {
        let err = HeraldError::from(GitError::UnknownRevision("v0.0.0".into()));
        assert_eq!(err.to_string(), "revision `v0.0.0` does not name a commit");

        let err = HeraldError::from(ConfigError::InvalidValue {
            field: "changelog.tag_body".into(),
            message: "must contain {{newVersion}} placeholder".into(),
        });
        assert!(err.to_string().starts_with("invalid config value `changelog.tag_body`"));
    }
}
