//! Commit and tag records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Length of abbreviated hashes shown in changelogs
pub const SHORT_HASH_LEN: usize = 7;

/// One commit read from history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitInfo {
    pub hash: String,
    pub short_hash: String,
    /// Summary line
    pub message: String,
    /// Everything after the summary line, if non-blank
    pub body: Option<String>,
    pub author: String,
    pub author_email: String,
    pub timestamp: DateTime<Utc>,
}

impl CommitInfo {
    /// Build from a raw commit message, splitting off the summary line
    pub fn from_message(
        hash: impl Into<String>,
        raw_message: &str,
        author: impl Into<String>,
        author_email: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let hash = hash.into();
        let (summary, rest) = raw_message
            .trim_start()
            .split_once('\n')
            .unwrap_or((raw_message.trim_start(), ""));
        let body = rest.trim();

        Self {
            short_hash: hash.chars().take(SHORT_HASH_LEN).collect(),
            hash,
            message: summary.trim_end().to_string(),
            body: (!body.is_empty()).then(|| body.to_string()),
            author: author.into(),
            author_email: author_email.into(),
            timestamp,
        }
    }
}

/// A tag whose name parses as a semantic version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagInfo {
    /// Tag name as written, e.g. `v1.2.0`
    pub name: String,
    /// Id of the tagged commit
    pub target: String,
    /// Version without any `v` prefix
    pub version: Option<String>,
}

impl TagInfo {
    pub fn new(name: impl Into<String>, target: impl Into<String>) -> Self {
        let name = name.into();
        let version = tag_version(&name).map(|v| v.to_string());
        Self {
            name,
            target: target.into(),
            version,
        }
    }
}

/// Semantic version named by a tag (`1.2.3` or `v1.2.3`)
pub(crate) fn tag_version(name: &str) -> Option<semver::Version> {
    let trimmed = name.trim();
    semver::Version::parse(trimmed.strip_prefix('v').unwrap_or(trimmed)).ok()
}
