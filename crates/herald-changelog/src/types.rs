//! Changelog types

use serde::{Deserialize, Serialize};

/// A commit ready for rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Short hash of the source commit
    #[serde(default)]
    pub hash: String,
    /// Commit type (feat, fix, etc.)
    #[serde(rename = "type")]
    pub kind: String,
    /// Scope (optional, in parentheses)
    #[serde(default)]
    pub scope: Option<String>,
    /// Commit description
    pub description: String,
    /// Whether this is a breaking change
    #[serde(default)]
    pub is_breaking: bool,
    /// Primary author
    #[serde(default)]
    pub author: Option<Author>,
    /// Issue, pull request and hash references
    #[serde(default)]
    pub references: Vec<Reference>,
}

impl Commit {
    /// Create a commit with no scope, author or references
    pub fn new(kind: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            hash: String::new(),
            kind: kind.into(),
            scope: None,
            description: description.into(),
            is_breaking: false,
            author: None,
            references: Vec::new(),
        }
    }

    /// Set the scope
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Mark as breaking
    pub fn breaking(mut self) -> Self {
        self.is_breaking = true;
        self
    }

    /// Set the primary author
    pub fn with_author(mut self, author: Author) -> Self {
        self.author = Some(author);
        self
    }

    /// Add a reference
    pub fn with_reference(mut self, reference: Reference) -> Self {
        self.references.push(reference);
        self
    }
}

/// A commit author
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Name as recorded in the commit
    pub name: String,
    /// Email as recorded in the commit
    #[serde(default)]
    pub email: Option<String>,
}

impl Author {
    /// Create an author with an email
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        let email = email.into();
        Self {
            name: name.into(),
            email: if email.is_empty() { None } else { Some(email) },
        }
    }
}

/// Kind of reference a commit points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReferenceKind {
    /// Pull or merge request
    PullRequest,
    /// Issue
    Issue,
    /// Commit hash
    Hash,
}

/// A pointer from a commit to a tracker item or commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    /// Reference kind
    #[serde(rename = "type")]
    pub kind: ReferenceKind,
    /// Raw value, e.g. `#123` or a short hash
    pub value: String,
}

impl Reference {
    /// Pull request reference
    pub fn pull_request(value: impl Into<String>) -> Self {
        Self {
            kind: ReferenceKind::PullRequest,
            value: value.into(),
        }
    }

    /// Issue reference
    pub fn issue(value: impl Into<String>) -> Self {
        Self {
            kind: ReferenceKind::Issue,
            value: value.into(),
        }
    }

    /// Commit hash reference
    pub fn hash(value: impl Into<String>) -> Self {
        Self {
            kind: ReferenceKind::Hash,
            value: value.into(),
        }
    }

    /// Numeric id with any leading `#` removed
    pub fn number(&self) -> Option<u64> {
        self.value.trim().trim_start_matches('#').parse().ok()
    }
}

/// Commit range a changelog is generated for
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseRange {
    /// Starting revision (exclusive)
    pub from: Option<String>,
    /// Ending revision
    pub to: String,
    /// Version being released
    pub new_version: Option<String>,
}

impl ReleaseRange {
    /// Create a range ending at `to`
    pub fn new(to: impl Into<String>) -> Self {
        Self {
            from: None,
            to: to.into(),
            new_version: None,
        }
    }

    /// Set the starting revision
    pub fn from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    /// Set the version being released
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.new_version = Some(version.into());
        self
    }
}

/// A rendered section in a changelog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Section title
    pub title: String,
    /// Rendered list lines
    pub lines: Vec<String>,
}

/// A contributor line source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    /// Normalised display name
    pub name: String,
    /// Resolved public handle
    pub handle: Option<String>,
    /// Email shown when no handle is known
    pub email: Option<String>,
}

/// A changelog entry for one release, before Markdown assembly
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangelogEntry {
    /// Version title
    pub title: String,
    /// Compare link line
    pub compare: Option<String>,
    /// One section per non-empty configured type
    pub sections: Vec<Section>,
    /// Breaking change lines, in render order
    pub breaking_changes: Vec<String>,
    /// Contributors, in first-seen order
    pub contributors: Vec<Contributor>,
}

/// One release parsed out of a changelog document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseSection {
    /// Version, when the heading is exactly a version
    pub version: Option<String>,
    /// Text between this heading and the next, trimmed
    pub body: String,
}

/// Result of parsing a changelog document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedChangelog {
    /// Releases in document order
    pub releases: Vec<ReleaseSection>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_number() {
        assert_eq!(Reference::pull_request("#123").number(), Some(123));
        assert_eq!(Reference::pull_request("45").number(), Some(45));
        assert_eq!(Reference::pull_request("#abc").number(), None);
        assert_eq!(Reference::pull_request("").number(), None);
    }

    #[test]
    fn test_reference_serde_tag() {
        let json = serde_json::to_string(&Reference::pull_request("#1")).unwrap();
        assert_eq!(json, r##"{"type":"pull-request","value":"#1"}"##);
    }

    #[test]
    fn test_author_empty_email() {
        assert_eq!(Author::new("Ada", "").email, None);
    }
}
