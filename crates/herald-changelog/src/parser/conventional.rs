//! Conventional Commits parser
//!
//! Parses commits in the Conventional Commits format:
//! https://www.conventionalcommits.org/
//!
//! Parenthesised `(#123)` markers in the description become pull request
//! references and are stripped from the text; any other `#123` becomes an
//! issue reference. The short hash is always appended as a hash reference.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use super::CommitParser;
use crate::types::{Author, Commit, Reference};
use herald_git::CommitInfo;

/// Regex for parsing conventional commit headers, with an optional leading emoji
static CONVENTIONAL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:(?::[^:\s]+:|\p{Extended_Pictographic}\x{FE0F}?)\s*)?(?P<type>[a-zA-Z]+)(?:\((?P<scope>[^)]+)\))?(?P<breaking>!)?: (?P<description>.+)$",
    )
    .expect("Invalid regex")
});

static PULL_REQUEST_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([ a-z]*(#\d+)\s*\)").expect("Invalid regex"));

static ISSUE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#\d+").expect("Invalid regex"));

/// Release and dependency chores are left out unless breaking
const SKIPPED_CHORE_SCOPES: &[&str] = &["deps", "release"];

/// Parser for Conventional Commits format
pub struct ConventionalParser {
    types: HashSet<String>,
}

impl ConventionalParser {
    /// Create a parser that includes commits of any type
    pub fn new() -> Self {
        Self {
            types: HashSet::new(),
        }
    }

    /// Only include commits whose type is one of `types`
    pub fn with_types<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            types: types.into_iter().map(Into::into).collect(),
        }
    }

    fn extract_references(description: &str) -> Vec<Reference> {
        let mut references: Vec<Reference> = PULL_REQUEST_REGEX
            .captures_iter(description)
            .filter_map(|caps| caps.get(1))
            .map(|m| Reference::pull_request(m.as_str()))
            .collect();

        for m in ISSUE_REGEX.find_iter(description) {
            if !references.iter().any(|r| r.value == m.as_str()) {
                references.push(Reference::issue(m.as_str()));
            }
        }

        references
    }
}

impl Default for ConventionalParser {
    fn default() -> Self {
        Self::new()
    }
}

impl CommitParser for ConventionalParser {
    fn parse(&self, commit: &CommitInfo) -> Option<Commit> {
        let Some(caps) = CONVENTIONAL_REGEX.captures(commit.message.trim()) else {
            trace!(hash = %commit.short_hash, "skipping non-conventional commit");
            return None;
        };

        let raw_description = caps.name("description")?.as_str();
        let body = commit.body.as_deref().unwrap_or("");

        let mut references = Self::extract_references(raw_description);
        references.push(Reference::hash(&commit.short_hash));

        let description = PULL_REQUEST_REGEX
            .replace_all(raw_description, "")
            .trim()
            .to_string();

        let author = (!commit.author.trim().is_empty())
            .then(|| Author::new(commit.author.trim(), commit.author_email.trim()));

        Some(Commit {
            hash: commit.short_hash.clone(),
            kind: caps.name("type")?.as_str().to_lowercase(),
            scope: caps
                .name("scope")
                .map(|m| m.as_str().trim().to_string())
                .filter(|s| !s.is_empty()),
            description,
            is_breaking: caps.name("breaking").is_some() || body.contains("BREAKING CHANGE:"),
            author,
            references,
        })
    }

    fn should_include(&self, commit: &Commit) -> bool {
        if !self.types.is_empty() && !self.types.contains(&commit.kind) {
            return false;
        }

        let skipped_chore = commit.kind == "chore"
            && commit
                .scope
                .as_deref()
                .is_some_and(|s| SKIPPED_CHORE_SCOPES.contains(&s));

        !skipped_chore || commit.is_breaking
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ReferenceKind;
    use chrono::Utc;

    fn make_commit(message: &str) -> CommitInfo {
        CommitInfo::from_message(
            "abc1234567890",
            message,
            "Test Author",
            "test@example.com",
            Utc::now(),
        )
    }

    #[test]
    fn test_parse_simple_feat() {
        let parser = ConventionalParser::new();
        let parsed = parser.parse(&make_commit("feat: add new feature")).unwrap();

        assert_eq!(parsed.kind, "feat");
        assert_eq!(parsed.description, "add new feature");
        assert!(parsed.scope.is_none());
        assert!(!parsed.is_breaking);
        assert_eq!(parsed.references, vec![Reference::hash("abc1234")]);
        assert_eq!(
            parsed.author,
            Some(Author::new("Test Author", "test@example.com"))
        );
    }

    #[test]
    fn test_parse_scope_and_breaking_marker() {
        let parser = ConventionalParser::new();
        let parsed = parser
            .parse(&make_commit("refactor(core)!: major refactoring"))
            .unwrap();

        assert_eq!(parsed.kind, "refactor");
        assert_eq!(parsed.scope.as_deref(), Some("core"));
        assert!(parsed.is_breaking);
    }

    #[test]
    fn test_breaking_change_in_body() {
        let parser = ConventionalParser::new();
        let commit = make_commit("feat: add feature\n\nBREAKING CHANGE: drops v1 API");
        assert!(parser.parse(&commit).unwrap().is_breaking);
    }

    #[test]
    fn test_parse_leading_emoji() {
        let parser = ConventionalParser::new();
        assert_eq!(
            parser.parse(&make_commit(":sparkles: feat: shiny")).unwrap().kind,
            "feat"
        );
        assert_eq!(
            parser.parse(&make_commit("🐛 fix: squash")).unwrap().kind,
            "fix"
        );
    }

    #[test]
    fn test_pull_request_and_issue_references() {
        let parser = ConventionalParser::new();
        let parsed = parser
            .parse(&make_commit("fix: handle empty input, see #7 (#42)"))
            .unwrap();

        assert_eq!(parsed.description, "handle empty input, see #7");
        let kinds: Vec<_> = parsed.references.iter().map(|r| (r.kind, r.value.as_str())).collect();
        assert_eq!(
            kinds,
            vec![
                (ReferenceKind::PullRequest, "#42"),
                (ReferenceKind::Issue, "#7"),
                (ReferenceKind::Hash, "abc1234"),
            ]
        );
    }

    #[test]
    fn test_closing_keyword_reference() {
        let parser = ConventionalParser::new();
        let parsed = parser.parse(&make_commit("fix: crash (closes #9)")).unwrap();
        assert_eq!(parsed.description, "crash");
        assert_eq!(parsed.references[0], Reference::pull_request("#9"));
    }

    #[test]
    fn test_trailers_do_not_change_the_author() {
        let parser = ConventionalParser::new();
        let commit = make_commit(
            "feat: pair work\n\nDone together.\n\nCo-authored-by: Bob Smith <bob@example.com>",
        );
        let parsed = parser.parse(&commit).unwrap();
        assert_eq!(parsed.author, Some(Author::new("Test Author", "test@example.com")));
        assert_eq!(parsed.description, "pair work");
    }

    #[test]
    fn test_parse_non_conventional() {
        let parser = ConventionalParser::new();
        assert!(parser.parse(&make_commit("Just a regular commit message")).is_none());
    }

    #[test]
    fn test_should_include() {
        let parser = ConventionalParser::with_types(["feat", "chore"]);

        let feat = parser.parse(&make_commit("feat: feature")).unwrap();
        assert!(parser.should_include(&feat));

        let docs = parser.parse(&make_commit("docs: readme")).unwrap();
        assert!(!parser.should_include(&docs));

        let release = parser.parse(&make_commit("chore(release): v1.0.0")).unwrap();
        assert!(!parser.should_include(&release));

        let breaking_deps = parser.parse(&make_commit("chore(deps)!: drop node 16")).unwrap();
        assert!(parser.should_include(&breaking_deps));
    }
}
