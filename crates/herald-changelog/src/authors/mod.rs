//! Contributor aggregation and identity resolution

mod noreply;
mod resolver;

pub use noreply::{is_noreply, login_from_noreply};
pub use resolver::{IdentityResolver, Strategy};

use std::collections::{BTreeSet, HashMap};

use herald_core::config::ChangelogConfig;
use serde::Serialize;
use tracing::{debug, instrument, trace};

use crate::types::{Commit, ReferenceKind};

/// One distinct contributor across a set of commits
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorRecord {
    /// Normalised display name
    pub name: String,
    /// Every email seen for this name
    pub emails: BTreeSet<String>,
    /// Pull request numbers referenced by this author's commits
    pub pr_numbers: BTreeSet<u64>,
    /// Public handle, once resolved
    pub handle: Option<String>,
}

impl AuthorRecord {
    /// Create an empty record
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            emails: BTreeSet::new(),
            pr_numbers: BTreeSet::new(),
            handle: None,
        }
    }
}

/// Capitalise each whitespace-separated word and join with single spaces
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .map(crate::formatter::upper_first)
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_excluded(name: &str, email: Option<&str>, terms: &[String]) -> bool {
    terms
        .iter()
        .filter(|term| !term.is_empty())
        .any(|term| name.contains(term.as_str()) || email.is_some_and(|e| e.contains(term.as_str())))
}

/// Deduplicate commit authors by normalised name, in first-seen order.
///
/// Bots (`[bot]` in the name) and authors matching an exclusion term are
/// dropped. Pull request numbers that do not parse are ignored.
#[instrument(skip_all, fields(commit_count = commits.len()))]
pub fn aggregate_authors(commits: &[Commit], config: &ChangelogConfig) -> Vec<AuthorRecord> {
    let mut records: Vec<AuthorRecord> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for commit in commits {
        let Some(author) = &commit.author else {
            continue;
        };

        let name = normalize_name(&author.name);
        let email = author.email.as_deref().filter(|e| !e.is_empty());

        if name.is_empty() || name.to_lowercase().contains("[bot]") {
            trace!(name = %author.name, "skipping bot or unnamed author");
            continue;
        }
        if is_excluded(&name, email, &config.exclude_authors) {
            trace!(name = %name, "skipping excluded author");
            continue;
        }

        let slot = *index.entry(name.clone()).or_insert_with(|| {
            records.push(AuthorRecord::new(&name));
            records.len() - 1
        });
        let record = &mut records[slot];

        if let Some(email) = email {
            record.emails.insert(email.to_string());
        }

        record.pr_numbers.extend(
            commit
                .references
                .iter()
                .filter(|r| r.kind == ReferenceKind::PullRequest)
                .filter_map(|r| r.number()),
        );
    }

    debug!(author_count = records.len(), "authors aggregated");
    records
}
