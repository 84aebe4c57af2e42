//! Markdown changelog formatter

use std::collections::HashMap;

use herald_core::config::{ChangelogConfig, Provider, RepoConfig, NEW_VERSION_PLACEHOLDER};
use tracing::{debug, instrument};

use super::reference::{format_references, ReferenceFormatter};
use crate::authors::{is_noreply, AuthorRecord};
use crate::types::{ChangelogEntry, Commit, Contributor, ReleaseRange, Section};

/// Marker placed before breaking change descriptions
pub const BREAKING_MARKER: &str = "⚠️";

/// Heading of the breaking changes block
pub const BREAKING_HEADING: &str = "#### ⚠️ Breaking Changes";

/// Heading of the contributors block
pub const CONTRIBUTORS_HEADING: &str = "### ❤️ Contributors";

/// Uppercase the first character, leaving the rest untouched
pub fn upper_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Render one commit as a Markdown list line
pub fn format_commit(
    commit: &Commit,
    references: &dyn ReferenceFormatter,
    repo: Option<&RepoConfig>,
) -> String {
    let mut line = String::from("- ");

    if let Some(scope) = commit.scope.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        line.push_str(&format!("**{}:** ", scope));
    }

    if commit.is_breaking {
        line.push_str(BREAKING_MARKER);
        line.push(' ');
    }

    line.push_str(&upper_first(&commit.description));
    line.push_str(&format_references(&commit.references, references, repo));
    line
}

/// Bucket commits by configured type.
///
/// Sections follow the configured type order; within a section commits are
/// listed in the reverse of their input order. Breaking lines are collected
/// in render order.
#[instrument(skip_all, fields(commit_count = commits.len()))]
pub fn group_sections(
    commits: &[Commit],
    config: &ChangelogConfig,
    references: &dyn ReferenceFormatter,
    repo: Option<&RepoConfig>,
) -> (Vec<Section>, Vec<String>) {
    let mut groups: HashMap<&str, Vec<&Commit>> = HashMap::new();
    for commit in commits {
        groups.entry(commit.kind.as_str()).or_default().push(commit);
    }

    let mut sections = Vec::new();
    let mut breaking = Vec::new();

    for type_config in &config.types {
        let Some(group) = groups.get(type_config.kind.as_str()) else {
            continue;
        };

        let mut lines = Vec::with_capacity(group.len());
        for commit in group.iter().rev() {
            let line = format_commit(commit, references, repo);
            if commit.is_breaking {
                breaking.push(line.clone());
            }
            lines.push(line);
        }

        sections.push(Section {
            title: type_config.title.clone(),
            lines,
        });
    }

    debug!(
        section_count = sections.len(),
        breaking_count = breaking.len(),
        "changelog sections built"
    );
    (sections, breaking)
}

/// Build the contributor list, or nothing when disabled
pub fn contributors(records: &[AuthorRecord], config: &ChangelogConfig) -> Vec<Contributor> {
    if config.no_authors {
        return Vec::new();
    }

    records
        .iter()
        .map(|record| Contributor {
            name: record.name.clone(),
            handle: record.handle.clone(),
            email: if config.hide_author_email {
                None
            } else {
                record.emails.iter().find(|e| !is_noreply(e)).cloned()
            },
        })
        .collect()
}

/// Render a contributor line: handle link, else email, else the bare name
pub fn format_contributor(contributor: &Contributor) -> String {
    match (&contributor.handle, &contributor.email) {
        (Some(handle), _) => format!(
            "- {} ([@{}](https://github.com/{}))",
            contributor.name, handle, handle
        ),
        (None, Some(email)) => format!("- {} <{}>", contributor.name, email),
        (None, None) => format!("- {}", contributor.name),
    }
}

/// Version title: the templated new version, else `from...to`
pub fn version_title(range: &ReleaseRange, config: &ChangelogConfig) -> String {
    match range.new_version.as_deref().filter(|v| !v.is_empty()) {
        Some(version) => config.tag_body.replace(NEW_VERSION_PLACEHOLDER, version),
        None => format!("{}...{}", range.from.as_deref().unwrap_or(""), range.to),
    }
}

/// Compare link line, when both a repository and a starting point are known
pub fn compare_changes(
    title: Option<&str>,
    range: &ReleaseRange,
    repo: Option<&RepoConfig>,
) -> Option<String> {
    let repo = repo?;
    let from = range.from.as_deref()?;
    let to = title.unwrap_or(&range.to);

    let path = match repo.provider {
        Provider::Bitbucket => format!("branches/compare/{}%0D{}", to, from),
        Provider::Github | Provider::Gitlab => format!("compare/{}...{}", from, to),
    };
    Some(format!("[compare changes]({}/{})", repo.base_url(), path))
}

/// Markdown changelog formatter
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    /// Create a new markdown formatter
    pub fn new() -> Self {
        Self
    }

    /// Assemble an entry into LF-joined, trimmed Markdown
    #[instrument(skip_all, fields(title = %entry.title, section_count = entry.sections.len()))]
    pub fn format(&self, entry: &ChangelogEntry) -> String {
        let mut lines: Vec<String> = vec![String::new(), format!("## {}", entry.title), String::new()];

        if let Some(compare) = &entry.compare {
            lines.push(compare.clone());
        }

        for section in &entry.sections {
            lines.push(String::new());
            lines.push(format!("### {}", section.title));
            lines.push(String::new());
            lines.extend(section.lines.iter().cloned());
        }

        if !entry.breaking_changes.is_empty() {
            lines.push(String::new());
            lines.push(BREAKING_HEADING.to_string());
            lines.push(String::new());
            lines.extend(entry.breaking_changes.iter().cloned());
        }

        if !entry.contributors.is_empty() {
            lines.push(String::new());
            lines.push(CONTRIBUTORS_HEADING.to_string());
            lines.push(String::new());
            lines.extend(entry.contributors.iter().map(format_contributor));
        }

        let output = lines.join("\n").trim().to_string();
        debug!(output_len = output.len(), "markdown changelog formatted");
        output
    }
}
