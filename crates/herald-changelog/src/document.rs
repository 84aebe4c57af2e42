//! Parsing and updating existing changelog documents

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::types::{ParsedChangelog, ReleaseSection};

/// A level-2 or deeper heading containing a semantic version somewhere
static RELEASE_HEADING_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^#{2,}[ \t]+(?P<title>.*\d+\.\d+\.\d+(?:-[a-zA-Z0-9.]+)?.*)$")
        .expect("Invalid regex")
});

/// A heading text that is exactly a version
static VERSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^v?(\d+\.\d+\.\d+(?:-[a-zA-Z0-9.-]+)?)$").expect("Invalid regex")
});

/// Insertion point for new releases: the first level-2 or level-3 heading
static FIRST_ENTRY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^###?[ \t]+.*$").expect("Invalid regex"));

/// Title of a freshly created changelog
pub const CHANGELOG_TITLE: &str = "# Changelog";

struct HeadingSpan {
    version: Option<String>,
    body_start: usize,
    body_end: usize,
}

fn scan(contents: &str) -> Vec<HeadingSpan> {
    let headings: Vec<_> = RELEASE_HEADING_REGEX.captures_iter(contents).collect();

    headings
        .iter()
        .enumerate()
        .filter_map(|(i, caps)| {
            let whole = caps.get(0)?;
            let title = caps.name("title").map(|m| m.as_str().trim()).unwrap_or("");
            let body_end = headings
                .get(i + 1)
                .and_then(|next| next.get(0))
                .map(|m| m.start())
                .unwrap_or(contents.len());

            Some(HeadingSpan {
                version: VERSION_REGEX
                    .captures(title)
                    .and_then(|v| v.get(1))
                    .map(|m| m.as_str().to_string()),
                body_start: whole.end(),
                body_end,
            })
        })
        .collect()
}

/// Split a changelog document into releases, one per release heading.
///
/// A document without release headings yields no releases.
pub fn parse_changelog(contents: &str) -> ParsedChangelog {
    let releases: Vec<ReleaseSection> = scan(contents)
        .into_iter()
        .map(|span| ReleaseSection {
            version: span.version,
            body: contents[span.body_start..span.body_end].trim().to_string(),
        })
        .collect();

    debug!(release_count = releases.len(), "parsed changelog");
    ParsedChangelog { releases }
}

fn same_version(candidate: Option<&str>, wanted: &str) -> bool {
    let wanted = wanted.trim().trim_start_matches('v');
    candidate.is_some_and(|v| v == wanted)
}

/// Find the release whose heading is exactly `version` (a leading `v` is ignored)
pub fn find_release(contents: &str, version: &str) -> Option<ReleaseSection> {
    parse_changelog(contents)
        .releases
        .into_iter()
        .find(|r| same_version(r.version.as_deref(), version))
}

/// Replace the body of the release headed `version`, keeping its heading.
///
/// Returns `None` when no such release exists.
pub fn replace_release(contents: &str, version: &str, body: &str) -> Option<String> {
    let span = scan(contents)
        .into_iter()
        .find(|s| same_version(s.version.as_deref(), version))?;

    let rest = &contents[span.body_end..];
    let separator = if rest.is_empty() { "\n" } else { "\n\n" };

    Some(format!(
        "{}\n\n{}{}{}",
        &contents[..span.body_start],
        body.trim(),
        separator,
        rest
    ))
}

/// Insert a rendered release above the newest entry of an existing changelog.
///
/// A missing changelog starts with a `# Changelog` title.
pub fn prepend_release(existing: Option<&str>, markdown: &str) -> String {
    let mut document = match existing {
        Some(existing) => existing.to_string(),
        None => format!("{}\n\n", CHANGELOG_TITLE),
    };

    match FIRST_ENTRY_REGEX.find(&document).map(|m| m.start()) {
        Some(index) => document.insert_str(index, &format!("{}\n\n", markdown)),
        None => {
            document.truncate(document.trim_end().len());
            document.push_str(&format!("\n\n{}\n\n", markdown));
        }
    }

    document
}
