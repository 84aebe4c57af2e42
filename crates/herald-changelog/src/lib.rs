//! Herald Changelog - Markdown changelog generation
//!
//! This crate turns parsed commits into a Markdown release entry, resolves
//! contributor handles, and parses existing changelog documents back into
//! release sections.

pub mod authors;
pub mod document;
pub mod formatter;
pub mod generator;
pub mod lookup;
pub mod parser;
pub mod types;

pub use authors::{aggregate_authors, AuthorRecord, IdentityResolver, Strategy};
pub use document::{find_release, parse_changelog, prepend_release, replace_release};
pub use generator::ChangelogGenerator;
pub use parser::{CommitParser, ConventionalParser};
pub use types::{
    Author, ChangelogEntry, Commit, Contributor, ParsedChangelog, Reference, ReferenceKind,
    ReleaseRange, ReleaseSection, Section,
};
