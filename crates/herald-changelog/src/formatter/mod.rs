//! Changelog formatters

mod emoji;
mod markdown;
mod reference;

pub use emoji::{EmojiConverter, Gitmoji};
pub use markdown::{
    compare_changes, contributors, format_commit, format_contributor, group_sections,
    upper_first, version_title, MarkdownFormatter, BREAKING_HEADING, CONTRIBUTORS_HEADING,
};
pub use reference::{format_references, ProviderReferences, ReferenceFormatter};
