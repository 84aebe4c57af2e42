//! Changelog generation

use herald_core::config::{ChangelogConfig, RepoConfig};
use tracing::{debug, info, instrument};

use crate::authors::{aggregate_authors, IdentityResolver};
use crate::formatter::{
    compare_changes, contributors, group_sections, version_title, EmojiConverter, Gitmoji,
    MarkdownFormatter, ProviderReferences, ReferenceFormatter,
};
use crate::types::{ChangelogEntry, Commit, ReleaseRange};

/// Changelog generator
pub struct ChangelogGenerator {
    config: ChangelogConfig,
    repo: Option<RepoConfig>,
    references: Box<dyn ReferenceFormatter>,
    emoji: Box<dyn EmojiConverter>,
    resolver: IdentityResolver,
    formatter: MarkdownFormatter,
}

impl ChangelogGenerator {
    /// Create a generator with provider links, gitmoji conversion and
    /// offline contributor resolution
    pub fn new(config: ChangelogConfig, repo: Option<RepoConfig>) -> Self {
        Self {
            config,
            repo,
            references: Box::new(ProviderReferences),
            emoji: Box::new(Gitmoji),
            resolver: IdentityResolver::offline(),
            formatter: MarkdownFormatter::new(),
        }
    }

    /// Use a custom contributor resolver
    pub fn with_resolver(mut self, resolver: IdentityResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Use a custom reference formatter
    pub fn with_reference_formatter<R: ReferenceFormatter + 'static>(mut self, references: R) -> Self {
        self.references = Box::new(references);
        self
    }

    /// Use a custom emoji converter
    pub fn with_emoji_converter<E: EmojiConverter + 'static>(mut self, emoji: E) -> Self {
        self.emoji = Box::new(emoji);
        self
    }

    /// Build a changelog entry, resolving contributor handles
    #[instrument(skip(self, commits), fields(commit_count = commits.len()))]
    pub async fn generate(&self, commits: &[Commit], range: &ReleaseRange) -> ChangelogEntry {
        info!(version = ?range.new_version, commit_count = commits.len(), "generating changelog entry");
        let repo = self.repo.as_ref();

        let title = version_title(range, &self.config);
        let templated = range.new_version.is_some().then_some(title.as_str());
        let compare = compare_changes(templated, range, repo);

        let (sections, breaking_changes) =
            group_sections(commits, &self.config, self.references.as_ref(), repo);

        let contributors = if self.config.no_authors {
            Vec::new()
        } else {
            let mut records = aggregate_authors(commits, &self.config);
            self.resolver.resolve_all(&mut records).await;
            contributors(&records, &self.config)
        };

        debug!(
            section_count = sections.len(),
            contributor_count = contributors.len(),
            "changelog entry built"
        );

        ChangelogEntry {
            title,
            compare,
            sections,
            breaking_changes,
            contributors,
        }
    }

    /// Format a changelog entry to Markdown
    pub fn format(&self, entry: &ChangelogEntry) -> String {
        self.emoji.convert(&self.formatter.format(entry), true)
    }

    /// Generate and format in one step
    pub async fn generate_markdown(&self, commits: &[Commit], range: &ReleaseRange) -> String {
        let entry = self.generate(commits, range).await;
        let output = self.format(&entry);
        debug!(output_len = output.len(), "changelog formatted");
        output
    }
}
