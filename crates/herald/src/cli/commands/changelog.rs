//! Changelog command

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use tracing::{debug, info, warn};

use herald_changelog::authors::IdentityResolver;
use herald_changelog::document::{find_release, prepend_release, replace_release};
use herald_changelog::parser::{CommitParser, ConventionalParser};
use herald_changelog::types::{Commit, ReleaseRange};
use herald_changelog::ChangelogGenerator;
use herald_core::config::{load_config_or_default, validate_config, Config, RepoConfig};
use herald_core::error::{ChangelogError, VersionError};
use herald_git::GitRepo;

use crate::cli::output;
use crate::cli::{Cli, OutputFormat};

/// Generate a changelog entry
#[derive(Debug, Args)]
pub struct ChangelogCommand {
    /// Start of the range (exclusive); defaults to the latest version tag
    #[arg(long, value_name = "REF")]
    pub from: Option<String>,

    /// End of the range
    #[arg(long, value_name = "REF", default_value = "HEAD")]
    pub to: String,

    /// Version being released, used for the title and compare link
    #[arg(long, value_name = "VERSION")]
    pub new_version: Option<String>,

    /// Write to file (default: print to stdout)
    #[arg(short, long)]
    pub write: bool,

    /// Output file (defaults to configured changelog file)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Omit the contributors block
    #[arg(long)]
    pub no_authors: bool,

    /// Never fall back to showing contributor emails
    #[arg(long)]
    pub hide_author_email: bool,

    /// Resolve contributors from local information only
    #[arg(long)]
    pub offline: bool,
}

/// Parse `--new-version`, dropping a leading `v`.
///
/// Build metadata is rejected: release headings carry only
/// `major.minor.patch[-pre]`, so such a release could never be found again.
fn parse_new_version(raw: &str) -> Result<String, VersionError> {
    let trimmed = raw.trim();
    let version = trimmed.strip_prefix('v').unwrap_or(trimmed);
    let parsed = semver::Version::parse(version)
        .map_err(|e| VersionError::ParseFailed(raw.to_string(), e.to_string()))?;
    if !parsed.build.is_empty() {
        return Err(VersionError::ParseFailed(
            raw.to_string(),
            "build metadata is not allowed in a release version".to_string(),
        ));
    }
    Ok(parsed.to_string())
}

/// Configured repository, else the one inferred from `origin`
fn resolve_repo(config: &Config, git: &GitRepo) -> Option<RepoConfig> {
    if let Some(repo) = &config.repo {
        return Some(repo.clone());
    }

    match git.remote_info("origin") {
        Ok(info) => info.and_then(|i| i.to_repo_config()),
        Err(err) => {
            debug!(error = %err, "no repository inferred from remote");
            None
        }
    }
}

/// Merge a rendered release into the existing file contents.
///
/// A release already present for the same version is replaced in place.
fn merge_into(existing: Option<&str>, markdown: &str, version: Option<&str>) -> String {
    if let (Some(existing), Some(version)) = (existing, version) {
        if let Some(section) = find_release(markdown, version) {
            if let Some(updated) = replace_release(existing, version, &section.body) {
                info!(version, "replacing existing release");
                return updated;
            }
        }
    }
    prepend_release(existing, markdown)
}

fn write_changelog(path: &Path, markdown: &str, version: Option<&str>) -> anyhow::Result<()> {
    let existing = if path.exists() {
        Some(std::fs::read_to_string(path).map_err(ChangelogError::Io)?)
    } else {
        None
    };

    let updated = merge_into(existing.as_deref(), markdown, version);
    std::fs::write(path, updated)
        .map_err(|e| ChangelogError::WriteFailed(format!("{}: {}", path.display(), e)))?;
    Ok(())
}

impl ChangelogCommand {
    /// Execute the changelog command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(self.run(cli))
    }

    fn apply_overrides(&self, config: &mut Config) {
        if self.no_authors {
            config.changelog.no_authors = true;
        }
        if self.hide_author_email {
            config.changelog.hide_author_email = true;
        }
    }

    async fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(
            from = ?self.from,
            to = %self.to,
            version = ?self.new_version,
            write = self.write,
            offline = self.offline,
            "executing changelog command"
        );
        let cwd = std::env::current_dir()?;
        let (mut config, _) = load_config_or_default(&cwd)?;
        self.apply_overrides(&mut config);
        validate_config(&config)?;

        let new_version = self
            .new_version
            .as_deref()
            .map(parse_new_version)
            .transpose()?;

        let git = GitRepo::discover(&cwd)?;
        let repo = resolve_repo(&config, &git);

        let from = match &self.from {
            Some(from) => Some(from.clone()),
            None => git.find_latest_tag()?.map(|tag| tag.name),
        };

        let raw = git
            .commits_between(from.as_deref(), &self.to)
            .with_context(|| format!("reading commits up to {}", self.to))?;

        let parser =
            ConventionalParser::with_types(config.changelog.types.iter().map(|t| t.kind.clone()));
        let commits: Vec<Commit> = raw
            .iter()
            .filter_map(|c| parser.parse(c))
            .filter(|c| parser.should_include(c))
            .collect();
        debug!(raw = raw.len(), included = commits.len(), "commits parsed");

        if commits.is_empty() {
            warn!(from = ?from, to = %self.to, "no conventional commits in range");
            if !cli.quiet {
                output::warning("No conventional commits found in range.");
            }
            return Ok(());
        }

        let mut range = ReleaseRange::new(&self.to);
        range.from = from;
        range.new_version = new_version;

        let resolver = if self.offline {
            IdentityResolver::offline()
        } else {
            IdentityResolver::from_config(&config, repo.clone())
        };
        let generator =
            ChangelogGenerator::new(config.changelog.clone(), repo).with_resolver(resolver);

        let entry = generator.generate(&commits, &range).await;
        let markdown = generator.format(&entry);

        if self.write {
            let path = self
                .output
                .clone()
                .unwrap_or_else(|| cwd.join(&config.changelog.file));
            write_changelog(&path, &markdown, range.new_version.as_deref())?;

            if !cli.quiet {
                output::success(&format!(
                    "Changelog written to {}",
                    output::path_style().apply_to(path.display())
                ));
            }
            return Ok(());
        }

        match cli.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entry)?),
            OutputFormat::Text => println!("{}", markdown),
        }

        Ok(())
    }
}
