//! CLI definition and command handling

pub mod commands;
pub mod output;

use anyhow::Context;
use clap::{Parser, Subcommand};

use commands::{ChangelogCommand, ReleasesCommand};

/// Generate Markdown changelogs from conventional commits
#[derive(Debug, Parser)]
#[command(name = "herald", author, version, about)]
pub struct Cli {
    /// Log progress to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print results and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// How results are printed
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Run as if started in this directory
    #[arg(short = 'C', long = "directory", global = true, value_name = "DIR")]
    pub directory: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Markdown or plain text
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a changelog entry from conventional commits
    Changelog(ChangelogCommand),

    /// List or show releases recorded in a changelog file
    Releases(ReleasesCommand),
}

impl Cli {
    /// Run the selected subcommand
    pub fn execute(&self) -> anyhow::Result<()> {
        if let Some(dir) = &self.directory {
            std::env::set_current_dir(dir)
                .with_context(|| format!("cannot enter {}", dir.display()))?;
        }

        match &self.command {
            Commands::Changelog(cmd) => cmd.execute(self),
            Commands::Releases(cmd) => cmd.execute(self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_changelog_flags() {
        let cli = Cli::parse_from([
            "herald",
            "--format",
            "json",
            "changelog",
            "--from",
            "v1.0.0",
            "--new-version",
            "1.1.0",
            "--no-authors",
        ]);

        assert_eq!(cli.format, OutputFormat::Json);
        let Commands::Changelog(cmd) = cli.command else {
            panic!("expected changelog command");
        };
        assert_eq!(cmd.from.as_deref(), Some("v1.0.0"));
        assert_eq!(cmd.to, "HEAD");
        assert_eq!(cmd.new_version.as_deref(), Some("1.1.0"));
        assert!(cmd.no_authors);
        assert!(!cmd.write);
    }

    #[test]
    fn test_parse_releases_with_global_after_subcommand() {
        let cli = Cli::parse_from(["herald", "releases", "HISTORY.md", "--version", "2.0.0", "-q"]);

        assert!(cli.quiet);
        let Commands::Releases(cmd) = cli.command else {
            panic!("expected releases command");
        };
        assert_eq!(cmd.file.as_deref(), Some(std::path::Path::new("HISTORY.md")));
        assert_eq!(cmd.version.as_deref(), Some("2.0.0"));
    }

    #[test]
    fn test_command_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_version_flag_stays_on_root() {
        let err = Cli::try_parse_from(["herald", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }
}
