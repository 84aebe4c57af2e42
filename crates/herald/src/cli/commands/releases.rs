//! Releases command

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use herald_changelog::document::{find_release, parse_changelog};
use herald_changelog::types::ReleaseSection;
use herald_core::config::load_config_or_default;
use herald_core::error::ChangelogError;

use crate::cli::output;
use crate::cli::{Cli, OutputFormat};

/// List or show releases recorded in a changelog file
#[derive(Debug, Args)]
pub struct ReleasesCommand {
    /// Changelog file (defaults to configured changelog file)
    pub file: Option<PathBuf>,

    /// Print only the body of this release
    #[arg(long, value_name = "VERSION")]
    pub version: Option<String>,
}

impl ReleasesCommand {
    /// Execute the releases command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(file = ?self.file, version = ?self.version, "executing releases command");
        let cwd = std::env::current_dir()?;

        let path = match &self.file {
            Some(file) => cwd.join(file),
            None => {
                let (config, _) = load_config_or_default(&cwd)?;
                cwd.join(&config.changelog.file)
            }
        };

        if !path.exists() {
            return Err(ChangelogError::FileNotFound(path).into());
        }
        let contents = std::fs::read_to_string(&path).map_err(ChangelogError::Io)?;

        if let Some(version) = &self.version {
            let release = find_release(&contents, version)
                .ok_or_else(|| ChangelogError::ReleaseNotFound(version.clone()))?;

            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&release)?),
                OutputFormat::Text => println!("{}", release.body),
            }
            return Ok(());
        }

        let parsed = parse_changelog(&contents);
        match cli.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&parsed)?),
            OutputFormat::Text => {
                if parsed.releases.is_empty() {
                    if !cli.quiet {
                        output::warning(&format!("No releases found in {}", path.display()));
                    }
                    return Ok(());
                }
                for release in &parsed.releases {
                    println!("{}", summary_line(release));
                }
            }
        }

        Ok(())
    }
}

fn summary_line(release: &ReleaseSection) -> String {
    let version = match &release.version {
        Some(version) => output::version_style().apply_to(version).to_string(),
        None => "(unversioned)".to_string(),
    };
    let entries = release
        .body
        .lines()
        .filter(|line| line.trim_start().starts_with("- "))
        .count();
    output::key_value(&version, &format!("{} entries", entries))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_line_counts_list_entries() {
        let release = ReleaseSection {
            version: None,
            body: "### Fixes\n\n- One\n- Two\n\nSee docs".into(),
        };
        let line = console::strip_ansi_codes(&summary_line(&release)).to_string();
        assert_eq!(line, "  (unversioned): 2 entries");
    }
}
