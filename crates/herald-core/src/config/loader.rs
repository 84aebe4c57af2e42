//! Configuration discovery and loading

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{ConfigError, Result};

use super::defaults::config_file_names;
use super::types::Config;
use super::validation::validate_config;

/// On-disk config syntax, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Toml,
    Yaml,
}

impl ConfigFormat {
    fn of(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::Toml,
            _ => Self::Yaml,
        }
    }

    fn parse(self, content: &str) -> std::result::Result<Config, ConfigError> {
        Ok(match self {
            Self::Toml => toml::from_str(content)?,
            Self::Yaml => serde_yaml::from_str(content)?,
        })
    }
}

/// Read, parse and validate one config file
pub fn load_config(path: &Path) -> Result<Config> {
    let format = ConfigFormat::of(path);
    info!(path = %path.display(), ?format, "loading config");

    let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config = format.parse(&content)?;
    validate_config(&config)?;

    debug!(types = config.changelog.types.len(), repo = ?config.repo.as_ref().map(|r| &r.repo), "config ready");
    Ok(config)
}

/// Candidate paths for one directory, in lookup order
fn candidates(dir: &Path) -> impl Iterator<Item = PathBuf> + '_ {
    config_file_names()
        .into_iter()
        .flat_map(move |name| [dir.join(name), dir.join(".github").join(name)])
}

/// Nearest config file at or above `start_dir`.
///
/// At each level `<dir>/<name>` is checked before `<dir>/.github/<name>`.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    let found = start_dir
        .ancestors()
        .flat_map(candidates)
        .find(|path| path.is_file());

    match &found {
        Some(path) => info!(path = %path.display(), "found config file"),
        None => debug!(start_dir = %start_dir.display(), "no config file found"),
    }
    found
}

/// Load the nearest config file, failing when there is none
pub fn load_config_from_dir(dir: &Path) -> Result<(Config, PathBuf)> {
    let path = find_config(dir).ok_or_else(|| ConfigError::NotFound(dir.to_path_buf()))?;
    let config = load_config(&path)?;
    Ok((config, path))
}

/// Load the nearest config file, or defaults when none exists.
///
/// A config file that exists but fails to parse or validate is an error.
pub fn load_config_or_default(dir: &Path) -> Result<(Config, Option<PathBuf>)> {
    let Some(path) = find_config(dir) else {
        warn!(dir = %dir.display(), "no config found, using defaults");
        return Ok((Config::default(), None));
    };
    Ok((load_config(&path)?, Some(path)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Provider;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_toml() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("herald.toml");
        std::fs::write(&config_path, "[changelog]\nno_authors = true").unwrap();

        let found = find_config(temp.path());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_prefers_toml_over_yaml() {
        let temp = TempDir::new().unwrap();
        let toml_path = temp.path().join("herald.toml");
        let yaml_path = temp.path().join("herald.yaml");
        std::fs::write(&toml_path, "[changelog]\nno_authors = true").unwrap();
        std::fs::write(&yaml_path, "changelog:\n  no_authors: false").unwrap();

        let found = find_config(temp.path()).unwrap();
        assert_eq!(found, toml_path);
    }

    #[test]
    fn test_find_config_in_github_dir_of_parent() {
        let temp = TempDir::new().unwrap();
        let github_dir = temp.path().join(".github");
        std::fs::create_dir_all(&github_dir).unwrap();
        let config_path = github_dir.join("herald.toml");
        std::fs::write(&config_path, "").unwrap();

        let nested = temp.path().join("crates").join("inner");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_config(&nested), Some(config_path));
    }

    #[test]
    fn test_load_config_toml() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("herald.toml");
        std::fs::write(
            &config_path,
            "[changelog]\nhide_author_email = true\nexclude_authors = [\"ci\"]\n\n[repo]\nprovider = \"github\"\nrepo = \"acme/rocket\"\n",
        )
        .unwrap();

        let config = load_config(&config_path).unwrap();
        assert!(config.changelog.hide_author_email);
        assert_eq!(config.changelog.exclude_authors, vec!["ci".to_string()]);
        let repo = config.repo.unwrap();
        assert_eq!(repo.provider, Provider::Github);
        assert_eq!(repo.repo, "acme/rocket");
        // Unconfigured types fall back to the defaults
        assert_eq!(config.changelog.types.first().unwrap().kind, "feat");
    }

    #[test]
    fn test_load_config_yaml() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("herald.yaml");
        std::fs::write(
            &config_path,
            "changelog:\n  types:\n    - type: fix\n      title: Fixes\n",
        )
        .unwrap();

        let config = load_config(&config_path).unwrap();
        assert_eq!(config.changelog.types.len(), 1);
        assert_eq!(config.changelog.types[0].title, "Fixes");
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("herald.toml"),
            "[changelog]\ntag_body = \"release\"\n",
        )
        .unwrap();

        assert!(load_config_or_default(temp.path()).is_err());
    }

    #[test]
    fn test_load_config_from_dir_requires_file() {
        let temp = TempDir::new().unwrap();
        assert!(matches!(
            load_config_from_dir(temp.path()),
            Err(crate::HeraldError::Config(ConfigError::NotFound(_)))
        ));
    }

    #[test]
    fn test_missing_config_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let (config, path) = load_config_or_default(temp.path()).unwrap();
        assert!(path.is_none());
        assert!(!config.changelog.no_authors);
    }
}
