//! Configuration validation

use std::collections::HashSet;

use tracing::debug;

use crate::error::{ConfigError, Result};

use super::defaults::NEW_VERSION_PLACEHOLDER;
use super::types::Config;

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_changelog(config)?;
    validate_repo(config)?;
    validate_identity(config)?;
    debug!("configuration validation passed");
    Ok(())
}

fn invalid(field: impl Into<String>, message: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.into(),
        message: message.into(),
    }
}

fn validate_changelog(config: &Config) -> Result<()> {
    let mut seen = HashSet::new();
    for (i, entry) in config.changelog.types.iter().enumerate() {
        if entry.kind.trim().is_empty() {
            return Err(invalid(format!("changelog.types[{}].type", i), "type cannot be empty").into());
        }
        if entry.title.trim().is_empty() {
            return Err(invalid(format!("changelog.types[{}].title", i), "title cannot be empty").into());
        }
        if !seen.insert(entry.kind.as_str()) {
            return Err(invalid(
                format!("changelog.types[{}].type", i),
                format!("duplicate type '{}'", entry.kind),
            )
            .into());
        }
    }

    if !config.changelog.tag_body.contains(NEW_VERSION_PLACEHOLDER) {
        return Err(invalid(
            "changelog.tag_body",
            format!("must contain {} placeholder", NEW_VERSION_PLACEHOLDER),
        )
        .into());
    }

    Ok(())
}

fn validate_repo(config: &Config) -> Result<()> {
    if let Some(repo) = &config.repo {
        let mut parts = repo.repo.split('/');
        let valid = matches!(
            (parts.next(), parts.next(), parts.next()),
            (Some(owner), Some(name), None) if !owner.is_empty() && !name.is_empty()
        );
        if !valid {
            return Err(invalid("repo.repo", "must be in owner/name form").into());
        }
    }
    Ok(())
}

fn validate_identity(config: &Config) -> Result<()> {
    if !config.identity.directory_url.contains("{email}") {
        return Err(invalid("identity.directory_url", "must contain {email} placeholder").into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CommitTypeConfig, Provider, RepoConfig};

    #[test]
    fn test_validate_default_config() {
        let config = Config::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_duplicate_type() {
        let mut config = Config::default();
        config.changelog.types.push(CommitTypeConfig::new("feat", "Again"));
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_empty_title() {
        let mut config = Config::default();
        config.changelog.types = vec![CommitTypeConfig::new("feat", " ")];
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_repo_path() {
        let mut config = Config::default();
        config.repo = Some(RepoConfig::new(Provider::Github, "just-a-name"));
        assert!(validate_config(&config).is_err());

        config.repo = Some(RepoConfig::new(Provider::Github, "owner/name"));
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_directory_url() {
        let mut config = Config::default();
        config.identity.directory_url = "https://example.com/users".to_string();
        assert!(validate_config(&config).is_err());
    }
}
