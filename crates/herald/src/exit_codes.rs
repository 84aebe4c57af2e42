//! Process exit codes

use herald_core::error::{ChangelogError, ConfigError, GitError, VersionError};
use herald_core::HeraldError;

/// Success
pub const SUCCESS: u8 = 0;

/// General error
pub const ERROR: u8 = 1;

/// Configuration error
pub const CONFIG_ERROR: u8 = 2;

/// Git error
pub const GIT_ERROR: u8 = 3;

/// Version error
pub const VERSION_ERROR: u8 = 4;

/// Changelog file error
pub const CHANGELOG_ERROR: u8 = 5;

/// Map an error chain to the exit code of its first recognised cause
pub fn for_error(err: &anyhow::Error) -> u8 {
    for cause in err.chain() {
        if let Some(code) = code_for(cause) {
            return code;
        }
    }
    ERROR
}

fn code_for(cause: &(dyn std::error::Error + 'static)) -> Option<u8> {
    if let Some(err) = cause.downcast_ref::<HeraldError>() {
        return match err {
            HeraldError::Config(_) => Some(CONFIG_ERROR),
            HeraldError::Git(_) => Some(GIT_ERROR),
            HeraldError::Version(_) => Some(VERSION_ERROR),
            HeraldError::Changelog(_) => Some(CHANGELOG_ERROR),
            HeraldError::Lookup(_) => None,
        };
    }

    if cause.is::<ConfigError>() {
        Some(CONFIG_ERROR)
    } else if cause.is::<GitError>() {
        Some(GIT_ERROR)
    } else if cause.is::<VersionError>() {
        Some(VERSION_ERROR)
    } else if cause.is::<ChangelogError>() {
        Some(CHANGELOG_ERROR)
    } else {
        None
    }
}
