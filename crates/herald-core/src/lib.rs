//! Herald Core - Configuration and error types for changelog generation
//!
//! This crate provides the configuration model, its loading and validation,
//! and the error taxonomy shared by the other Herald crates.

pub mod config;
pub mod error;

pub use config::{ChangelogConfig, CommitTypeConfig, Config, IdentityConfig, Provider, RepoConfig};
pub use error::{HeraldError, LookupError, Result};
