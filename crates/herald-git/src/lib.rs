//! Herald Git - Commit history access for changelog generation
//!
//! This crate reads commit ranges and tags from a git repository and
//! infers the hosting repository from its remote URL.

mod commits;
mod remote;
mod repository;
mod tags;
pub mod types;

pub use remote::RemoteInfo;
pub use repository::{GitRepo, Result};
pub use types::{CommitInfo, TagInfo};
