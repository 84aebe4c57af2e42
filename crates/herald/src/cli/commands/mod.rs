//! CLI commands

mod changelog;
mod releases;

pub use changelog::ChangelogCommand;
pub use releases::ReleasesCommand;
