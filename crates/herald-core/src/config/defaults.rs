//! Default configuration values

use super::types::CommitTypeConfig;

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "herald.toml";

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "herald.yaml";

/// Default version title template
pub const DEFAULT_TAG_BODY: &str = "v{{newVersion}}";

/// Placeholder substituted in the version title template
pub const NEW_VERSION_PLACEHOLDER: &str = "{{newVersion}}";

/// Default user-directory endpoint
pub const DEFAULT_DIRECTORY_URL: &str = "https://ungh.cc/users/find/{email}";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_TOML,
        DEFAULT_CONFIG_YAML,
        ".herald.toml",
        ".herald.yaml",
    ]
}

/// Commit types rendered when none are configured, in section order
pub fn default_commit_types() -> Vec<CommitTypeConfig> {
    [
        ("feat", "🚀 Enhancements"),
        ("perf", "🔥 Performance"),
        ("fix", "🩹 Fixes"),
        ("refactor", "💅 Refactors"),
        ("docs", "📖 Documentation"),
        ("build", "📦 Build"),
        ("types", "🌊 Types"),
        ("chore", "🏡 Chore"),
        ("examples", "🏀 Examples"),
        ("test", "✅ Tests"),
        ("style", "🎨 Styles"),
        ("ci", "🤖 CI"),
    ]
    .into_iter()
    .map(|(kind, title)| CommitTypeConfig::new(kind, title))
    .collect()
}
