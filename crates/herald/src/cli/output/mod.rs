//! Terminal styling for status lines
//!
//! Status lines go to stderr so stdout carries only changelog output.

use console::{style, Style, StyledObject, Term};

fn status(marker: StyledObject<&str>, message: &str) {
    // A closed stderr is not worth failing the command over.
    let _ = Term::stderr().write_line(&format!("{} {}", marker, message));
}

pub fn success(message: &str) {
    status(style("✓").green().bold(), message);
}

pub fn error(message: &str) {
    status(style("✗").red().bold(), message);
}

pub fn warning(message: &str) {
    status(style("!").yellow().bold(), message);
}

/// Indented `key: value` line with a dimmed key
pub fn key_value(key: &str, value: &str) -> String {
    format!("  {}: {}", style(key).dim(), value)
}

pub fn version_style() -> Style {
    Style::new().green().bold()
}

pub fn path_style() -> Style {
    Style::new().cyan()
}
