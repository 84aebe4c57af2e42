//! Shortcode to emoji conversion

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Converts `:shortcode:` markers into glyphs
pub trait EmojiConverter: Send + Sync {
    /// Convert shortcodes in `text`; with `with_space`, a glyph is kept apart
    /// from the text that follows it
    fn convert(&self, text: &str, with_space: bool) -> String;
}

static SHORTCODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":([a-z0-9_+\-]+):").expect("Invalid regex"));

/// Shortcodes from the GitHub/gemoji registry, which covers the gitmoji set
#[derive(Debug, Clone, Copy, Default)]
pub struct Gitmoji;

impl EmojiConverter for Gitmoji {
    fn convert(&self, text: &str, with_space: bool) -> String {
        let mut output = String::with_capacity(text.len());
        let mut last = 0;

        for caps in SHORTCODE_REGEX.captures_iter(text) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            output.push_str(&text[last..whole.start()]);
            output.push_str(&replacement(&caps, text, whole.end(), with_space));
            last = whole.end();
        }

        output.push_str(&text[last..]);
        output
    }
}

fn replacement(caps: &Captures<'_>, text: &str, end: usize, with_space: bool) -> String {
    let Some(emoji) = emojis::get_by_shortcode(&caps[1]) else {
        return caps[0].to_string();
    };

    let followed_by_word = text[end..].chars().next().is_some_and(char::is_alphanumeric);
    if with_space && followed_by_word {
        format!("{} ", emoji.as_str())
    } else {
        emoji.as_str().to_string()
    }
}
