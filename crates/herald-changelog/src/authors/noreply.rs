//! GitHub no-reply address handling

use std::sync::LazyLock;

use regex::Regex;

/// Domain GitHub uses for masked commit emails
const NOREPLY_DOMAIN: &str = "noreply.github.com";

static NOREPLY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:\d+\+)?([a-z0-9-]+)@users\.noreply\.github\.com$").expect("Invalid regex")
});

/// Extract the login from `login@users.noreply.github.com` or
/// `12345+login@users.noreply.github.com`. The login is lowercased.
pub fn login_from_noreply(email: &str) -> Option<String> {
    NOREPLY_REGEX
        .captures(email.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_lowercase())
}

/// Whether an email is a GitHub no-reply address
pub fn is_noreply(email: &str) -> bool {
    email.to_lowercase().contains(NOREPLY_DOMAIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_from_noreply() {
        assert_eq!(
            login_from_noreply("alice@users.noreply.github.com").as_deref(),
            Some("alice")
        );
        assert_eq!(
            login_from_noreply("12345+bob-user@users.noreply.github.com").as_deref(),
            Some("bob-user")
        );
    }

    #[test]
    fn test_non_noreply_emails() {
        assert_eq!(login_from_noreply("alice@example.com"), None);
        assert_eq!(login_from_noreply("user@github.com"), None);
        assert_eq!(login_from_noreply(""), None);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(
            login_from_noreply("USERNAME@users.noreply.github.com").as_deref(),
            Some("username")
        );
        assert_eq!(
            login_from_noreply("12345+USERNAME@USERS.NOREPLY.GITHUB.COM").as_deref(),
            Some("username")
        );
    }

    #[test]
    fn test_is_noreply() {
        assert!(is_noreply("1+a@users.noreply.github.com"));
        assert!(is_noreply("A@Users.NoReply.GitHub.com"));
        assert!(!is_noreply("a@example.com"));
    }
}
