// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Pattern-only validators: usernames, hex colours and BIC codes.

use lazy_static::lazy_static;
use regex::Regex;

use super::matches_caller_pattern;

lazy_static! {
    /// Default username pattern.
    static ref USERNAME_REGEX: Regex = Regex::new(r"(?i)^[A-Za-z0-9._-]+$").unwrap();

    /// Shorthand (three) or full (six) hex digits with an optional leading '#'.
    static ref HEXCOLOR_REGEX: Regex =
        Regex::new(r"^#?(?:[A-Fa-f0-9]{3}|[A-Fa-f0-9]{6})$").unwrap();

    /// Default Swift/BIC pattern: bank, country, location and optional branch.
    static ref BIC_REGEX: Regex = Regex::new(
        r"^[A-Za-z]{4,} ?[A-Za-z]{2,} ?[A-Za-z0-9]{2,} ?([A-Za-z0-9]{3,})?$"
    ).unwrap();
}

/// Check a username against `pattern`, or the default pattern when `None`.
pub fn is_valid_username(value: &str, pattern: Option<&str>) -> bool {
    match pattern {
        Some(pattern) => matches_caller_pattern(pattern, value),
        None => USERNAME_REGEX.is_match(value),
    }
}

/// Check a hex colour such as `#ff00aa` or `abc`.
pub fn is_valid_hexcolor(value: &str) -> bool {
    HEXCOLOR_REGEX.is_match(value)
}

/// Check a Swift/BIC code against `pattern`, or the default pattern when `None`.
pub fn is_valid_bic(value: &str, pattern: Option<&str>) -> bool {
    match pattern {
        Some(pattern) => matches_caller_pattern(pattern, value),
        None => BIC_REGEX.is_match(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_default() {
        assert!(is_valid_username("john.doe-99", None));
        assert!(is_valid_username("JOHN_DOE", None));
        assert!(!is_valid_username("john doe", None));
        assert!(!is_valid_username("", None));
        assert!(!is_valid_username("jöhn", None));
    }

    #[test]
    fn test_username_custom_pattern() {
        assert!(is_valid_username("abc", Some("/^[a-z]{3}$/")));
        assert!(!is_valid_username("abcd", Some("/^[a-z]{3}$/")));
        assert!(is_valid_username("ABC", Some("/^[a-z]{3}$/i")));
    }

    #[test]
    fn test_hexcolor() {
        assert!(is_valid_hexcolor("#ff00aa"));
        assert!(is_valid_hexcolor("ff0"));
        assert!(is_valid_hexcolor("#abc"));
        assert!(is_valid_hexcolor("#ABCDEF"));
        assert!(!is_valid_hexcolor("#ff00aa0"));
        assert!(!is_valid_hexcolor("xyz123"));
        assert!(!is_valid_hexcolor("#ff"));
    }

    #[test]
    fn test_hexcolor_rejects_partial_lengths() {
        assert!(!is_valid_hexcolor("#ff00a"));
        assert!(!is_valid_hexcolor("#abcd"));
        assert!(!is_valid_hexcolor("##abc"));
    }

    #[test]
    fn test_bic_default() {
        assert!(is_valid_bic("DEUTDEFF", None));
        assert!(is_valid_bic("DEUTDEFF500", None));
        assert!(is_valid_bic("DEUT DE FF 500", None));
        assert!(!is_valid_bic("DEU1DEFF", None));
        assert!(!is_valid_bic("DE", None));
    }

    #[test]
    fn test_bic_custom_pattern() {
        assert!(is_valid_bic("NDEADKKK", Some("/^[A-Z]{6}[A-Z0-9]{2}$/")));
        assert!(!is_valid_bic("NDEADKKK123", Some("/^[A-Z]{6}[A-Z0-9]{2}$/")));
    }
}
