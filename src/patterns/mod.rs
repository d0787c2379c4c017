// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Format and checksum validators.
//!
//! Every validator here is a pure predicate over a field value and the
//! rule parameters. A mismatch is `false`, never an error.

mod formats;
mod iban;
mod isbn;

pub use formats::{is_valid_bic, is_valid_hexcolor, is_valid_username};
pub use iban::{iban_length, is_valid_iban};
pub use isbn::{is_valid_isbn, is_valid_isbn10, is_valid_isbn13};

use regex::{Regex, RegexBuilder};

/// Signature shared by all pattern validators.
pub type PatternFn = fn(&str, &[String]) -> bool;

/// Names and implementations of the pattern validators, in registration order.
pub const PATTERN_VALIDATORS: &[(&str, PatternFn)] = &[
    ("username", validate_username),
    ("hexcolor", validate_hexcolor),
    ("bic", validate_bic),
    ("iban", validate_iban),
    ("isbn", validate_isbn),
    ("isbn10", validate_isbn10),
    ("isbn13", validate_isbn13),
];

fn validate_username(value: &str, parameters: &[String]) -> bool {
    is_valid_username(value, first_parameter(parameters))
}

fn validate_hexcolor(value: &str, _parameters: &[String]) -> bool {
    is_valid_hexcolor(value)
}

fn validate_bic(value: &str, parameters: &[String]) -> bool {
    is_valid_bic(value, first_parameter(parameters))
}

fn validate_iban(value: &str, _parameters: &[String]) -> bool {
    is_valid_iban(value)
}

fn validate_isbn(value: &str, _parameters: &[String]) -> bool {
    is_valid_isbn(value)
}

fn validate_isbn10(value: &str, _parameters: &[String]) -> bool {
    is_valid_isbn10(value)
}

fn validate_isbn13(value: &str, _parameters: &[String]) -> bool {
    is_valid_isbn13(value)
}

fn first_parameter(parameters: &[String]) -> Option<&str> {
    parameters
        .first()
        .map(String::as_str)
        .filter(|p| !p.trim().is_empty())
}

/// Delimiters accepted around a caller-supplied pattern (`/^[a-z]+$/i`).
const PATTERN_DELIMITERS: &[char] = &['/', '#', '~', '!', '@', '%', '+'];

/// Compile a caller-supplied pattern.
///
/// Accepts either a bare regular expression or one wrapped in delimiters
/// with trailing flags. Supported flags are `i`, `m`, `s`, `x` and `U`;
/// `u` and `D` are accepted and ignored.
pub fn compile_pattern(pattern: &str) -> Result<Regex, String> {
    let (body, flags) = split_delimited(pattern).unwrap_or((pattern, ""));

    let mut builder = RegexBuilder::new(body);
    for flag in flags.chars() {
        match flag {
            'i' => {
                builder.case_insensitive(true);
            }
            'm' => {
                builder.multi_line(true);
            }
            's' => {
                builder.dot_matches_new_line(true);
            }
            'x' => {
                builder.ignore_whitespace(true);
            }
            'U' => {
                builder.swap_greed(true);
            }
            'u' | 'D' => {}
            other => return Err(format!("unsupported pattern flag '{}'", other)),
        }
    }

    builder.build().map_err(|e| e.to_string())
}

fn split_delimited(pattern: &str) -> Option<(&str, &str)> {
    let delimiter = pattern.chars().next()?;
    if !PATTERN_DELIMITERS.contains(&delimiter) {
        return None;
    }

    let close = pattern.rfind(delimiter)?;
    if close == 0 {
        return None;
    }

    let flags = &pattern[close + delimiter.len_utf8()..];
    if !flags.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    Some((&pattern[delimiter.len_utf8()..close], flags))
}

/// Match `value` against a caller pattern, treating a broken pattern as a mismatch.
fn matches_caller_pattern(pattern: &str, value: &str) -> bool {
    match compile_pattern(pattern) {
        Ok(re) => re.is_match(value),
        Err(message) => {
            tracing::warn!("Ignoring invalid pattern {:?}: {}", pattern, message);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_bare_pattern() {
        let re = compile_pattern("^[a-z]+$").unwrap();
        assert!(re.is_match("abc"));
        assert!(!re.is_match("ABC"));
    }

    #[test]
    fn test_compile_delimited_pattern_with_flags() {
        let re = compile_pattern("/^[a-z]+$/i").unwrap();
        assert!(re.is_match("ABC"));

        let re = compile_pattern("#^\\d{3}$#").unwrap();
        assert!(re.is_match("123"));
    }

    #[test]
    fn test_compile_rejects_unknown_flag() {
        assert!(compile_pattern("/abc/q").is_err());
    }

    #[test]
    fn test_compile_hash_prefixed_bare_pattern() {
        // A single leading '#' is part of the expression, not a delimiter.
        let re = compile_pattern("#?[a-f]{3}").unwrap();
        assert!(re.is_match("#abc"));
    }

    #[test]
    fn test_invalid_caller_pattern_is_mismatch() {
        assert!(!matches_caller_pattern("/([a-z/", "abc"));
    }

    #[test]
    fn test_registry_table_names() {
        let names: Vec<&str> = PATTERN_VALIDATORS.iter().map(|(n, _)| *n).collect();
        assert_eq!(
            names,
            vec!["username", "hexcolor", "bic", "iban", "isbn", "isbn10", "isbn13"]
        );
    }

    #[test]
    fn test_blank_parameter_uses_default() {
        assert!(validate_username("john.doe", &["".to_string()]));
    }
}
