// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Parsing of expanded rule tokens (`max:10`, `in:a,b,c`).

/// Rules whose whole parameter string is a single pattern.
const PATTERN_PARAMETER_RULES: &[&str] = &["regex", "not_regex", "username", "bic"];

/// A rule token split into its name and parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRule {
    /// Lower-cased rule name, e.g. `max`.
    pub name: String,
    /// Rule parameters, e.g. `["10"]`.
    pub parameters: Vec<String>,
}

impl ParsedRule {
    /// Parse an expanded rule token. Returns `None` for blank tokens.
    pub fn parse(token: &str) -> Option<Self> {
        let token = token.trim();
        if token.is_empty() {
            return None;
        }

        let (name, rest) = match token.split_once(':') {
            Some((name, rest)) => (name, Some(rest)),
            None => (token, None),
        };
        let name = name.trim().to_lowercase();

        let parameters = match rest {
            None | Some("") => Vec::new(),
            Some(rest) if PATTERN_PARAMETER_RULES.contains(&name.as_str()) => vec![rest.to_string()],
            Some(rest) => rest.split(',').map(String::from).collect(),
        };

        Some(Self { name, parameters })
    }

    /// The rule name as used in `field.rule` error-code keys.
    ///
    /// Underscores are dropped, so `alpha_num` reports as `alphanum`.
    pub fn key_name(&self) -> String {
        normalize_rule_name(&self.name)
    }

    /// A parameter by position.
    pub fn parameter(&self, index: usize) -> Option<&str> {
        self.parameters.get(index).map(String::as_str)
    }
}

/// Normalize a rule name for error-code matching.
pub fn normalize_rule_name(name: &str) -> String {
    name.to_lowercase().replace('_', "")
}

/// Normalize a `field.rule` key for error-code matching.
///
/// The field part is lower-cased; the rule part is also stripped of
/// underscores. Keys without a dot are only lower-cased.
pub fn normalize_rule_key(key: &str) -> String {
    match key.rsplit_once('.') {
        Some((field, rule)) => format!("{}.{}", field.to_lowercase(), normalize_rule_name(rule)),
        None => key.to_lowercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_rule() {
        let rule = ParsedRule::parse("Required").unwrap();
        assert_eq!(rule.name, "required");
        assert!(rule.parameters.is_empty());
    }

    #[test]
    fn test_parse_parameters() {
        let rule = ParsedRule::parse("between:1,10").unwrap();
        assert_eq!(rule.name, "between");
        assert_eq!(rule.parameters, vec!["1", "10"]);
        assert_eq!(rule.parameter(1), Some("10"));
        assert_eq!(rule.parameter(2), None);
    }

    #[test]
    fn test_parse_pattern_parameter_is_not_split() {
        let rule = ParsedRule::parse("regex:/^[a-z]{1,3}:x$/").unwrap();
        assert_eq!(rule.name, "regex");
        assert_eq!(rule.parameters, vec!["/^[a-z]{1,3}:x$/"]);

        let rule = ParsedRule::parse("username:/^[a-z,.]+$/i").unwrap();
        assert_eq!(rule.parameters, vec!["/^[a-z,.]+$/i"]);
    }

    #[test]
    fn test_parse_blank_and_empty_parameters() {
        assert!(ParsedRule::parse("").is_none());
        assert!(ParsedRule::parse("  ").is_none());
        assert!(ParsedRule::parse("max:").unwrap().parameters.is_empty());
    }

    #[test]
    fn test_key_name() {
        let rule = ParsedRule::parse("alpha_num").unwrap();
        assert_eq!(rule.key_name(), "alphanum");
    }

    #[test]
    fn test_normalize_rule_key() {
        assert_eq!(normalize_rule_key("Email.Required"), "email.required");
        assert_eq!(normalize_rule_key("first_name.alpha_dash"), "first_name.alphadash");
        assert_eq!(normalize_rule_key("address.zip.digits"), "address.zip.digits");
        assert_eq!(normalize_rule_key("Email"), "email");
    }
}
