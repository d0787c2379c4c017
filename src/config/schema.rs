// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration schema definitions.
//!
//! Defines the validator profile that can be loaded from validata.toml.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::engine::{ErrorCodeMap, DEFAULT_ERROR_CODE};
use crate::rules::RuleSet;

/// A validator profile: rules per group plus messages, attribute names
/// and error codes.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ValidataConfig {
    /// Validator settings.
    pub validator: ValidatorSettings,

    /// Rules per group, then per field.
    pub rules: RuleSet,

    /// Custom messages keyed by `field.rule` or `rule`.
    pub messages: IndexMap<String, String>,

    /// Display names for fields.
    pub attributes: IndexMap<String, String>,

    /// Error codes keyed by `field.rule`.
    pub error_codes: ErrorCodeMap,
}

impl ValidataConfig {
    /// Load configuration from the default locations.
    pub fn load() -> crate::error::Result<Self> {
        super::loader::load_config()
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &std::path::Path) -> crate::error::Result<Self> {
        super::loader::load_config_from(path)
    }
}

/// Validator settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ValidatorSettings {
    /// Group used when the caller selects none.
    pub group: String,

    /// Status code of strict failures without a custom code.
    pub default_error_code: i64,
}

impl Default for ValidatorSettings {
    fn default() -> Self {
        Self {
            group: "create".to_string(),
            default_error_code: DEFAULT_ERROR_CODE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleExpr;

    #[test]
    fn test_default_config() {
        let config = ValidataConfig::default();
        assert_eq!(config.validator.group, "create");
        assert_eq!(config.validator.default_error_code, 412);
        assert!(config.rules.is_empty());
        assert!(config.error_codes.is_empty());
    }

    #[test]
    fn test_config_deserialization() {
        let toml = r#"
[rules.create]
email = "required|email"
username = ["required", "username"]
"#;
        let config: ValidataConfig = toml::from_str(toml).unwrap();
        let create = config.rules.group("create").unwrap();
        assert_eq!(create["email"], RuleExpr::Piped("required|email".to_string()));
        assert_eq!(
            create["username"],
            RuleExpr::List(vec!["required".to_string(), "username".to_string()])
        );

        let fields: Vec<&str> = create.keys().map(String::as_str).collect();
        assert_eq!(fields, vec!["email", "username"]);
    }

    #[test]
    fn test_config_serialization() {
        let mut config = ValidataConfig::default();
        config.attributes.insert("email".to_string(), "e-mail".to_string());

        let toml = toml::to_string(&config).unwrap();
        let parsed: ValidataConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, config);
    }
}
