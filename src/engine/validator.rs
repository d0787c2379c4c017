// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configured validator: the fluent entry point for callers.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use crate::config::ValidataConfig;
use crate::error::{DataError, Result};
use crate::rules::{ExpandedRules, RuleSet};

use super::codes::ErrorCodeMap;
use super::evaluator::ValidationEngine;
use super::result::ValidationResult;

/// A validator holding its rules, messages, attributes and error codes,
/// plus the data (or model) to validate.
///
/// ```
/// use serde_json::json;
/// use validata::engine::Validator;
/// use validata::rules::RuleSet;
///
/// let rules = RuleSet::new().with_group("create", vec![("name", "required|max:{:limit}")]);
/// let result = Validator::new(rules)
///     .with(json!({ "name": "johnny", "limit": 3 }))
///     .validate()
///     .unwrap();
///
/// assert!(!result.is_valid());
/// ```
#[derive(Debug, Clone)]
pub struct Validator {
    engine: Arc<ValidationEngine>,
    config: ValidataConfig,
    group: String,
    data: Value,
    model: Option<Value>,
}

impl Validator {
    /// Create a validator for `rules` with the default engine.
    pub fn new(rules: RuleSet) -> Self {
        Self::from_config(ValidataConfig {
            rules,
            ..ValidataConfig::default()
        })
    }

    /// Create a validator from a loaded configuration.
    pub fn from_config(config: ValidataConfig) -> Self {
        Self {
            engine: Arc::new(ValidationEngine::new()),
            group: config.validator.group.clone(),
            config,
            data: Value::Object(Default::default()),
            model: None,
        }
    }

    /// Use a shared engine (for example one with custom rules).
    pub fn with_engine(mut self, engine: Arc<ValidationEngine>) -> Self {
        self.engine = engine;
        self
    }

    /// Set the data to validate.
    pub fn with(mut self, data: Value) -> Self {
        self.data = data;
        self
    }

    /// Set a model to validate; its serialized form takes priority over `with` data.
    pub fn with_model<M: Serialize>(mut self, model: &M) -> Result<Self> {
        let value = serde_json::to_value(model).map_err(DataError::Serialize)?;
        self.model = Some(value);
        Ok(self)
    }

    /// Select the validation group.
    pub fn group(mut self, name: impl Into<String>) -> Self {
        self.group = name.into();
        self
    }

    /// Replace the rule set.
    pub fn set_rules(mut self, rules: RuleSet) -> Self {
        self.config.rules = rules;
        self
    }

    /// Replace the custom messages (`field.rule` or `rule` to template).
    pub fn set_messages(mut self, messages: IndexMap<String, String>) -> Self {
        self.config.messages = messages;
        self
    }

    /// Replace the custom attribute names.
    pub fn set_attributes(mut self, attributes: IndexMap<String, String>) -> Self {
        self.config.attributes = attributes;
        self
    }

    /// Replace the custom error codes.
    pub fn set_error_codes(mut self, error_codes: ErrorCodeMap) -> Self {
        self.config.error_codes = error_codes;
        self
    }

    /// The data that will be validated: the model if set, else the plain data.
    pub fn data(&self) -> &Value {
        self.model.as_ref().unwrap_or(&self.data)
    }

    /// The selected group.
    pub fn group_name(&self) -> &str {
        &self.group
    }

    /// The validator's configuration.
    pub fn config(&self) -> &ValidataConfig {
        &self.config
    }

    /// The rules of the selected group after placeholder expansion.
    pub fn rules(&self) -> Result<ExpandedRules> {
        self.engine.expand(&self.config, &self.group, self.data())
    }

    /// Validate, collecting every failure into the result.
    pub fn validate(&self) -> Result<ValidationResult> {
        self.engine.validate(&self.config, &self.group, self.data())
    }

    /// Validate and return [`ValidataError::Validation`](crate::error::ValidataError::Validation) on failure.
    pub fn validate_or_fail(&self) -> Result<ValidationResult> {
        self.engine.validate_or_fail(&self.config, &self.group, self.data())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ErrorCode;
    use crate::error::{GroupError, ValidataError};
    use serde::Serialize;
    use serde_json::json;

    #[derive(Serialize)]
    struct User {
        name: String,
        email: String,
    }

    fn rules() -> RuleSet {
        RuleSet::new()
            .with_group("create", vec![("name", "required"), ("email", "required|email")])
            .with_group("update", vec![("email", "email")])
    }

    #[test]
    fn test_defaults_to_create_group() {
        let validator = Validator::new(rules());
        assert_eq!(validator.group_name(), "create");

        let result = validator.validate().unwrap();
        assert_eq!(result.failed_keys(), vec!["name.required", "email.required"]);
    }

    #[test]
    fn test_group_selection() {
        let result = Validator::new(rules())
            .group("update")
            .with(json!({}))
            .validate()
            .unwrap();
        assert!(result.is_valid());

        let err = Validator::new(rules()).group("delete").validate().unwrap_err();
        assert!(matches!(err, ValidataError::Group(GroupError::NotFound { .. })));
    }

    #[test]
    fn test_model_takes_priority() {
        let user = User {
            name: "john".to_string(),
            email: "john@example.com".to_string(),
        };

        let validator = Validator::new(rules())
            .with(json!({ "name": "" }))
            .with_model(&user)
            .unwrap();

        assert_eq!(validator.data()["name"], "john");
        assert!(validator.validate().unwrap().is_valid());
    }

    #[test]
    fn test_messages_attributes_and_codes() {
        let mut messages = IndexMap::new();
        messages.insert("email.email".to_string(), "Bad :attribute.".to_string());
        let mut attributes = IndexMap::new();
        attributes.insert("email".to_string(), "e-mail".to_string());

        let validator = Validator::new(rules())
            .set_messages(messages)
            .set_attributes(attributes)
            .set_error_codes(ErrorCodeMap::new().with("email.email", "invalid-email"))
            .with(json!({ "name": "john", "email": "nope" }));

        let err = validator.validate_or_fail().unwrap_err();
        let failure = err.as_failure().unwrap();
        assert_eq!(failure.message, "Bad e-mail.");
        assert_eq!(failure.status_code, ErrorCode::Text("invalid-email".to_string()));
    }

    #[test]
    fn test_expanded_rules() {
        let rules = RuleSet::new().with_group("create", vec![("name", "max:{:limit}")]);
        let expanded = Validator::new(rules)
            .with(json!({ "limit": 12 }))
            .rules()
            .unwrap();
        assert_eq!(expanded["name"], vec!["max:12"]);
    }

    #[test]
    fn test_shared_engine() {
        let engine = Arc::new(ValidationEngine::new());
        let first = Validator::new(rules()).with_engine(Arc::clone(&engine));
        let second = Validator::new(rules()).with_engine(Arc::clone(&engine));
        assert!(!first.validate().unwrap().is_valid());
        assert!(!second.validate().unwrap().is_valid());
    }
}
