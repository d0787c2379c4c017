// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Validation engine: binds data, expands a group and evaluates every rule.

use serde_json::Value;

use crate::binding::{resolve_path, Bindings};
use crate::config::ValidataConfig;
use crate::error::Result;
use crate::rules::{
    scalar_text, Capability, ExpandedRules, ParsedRule, Rule, RuleInput, RuleRegistry, SizeKind,
    NUMERIC_RULES,
};

use super::codes::ErrorCode;
use super::messages::MessageFormatter;
use super::result::{FailedRule, ValidationFailure, ValidationResult};

/// Validation engine.
///
/// Holds the rule registry, which is resolved once at construction and
/// read-only afterwards, so one engine can serve concurrent validations.
#[derive(Debug, Clone, Default)]
pub struct ValidationEngine {
    registry: RuleRegistry,
}

impl ValidationEngine {
    /// Create an engine with every built-in and pattern rule registered.
    pub fn new() -> Self {
        Self {
            registry: RuleRegistry::with_defaults(),
        }
    }

    /// Add a custom rule to the engine.
    pub fn add_rule(&mut self, rule: impl Rule + 'static) {
        self.registry.register(rule);
    }

    /// The rule registry.
    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Bind `data` and expand the rules of `group`.
    pub fn expand(
        &self,
        config: &ValidataConfig,
        group: &str,
        data: &Value,
    ) -> Result<ExpandedRules> {
        let bindings = Bindings::from_data(data);
        Ok(config.rules.expand(group, &bindings)?)
    }

    /// Validate `data` against `group`.
    ///
    /// Every rule of every field is evaluated and all failures are
    /// collected. Only configuration problems are returned as errors.
    pub fn validate(
        &self,
        config: &ValidataConfig,
        group: &str,
        data: &Value,
    ) -> Result<ValidationResult> {
        tracing::debug!("Validating group '{}'", group);

        let rules = self.expand(config, group, data)?;
        let formatter = MessageFormatter::new(&config.messages, &config.attributes);

        let mut result = self.evaluate(&rules, data, &formatter)?;
        result.group = group.to_string();
        result.error_codes = config.error_codes.matching(&result.failed_keys());

        tracing::debug!("{}", result.summary());
        Ok(result)
    }

    /// Validate and turn any failure into [`ValidataError::Validation`](crate::error::ValidataError::Validation).
    ///
    /// The failure carries the first custom error code (in map order) whose
    /// `field.rule` key failed, or the configured default code.
    pub fn validate_or_fail(
        &self,
        config: &ValidataConfig,
        group: &str,
        data: &Value,
    ) -> Result<ValidationResult> {
        let result = self.validate(config, group, data)?;
        if result.passed {
            return Ok(result);
        }

        let default = ErrorCode::Number(config.validator.default_error_code);
        let status_code = config.error_codes.resolve(&result.failed_keys(), &default);
        tracing::debug!("Validation failed with status code {}", status_code);

        Err(ValidationFailure::new(result, status_code).into())
    }

    /// Evaluate already expanded rules against `data`.
    pub fn evaluate(
        &self,
        rules: &ExpandedRules,
        data: &Value,
        formatter: &MessageFormatter<'_>,
    ) -> Result<ValidationResult> {
        let mut result = ValidationResult::new("");

        for (field, tokens) in rules {
            self.evaluate_field(field, tokens, data, formatter, &mut result)?;
        }

        Ok(result)
    }

    fn evaluate_field(
        &self,
        field: &str,
        tokens: &[String],
        data: &Value,
        formatter: &MessageFormatter<'_>,
        result: &mut ValidationResult,
    ) -> Result<()> {
        let mut resolved = Vec::with_capacity(tokens.len());
        for rule in tokens.iter().filter_map(|token| ParsedRule::parse(token)) {
            let capability = self.registry.resolve(&rule.name)?;
            resolved.push((rule, capability));
        }

        let has = |name: &str| resolved.iter().any(|(rule, _)| rule.name == name);
        let nullable = has("nullable");
        let bail = has("bail");
        let numeric = NUMERIC_RULES.iter().any(|name| has(*name));

        let value = resolve_path(data, field);
        if has("sometimes") && value.is_none() {
            tracing::debug!("Skipping absent field '{}'", field);
            return Ok(());
        }

        for (rule, capability) in &resolved {
            if matches!(capability, Capability::Marker) {
                continue;
            }
            if !is_validatable(value, capability.is_implicit(), nullable) {
                continue;
            }

            let input = RuleInput {
                field,
                value,
                parameters: &rule.parameters,
                data,
                numeric,
            };

            let (passed, fallback) = match capability {
                Capability::Pattern(check) => {
                    let passed =
                        scalar_text(value).is_some_and(|text| check(&text, &rule.parameters));
                    (passed, None)
                }
                Capability::Builtin { check, .. } => (check(&input)?, None),
                Capability::Custom(custom) => (custom.check(&input)?, custom.message()),
                Capability::Marker => continue,
            };

            tracing::debug!(
                "Rule '{}' on field '{}': {}",
                rule.name,
                field,
                if passed { "passed" } else { "failed" }
            );

            if !passed {
                let message =
                    formatter.format(field, rule, SizeKind::of(value, numeric), fallback);
                result.add_failure(
                    FailedRule {
                        field: field.to_string(),
                        rule: rule.name.clone(),
                        parameters: rule.parameters.clone(),
                    },
                    message,
                );

                if bail {
                    break;
                }
            }
        }

        Ok(())
    }
}

/// Whether a non-marker rule runs for `value`.
///
/// Absent fields and blank strings only run implicit rules. `null` runs
/// every rule unless the field is `nullable`.
fn is_validatable(value: Option<&Value>, implicit: bool, nullable: bool) -> bool {
    if implicit {
        return true;
    }

    match value {
        None => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(Value::Null) => !nullable,
        Some(_) => true,
    }
}
