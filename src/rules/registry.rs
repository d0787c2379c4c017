// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule-name dispatch table.

use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::binding::resolve_path;
use crate::error::{Result, RuleError};
use crate::patterns::{PatternFn, PATTERN_VALIDATORS};

use super::builtin::{BuiltinFn, BUILTIN_RULES, MARKER_RULES};

/// Everything a rule sees when it is evaluated.
#[derive(Debug, Clone, Copy)]
pub struct RuleInput<'a> {
    /// Field under validation (a dotted path).
    pub field: &'a str,
    /// The field's value; `None` when the field is absent.
    pub value: Option<&'a Value>,
    /// Rule parameters after placeholder expansion.
    pub parameters: &'a [String],
    /// All data under validation.
    pub data: &'a Value,
    /// Whether the field also carries a `numeric` or `integer` rule.
    pub numeric: bool,
}

impl<'a> RuleInput<'a> {
    /// A parameter by position.
    pub fn parameter(&self, index: usize) -> Option<&'a str> {
        self.parameters.get(index).map(String::as_str)
    }

    /// Fail with a configuration error unless `count` parameters are present.
    pub fn require_parameters(&self, rule: &str, count: usize) -> Result<()> {
        if self.parameters.len() < count {
            return Err(RuleError::MissingParameter {
                rule: rule.to_string(),
                expected: count,
            }
            .into());
        }
        Ok(())
    }

    /// Look up another field of the data.
    pub fn other(&self, path: &str) -> Option<&'a Value> {
        resolve_path(self.data, path)
    }
}

/// Trait for caller-defined rules.
pub trait Rule: fmt::Debug + Send + Sync {
    /// The rule name used in rule expressions.
    fn name(&self) -> &str;

    /// Check the input and return whether it passes.
    fn check(&self, input: &RuleInput<'_>) -> Result<bool>;

    /// Default message template; `:attribute` and friends are replaced.
    fn message(&self) -> Option<&str> {
        None
    }

    /// Whether the rule runs even when the field is absent or empty.
    fn implicit(&self) -> bool {
        false
    }
}

/// How a rule name is evaluated.
#[derive(Debug, Clone)]
pub enum Capability {
    /// A pure format/checksum validator over the field's text.
    Pattern(PatternFn),
    /// A built-in rule.
    Builtin { check: BuiltinFn, implicit: bool },
    /// A flag that changes how the field is evaluated (`nullable`, `sometimes`, `bail`).
    Marker,
    /// A caller-registered rule.
    Custom(Arc<dyn Rule>),
}

impl Capability {
    /// Whether the rule runs for absent or empty values.
    pub fn is_implicit(&self) -> bool {
        match self {
            Capability::Builtin { implicit, .. } => *implicit,
            Capability::Custom(rule) => rule.implicit(),
            Capability::Pattern(_) | Capability::Marker => false,
        }
    }
}

/// Rule name to capability, built once per engine.
#[derive(Clone)]
pub struct RuleRegistry {
    rules: HashMap<String, Capability>,
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &self.names())
            .finish()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl RuleRegistry {
    /// An empty registry.
    pub fn empty() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    /// A registry holding every built-in, marker and pattern rule.
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();

        for (name, check, implicit) in BUILTIN_RULES {
            registry.insert(
                name,
                Capability::Builtin {
                    check: *check,
                    implicit: *implicit,
                },
            );
        }
        for name in MARKER_RULES {
            registry.insert(name, Capability::Marker);
        }
        for (name, validator) in PATTERN_VALIDATORS {
            registry.insert(name, Capability::Pattern(*validator));
        }

        registry
    }

    /// Register a capability under `name`, replacing any existing one.
    pub fn insert(&mut self, name: &str, capability: Capability) {
        self.rules.insert(name.to_lowercase(), capability);
    }

    /// Register a caller-defined rule.
    pub fn register(&mut self, rule: impl Rule + 'static) {
        let name = rule.name().to_string();
        tracing::debug!("Registering custom rule '{}'", name);
        self.insert(&name, Capability::Custom(Arc::new(rule)));
    }

    /// Resolve a rule name.
    pub fn resolve(&self, name: &str) -> std::result::Result<&Capability, RuleError> {
        self.rules.get(name).ok_or_else(|| RuleError::Unknown {
            rule: name.to_string(),
        })
    }

    /// Whether a rule name is known.
    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Registered rule names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
