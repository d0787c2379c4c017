// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule sets, validation groups and placeholder expansion.

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::binding::{placeholder_key, Bindings};
use crate::error::GroupError;

lazy_static! {
    /// A `{:dotted.path}` placeholder. Lazy so adjacent placeholders stay separate.
    static ref PLACEHOLDER_REGEX: Regex = Regex::new(r"(?s)\{:(.*?)\}").unwrap();
}

/// Literal substituted for placeholders without a binding.
pub const UNBOUND_PLACEHOLDER: &str = "null";

/// Rules for a single field: a piped string or a list of rule strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleExpr {
    /// `"required|max:10"`
    Piped(String),
    /// `["required", "max:10"]`
    List(Vec<String>),
}

impl RuleExpr {
    /// The individual rule tokens, in declaration order.
    pub fn tokens(&self) -> Vec<&str> {
        match self {
            RuleExpr::Piped(rules) => rules.split('|').collect(),
            RuleExpr::List(rules) => rules.iter().map(String::as_str).collect(),
        }
    }
}

impl From<&str> for RuleExpr {
    fn from(rules: &str) -> Self {
        RuleExpr::Piped(rules.to_string())
    }
}

impl From<String> for RuleExpr {
    fn from(rules: String) -> Self {
        RuleExpr::Piped(rules)
    }
}

impl From<Vec<&str>> for RuleExpr {
    fn from(rules: Vec<&str>) -> Self {
        RuleExpr::List(rules.into_iter().map(String::from).collect())
    }
}

impl From<Vec<String>> for RuleExpr {
    fn from(rules: Vec<String>) -> Self {
        RuleExpr::List(rules)
    }
}

/// Field name to rule expression, in declaration order.
pub type FieldRules = IndexMap<String, RuleExpr>;

/// Field name to expanded rule tokens, in declaration order.
pub type ExpandedRules = IndexMap<String, Vec<String>>;

/// Validation groups, each holding the rules for one scenario.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet {
    groups: IndexMap<String, FieldRules>,
}

impl RuleSet {
    /// Create an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a group, builder style.
    pub fn with_group<F, R>(
        mut self,
        name: impl Into<String>,
        rules: impl IntoIterator<Item = (F, R)>,
    ) -> Self
    where
        F: Into<String>,
        R: Into<RuleExpr>,
    {
        self.insert_group(name, rules);
        self
    }

    /// Add (or replace) a group.
    pub fn insert_group<F, R>(
        &mut self,
        name: impl Into<String>,
        rules: impl IntoIterator<Item = (F, R)>,
    ) where
        F: Into<String>,
        R: Into<RuleExpr>,
    {
        let rules = rules
            .into_iter()
            .map(|(field, expr)| (field.into(), expr.into()))
            .collect();
        self.groups.insert(name.into(), rules);
    }

    /// Select the rules of a group.
    pub fn group(&self, name: &str) -> Result<&FieldRules, GroupError> {
        if name.trim().is_empty() {
            return Err(GroupError::Empty);
        }

        self.groups.get(name).ok_or_else(|| GroupError::NotFound {
            group: name.to_string(),
        })
    }

    /// Expand the rules of a group against `bindings`.
    pub fn expand(&self, group: &str, bindings: &Bindings) -> Result<ExpandedRules, GroupError> {
        let rules = self.group(group)?;
        tracing::debug!("Expanding {} field(s) of group '{}'", rules.len(), group);
        Ok(expand(rules, bindings))
    }

    /// Names of all groups, in declaration order.
    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Whether a group exists.
    pub fn contains_group(&self, name: &str) -> bool {
        self.groups.contains_key(name)
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether there are no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Merge `other` into this set; groups in `other` replace same-named ones.
    pub fn extend(&mut self, other: RuleSet) {
        self.groups.extend(other.groups);
    }
}

/// Expand every field's rules, preserving field and token order.
pub fn expand(rules: &FieldRules, bindings: &Bindings) -> ExpandedRules {
    rules
        .iter()
        .map(|(field, expr)| {
            let tokens = expr
                .tokens()
                .into_iter()
                .map(|token| expand_token(token, bindings))
                .collect();
            (field.clone(), tokens)
        })
        .collect()
}

/// Substitute every placeholder in `token`.
///
/// Bound placeholders are replaced simultaneously, so substituted text is
/// never looked up again. Whatever still looks like a placeholder afterwards,
/// unbound or carried in by a bound value, becomes `null`.
pub fn expand_token(token: &str, bindings: &Bindings) -> String {
    let substituted = PLACEHOLDER_REGEX.replace_all(token, |caps: &Captures<'_>| {
        bindings
            .render(&placeholder_key(&caps[1]))
            .unwrap_or_else(|| caps[0].to_string())
    });

    PLACEHOLDER_REGEX
        .replace_all(&substituted, UNBOUND_PLACEHOLDER)
        .into_owned()
}
