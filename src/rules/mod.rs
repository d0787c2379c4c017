// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule definitions: rule sets and groups, placeholder expansion, rule
//! parsing, the built-in rules and the rule registry.

mod builtin;
mod parse;
mod registry;
mod template;

pub use builtin::{
    as_number, is_empty_value, scalar_text, value_size, BuiltinFn, SizeKind, BUILTIN_RULES,
    MARKER_RULES, NUMERIC_RULES,
};
pub use parse::{normalize_rule_key, normalize_rule_name, ParsedRule};
pub use registry::{Capability, Rule, RuleInput, RuleRegistry};
pub use template::{
    expand, expand_token, ExpandedRules, FieldRules, RuleExpr, RuleSet, UNBOUND_PLACEHOLDER,
};
