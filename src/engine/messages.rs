// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Failure message rendering.

use indexmap::IndexMap;

use crate::rules::{ParsedRule, SizeKind};

/// Renders failure messages from custom messages, attribute names and
/// the default templates.
#[derive(Debug, Clone, Copy)]
pub struct MessageFormatter<'a> {
    messages: &'a IndexMap<String, String>,
    attributes: &'a IndexMap<String, String>,
}

impl<'a> MessageFormatter<'a> {
    pub fn new(
        messages: &'a IndexMap<String, String>,
        attributes: &'a IndexMap<String, String>,
    ) -> Self {
        Self {
            messages,
            attributes,
        }
    }

    /// Render the message for `rule` failing on `field`.
    ///
    /// Lookup order: custom `field.rule`, custom `rule`, the rule's own
    /// template (`fallback`), then the default template.
    pub fn format(
        &self,
        field: &str,
        rule: &ParsedRule,
        size: SizeKind,
        fallback: Option<&str>,
    ) -> String {
        let template = self
            .messages
            .get(&format!("{}.{}", field, rule.name))
            .or_else(|| self.messages.get(&rule.name))
            .map(String::as_str)
            .or(fallback)
            .unwrap_or_else(|| default_template(&rule.name, size));

        self.replace(template, field, rule)
    }

    /// The display name of a field.
    pub fn attribute(&self, field: &str) -> String {
        match self.attributes.get(field) {
            Some(name) => name.clone(),
            None => field.replace('_', " "),
        }
    }

    fn replace(&self, template: &str, field: &str, rule: &ParsedRule) -> String {
        let params = &rule.parameters;
        let param = |index: usize| params.get(index).map(String::as_str).unwrap_or("");

        let mut message = template.replace(":attribute", &self.attribute(field));

        match rule.name.as_str() {
            "required_if" => {
                message = message
                    .replace(":other", &self.attribute(param(0)))
                    .replace(":value", &params.get(1..).unwrap_or(&[]).join(", "));
            }
            "required_with" | "required_without" => {
                let names: Vec<String> = params.iter().map(|p| self.attribute(p)).collect();
                message = message.replace(":values", &names.join(" / "));
            }
            "same" | "different" => {
                message = message.replace(":other", &self.attribute(param(0)));
            }
            "between" | "digits_between" => {
                message = message.replace(":min", param(0)).replace(":max", param(1));
            }
            "min" => message = message.replace(":min", param(0)),
            "max" => message = message.replace(":max", param(0)),
            "size" => message = message.replace(":size", param(0)),
            "digits" => message = message.replace(":digits", param(0)),
            "in" | "not_in" => message = message.replace(":values", &params.join(", ")),
            _ => {}
        }

        message.replace(":rule", &rule.name)
    }
}

/// Default English template for a rule.
pub fn default_template(rule: &str, size: SizeKind) -> &'static str {
    match (rule, size) {
        ("required", _) => "The :attribute field is required.",
        ("required_if", _) => "The :attribute field is required when :other is :value.",
        ("required_with", _) => "The :attribute field is required when :values is present.",
        ("required_without", _) => "The :attribute field is required when :values is not present.",
        ("present", _) => "The :attribute field must be present.",
        ("filled", _) => "The :attribute field must have a value.",
        ("accepted", _) => "The :attribute must be accepted.",
        ("string", _) => "The :attribute must be a string.",
        ("numeric", _) => "The :attribute must be a number.",
        ("integer", _) => "The :attribute must be an integer.",
        ("boolean", _) => "The :attribute field must be true or false.",
        ("array", _) => "The :attribute must be an array.",
        ("email", _) => "The :attribute must be a valid email address.",
        ("url", _) => "The :attribute format is invalid.",
        ("uuid", _) => "The :attribute must be a valid UUID.",
        ("ip", _) => "The :attribute must be a valid IP address.",
        ("date", _) => "The :attribute is not a valid date.",
        ("alpha", _) => "The :attribute may only contain letters.",
        ("alpha_num", _) => "The :attribute may only contain letters and numbers.",
        ("alpha_dash", _) => {
            "The :attribute may only contain letters, numbers, dashes and underscores."
        }
        ("digits", _) => "The :attribute must be :digits digits.",
        ("digits_between", _) => "The :attribute must be between :min and :max digits.",
        ("min", SizeKind::Numeric) => "The :attribute must be at least :min.",
        ("min", SizeKind::Array) => "The :attribute must have at least :min items.",
        ("min", SizeKind::String) => "The :attribute must be at least :min characters.",
        ("max", SizeKind::Numeric) => "The :attribute may not be greater than :max.",
        ("max", SizeKind::Array) => "The :attribute may not have more than :max items.",
        ("max", SizeKind::String) => "The :attribute may not be greater than :max characters.",
        ("between", SizeKind::Numeric) => "The :attribute must be between :min and :max.",
        ("between", SizeKind::Array) => "The :attribute must have between :min and :max items.",
        ("between", SizeKind::String) => {
            "The :attribute must be between :min and :max characters."
        }
        ("size", SizeKind::Numeric) => "The :attribute must be :size.",
        ("size", SizeKind::Array) => "The :attribute must contain :size items.",
        ("size", SizeKind::String) => "The :attribute must be :size characters.",
        ("in", _) | ("not_in", _) => "The selected :attribute is invalid.",
        ("regex", _) | ("not_regex", _) => "The :attribute format is invalid.",
        ("same", _) => "The :attribute and :other must match.",
        ("different", _) => "The :attribute and :other must be different.",
        ("confirmed", _) => "The :attribute confirmation does not match.",
        ("username", _) => "The :attribute must be a valid username.",
        ("hexcolor", _) => "The :attribute must be a valid hex color.",
        ("bic", _) => "The :attribute must be a valid BIC.",
        ("iban", _) => "The :attribute must be a valid IBAN.",
        ("isbn", _) | ("isbn10", _) | ("isbn13", _) => "The :attribute must be a valid ISBN.",
        _ => "The :attribute is invalid.",
    }
}
