// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Built-in validation rules.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;
use std::net::IpAddr;

use crate::binding::render_value;
use crate::error::{Result, RuleError};
use crate::patterns::compile_pattern;

use super::registry::RuleInput;

/// Signature of a built-in rule.
pub type BuiltinFn = fn(&RuleInput<'_>) -> Result<bool>;

/// Built-in rules: name, check and whether the rule is implicit.
pub const BUILTIN_RULES: &[(&str, BuiltinFn, bool)] = &[
    ("required", check_required, true),
    ("required_if", check_required_if, true),
    ("required_with", check_required_with, true),
    ("required_without", check_required_without, true),
    ("present", check_present, true),
    ("filled", check_filled, true),
    ("accepted", check_accepted, true),
    ("string", check_string, false),
    ("numeric", check_numeric, false),
    ("integer", check_integer, false),
    ("boolean", check_boolean, false),
    ("array", check_array, false),
    ("email", check_email, false),
    ("url", check_url, false),
    ("uuid", check_uuid, false),
    ("ip", check_ip, false),
    ("date", check_date, false),
    ("alpha", check_alpha, false),
    ("alpha_num", check_alpha_num, false),
    ("alpha_dash", check_alpha_dash, false),
    ("digits", check_digits, false),
    ("digits_between", check_digits_between, false),
    ("min", check_min, false),
    ("max", check_max, false),
    ("between", check_between, false),
    ("size", check_size, false),
    ("in", check_in, false),
    ("not_in", check_not_in, false),
    ("regex", check_regex, false),
    ("not_regex", check_not_regex, false),
    ("same", check_same, false),
    ("different", check_different, false),
    ("confirmed", check_confirmed, false),
];

/// Rules that only change how a field is evaluated.
pub const MARKER_RULES: &[&str] = &["nullable", "sometimes", "bail"];

/// Rules that make size rules compare numbers instead of lengths.
pub const NUMERIC_RULES: &[&str] = &["numeric", "integer"];

lazy_static! {
    static ref NUMERIC_REGEX: Regex =
        Regex::new(r"^\s*[+-]?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?\s*$").unwrap();

    static ref INTEGER_REGEX: Regex = Regex::new(r"^\s*[+-]?\d+\s*$").unwrap();

    static ref EMAIL_REGEX: Regex = Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*$"
    ).unwrap();

    static ref URL_REGEX: Regex =
        Regex::new(r"(?i)^(https?|ftps?)://[^\s/$.?#][^\s]*$").unwrap();

    static ref UUID_REGEX: Regex = Regex::new(
        r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$"
    ).unwrap();
}

/// What a size rule measures for a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeKind {
    /// The numeric value itself.
    Numeric,
    /// Number of characters.
    String,
    /// Number of elements.
    Array,
}

impl SizeKind {
    /// Determine the size kind for a value.
    pub fn of(value: Option<&Value>, numeric: bool) -> Self {
        match value {
            Some(Value::Array(_)) | Some(Value::Object(_)) => SizeKind::Array,
            Some(v) if numeric && as_number(v).is_some() => SizeKind::Numeric,
            _ => SizeKind::String,
        }
    }
}

/// Whether a value counts as missing for presence rules.
pub fn is_empty_value(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(Value::Object(map)) => map.is_empty(),
        Some(_) => false,
    }
}

/// The text of a scalar value; `None` for arrays and objects.
pub fn scalar_text(value: Option<&Value>) -> Option<String> {
    match value {
        None | Some(Value::Null) => Some(String::new()),
        Some(Value::Array(_)) | Some(Value::Object(_)) => None,
        Some(v) => Some(render_value(v)),
    }
}

/// Numeric interpretation of a number or numeric string.
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) if NUMERIC_REGEX.is_match(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// The size of a value, as compared by `min`, `max`, `between` and `size`.
pub fn value_size(value: Option<&Value>, numeric: bool) -> f64 {
    match SizeKind::of(value, numeric) {
        SizeKind::Numeric => value.and_then(as_number).unwrap_or(0.0),
        SizeKind::Array => match value {
            Some(Value::Array(items)) => items.len() as f64,
            Some(Value::Object(map)) => map.len() as f64,
            _ => 0.0,
        },
        SizeKind::String => scalar_text(value)
            .map(|s| s.chars().count() as f64)
            .unwrap_or(0.0),
    }
}

fn parameter_number(input: &RuleInput<'_>, index: usize) -> Option<f64> {
    input.parameter(index).and_then(|p| p.trim().parse::<f64>().ok())
}

fn parameter_count(input: &RuleInput<'_>, index: usize) -> Option<usize> {
    input.parameter(index).and_then(|p| p.trim().parse::<usize>().ok())
}

fn check_required(input: &RuleInput<'_>) -> Result<bool> {
    Ok(!is_empty_value(input.value))
}

fn check_required_if(input: &RuleInput<'_>) -> Result<bool> {
    input.require_parameters("required_if", 2)?;

    let other = input.other(&input.parameters[0]).map(render_value);
    let triggered = other.is_some_and(|other| input.parameters[1..].contains(&other));

    Ok(!triggered || !is_empty_value(input.value))
}

fn check_required_with(input: &RuleInput<'_>) -> Result<bool> {
    input.require_parameters("required_with", 1)?;

    let triggered = input
        .parameters
        .iter()
        .any(|field| !is_empty_value(input.other(field)));

    Ok(!triggered || !is_empty_value(input.value))
}

fn check_required_without(input: &RuleInput<'_>) -> Result<bool> {
    input.require_parameters("required_without", 1)?;

    let triggered = input
        .parameters
        .iter()
        .any(|field| is_empty_value(input.other(field)));

    Ok(!triggered || !is_empty_value(input.value))
}

fn check_present(input: &RuleInput<'_>) -> Result<bool> {
    Ok(input.value.is_some())
}

fn check_filled(input: &RuleInput<'_>) -> Result<bool> {
    Ok(input.value.is_none() || !is_empty_value(input.value))
}

fn check_accepted(input: &RuleInput<'_>) -> Result<bool> {
    Ok(match input.value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_i64() == Some(1),
        Some(Value::String(s)) => matches!(s.as_str(), "yes" | "on" | "1" | "true"),
        _ => false,
    })
}

fn check_string(input: &RuleInput<'_>) -> Result<bool> {
    Ok(matches!(input.value, Some(Value::String(_))))
}

fn check_numeric(input: &RuleInput<'_>) -> Result<bool> {
    Ok(input.value.and_then(as_number).is_some())
}

fn check_integer(input: &RuleInput<'_>) -> Result<bool> {
    Ok(match input.value {
        Some(Value::Number(n)) => {
            n.is_i64() || n.is_u64() || n.as_f64().is_some_and(|f| f.fract() == 0.0)
        }
        Some(Value::String(s)) => INTEGER_REGEX.is_match(s),
        _ => false,
    })
}

fn check_boolean(input: &RuleInput<'_>) -> Result<bool> {
    Ok(match input.value {
        Some(Value::Bool(_)) => true,
        Some(Value::Number(n)) => matches!(n.as_i64(), Some(0) | Some(1)),
        Some(Value::String(s)) => matches!(s.as_str(), "0" | "1"),
        _ => false,
    })
}

fn check_array(input: &RuleInput<'_>) -> Result<bool> {
    Ok(matches!(input.value, Some(Value::Array(_)) | Some(Value::Object(_))))
}

fn check_email(input: &RuleInput<'_>) -> Result<bool> {
    Ok(matches!(input.value, Some(Value::String(s)) if EMAIL_REGEX.is_match(s)))
}

fn check_url(input: &RuleInput<'_>) -> Result<bool> {
    Ok(matches!(input.value, Some(Value::String(s)) if URL_REGEX.is_match(s)))
}

fn check_uuid(input: &RuleInput<'_>) -> Result<bool> {
    Ok(matches!(input.value, Some(Value::String(s)) if UUID_REGEX.is_match(s)))
}

fn check_ip(input: &RuleInput<'_>) -> Result<bool> {
    Ok(matches!(input.value, Some(Value::String(s)) if s.parse::<IpAddr>().is_ok()))
}

fn check_date(input: &RuleInput<'_>) -> Result<bool> {
    let text = match input.value {
        Some(Value::String(s)) => s.trim(),
        _ => return Ok(false),
    };

    Ok(NaiveDate::parse_from_str(text, "%Y-%m-%d").is_ok()
        || NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S").is_ok()
        || DateTime::parse_from_rfc3339(text).is_ok())
}

fn text_matches(input: &RuleInput<'_>, allowed: impl Fn(char) -> bool) -> bool {
    match input.value {
        Some(Value::String(_)) | Some(Value::Number(_)) => scalar_text(input.value)
            .is_some_and(|text| !text.is_empty() && text.chars().all(&allowed)),
        _ => false,
    }
}

fn check_alpha(input: &RuleInput<'_>) -> Result<bool> {
    Ok(matches!(input.value, Some(Value::String(_))) && text_matches(input, char::is_alphabetic))
}

fn check_alpha_num(input: &RuleInput<'_>) -> Result<bool> {
    Ok(text_matches(input, char::is_alphanumeric))
}

fn check_alpha_dash(input: &RuleInput<'_>) -> Result<bool> {
    Ok(text_matches(input, |c| c.is_alphanumeric() || c == '-' || c == '_'))
}

fn digit_count(input: &RuleInput<'_>) -> Option<usize> {
    let text = scalar_text(input.value)?;
    if text.is_empty() || !text.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(text.len())
}

fn check_digits(input: &RuleInput<'_>) -> Result<bool> {
    input.require_parameters("digits", 1)?;

    Ok(match (digit_count(input), parameter_count(input, 0)) {
        (Some(count), Some(expected)) => count == expected,
        _ => false,
    })
}

fn check_digits_between(input: &RuleInput<'_>) -> Result<bool> {
    input.require_parameters("digits_between", 2)?;

    Ok(
        match (digit_count(input), parameter_count(input, 0), parameter_count(input, 1)) {
            (Some(count), Some(min), Some(max)) => min <= count && count <= max,
            _ => false,
        },
    )
}

fn check_min(input: &RuleInput<'_>) -> Result<bool> {
    input.require_parameters("min", 1)?;

    let size = value_size(input.value, input.numeric);
    Ok(parameter_number(input, 0).is_some_and(|min| size >= min))
}

fn check_max(input: &RuleInput<'_>) -> Result<bool> {
    input.require_parameters("max", 1)?;

    let size = value_size(input.value, input.numeric);
    Ok(parameter_number(input, 0).is_some_and(|max| size <= max))
}

fn check_between(input: &RuleInput<'_>) -> Result<bool> {
    input.require_parameters("between", 2)?;

    let size = value_size(input.value, input.numeric);
    Ok(
        match (parameter_number(input, 0), parameter_number(input, 1)) {
            (Some(min), Some(max)) => min <= size && size <= max,
            _ => false,
        },
    )
}

fn check_size(input: &RuleInput<'_>) -> Result<bool> {
    input.require_parameters("size", 1)?;

    let size = value_size(input.value, input.numeric);
    Ok(parameter_number(input, 0).is_some_and(|expected| size == expected))
}

fn contained(input: &RuleInput<'_>) -> bool {
    let allowed = |value: &Value| input.parameters.contains(&render_value(value));

    match input.value {
        Some(Value::Array(items)) => items.iter().all(allowed),
        Some(Value::Object(_)) => false,
        Some(value) => allowed(value),
        None => false,
    }
}

fn check_in(input: &RuleInput<'_>) -> Result<bool> {
    input.require_parameters("in", 1)?;
    Ok(contained(input))
}

fn check_not_in(input: &RuleInput<'_>) -> Result<bool> {
    input.require_parameters("not_in", 1)?;
    Ok(!contained(input))
}

fn regex_matches(input: &RuleInput<'_>, rule: &str) -> Result<Option<bool>> {
    input.require_parameters(rule, 1)?;

    let pattern = &input.parameters[0];
    let re = compile_pattern(pattern).map_err(|message| RuleError::InvalidPattern {
        pattern: pattern.clone(),
        message,
    })?;

    Ok(match input.value {
        Some(Value::String(_)) | Some(Value::Number(_)) => {
            scalar_text(input.value).map(|text| re.is_match(&text))
        }
        _ => None,
    })
}

fn check_regex(input: &RuleInput<'_>) -> Result<bool> {
    Ok(regex_matches(input, "regex")? == Some(true))
}

fn check_not_regex(input: &RuleInput<'_>) -> Result<bool> {
    Ok(regex_matches(input, "not_regex")? == Some(false))
}

fn check_same(input: &RuleInput<'_>) -> Result<bool> {
    input.require_parameters("same", 1)?;
    Ok(input.value.is_some() && input.other(&input.parameters[0]) == input.value)
}

fn check_different(input: &RuleInput<'_>) -> Result<bool> {
    input.require_parameters("different", 1)?;

    Ok(input.parameters.iter().all(|field| match input.other(field) {
        Some(other) => Some(other) != input.value,
        None => false,
    }))
}

fn check_confirmed(input: &RuleInput<'_>) -> Result<bool> {
    let confirmation = format!("{}_confirmation", input.field);
    Ok(input.value.is_some() && input.other(&confirmation) == input.value)
}
