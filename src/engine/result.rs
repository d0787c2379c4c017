// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Validation result types.

use console::style;
use indexmap::IndexMap;
use serde::Serialize;
use thiserror::Error;

use crate::cli::args::OutputFormat;
use crate::rules::normalize_rule_key;

use super::codes::ErrorCode;

/// Message used by strict failures when more than one message exists.
pub const MULTIPLE_FAILURES_MESSAGE: &str =
    "Multiple validation rules failed. See \"errors\" for more details.";

/// Failure messages grouped by field, in evaluation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MessageBag {
    messages: IndexMap<String, Vec<String>>,
}

impl MessageBag {
    /// Create an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a message for a field.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.messages
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// Whether a field has messages.
    pub fn has(&self, field: &str) -> bool {
        self.messages.contains_key(field)
    }

    /// First message of a field.
    pub fn first(&self, field: &str) -> Option<&str> {
        self.messages
            .get(field)
            .and_then(|messages| messages.first())
            .map(String::as_str)
    }

    /// All messages of a field.
    pub fn get(&self, field: &str) -> &[String] {
        self.messages.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every message, flattened in order.
    pub fn all(&self) -> Vec<&str> {
        self.messages
            .values()
            .flat_map(|messages| messages.iter().map(String::as_str))
            .collect()
    }

    /// Fields with messages.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.messages.keys().map(String::as_str)
    }

    /// Iterate over fields and their messages.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.messages
            .iter()
            .map(|(field, messages)| (field.as_str(), messages.as_slice()))
    }

    /// Total number of messages.
    pub fn count(&self) -> usize {
        self.messages.values().map(Vec::len).sum()
    }

    /// Whether the bag is empty.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// A rule that failed for a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedRule {
    /// Field that failed.
    pub field: String,
    /// Rule name as written (lower-cased).
    pub rule: String,
    /// Expanded rule parameters.
    pub parameters: Vec<String>,
}

impl FailedRule {
    /// The normalized `field.rule` key used for error-code lookup.
    pub fn key(&self) -> String {
        normalize_rule_key(&format!("{}.{}", self.field, self.rule))
    }
}

/// Result of validating data against a group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    /// Group that was validated.
    pub group: String,
    /// Whether every rule passed.
    pub passed: bool,
    /// Messages per field.
    pub errors: MessageBag,
    /// Every failed rule, in evaluation order.
    pub failed: Vec<FailedRule>,
    /// Custom error codes triggered by the failed rules.
    pub error_codes: Vec<ErrorCode>,
}

impl ValidationResult {
    /// Create a passing result.
    pub fn new(group: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            passed: true,
            errors: MessageBag::new(),
            failed: Vec::new(),
            error_codes: Vec::new(),
        }
    }

    /// Record a failed rule and its message.
    pub fn add_failure(&mut self, failed: FailedRule, message: String) {
        self.passed = false;
        self.errors.add(failed.field.clone(), message);
        self.failed.push(failed);
    }

    /// Check if the validation passed.
    pub fn is_valid(&self) -> bool {
        self.passed
    }

    /// Whether a field has failed.
    pub fn has(&self, field: &str) -> bool {
        self.errors.has(field)
    }

    /// First message of a field.
    pub fn first(&self, field: &str) -> Option<&str> {
        self.errors.first(field)
    }

    /// Every message, in evaluation order.
    pub fn all(&self) -> Vec<&str> {
        self.errors.all()
    }

    /// Whether a field (`email`) or a `field.rule` key (`email.required`) failed.
    pub fn key_failed(&self, key: &str) -> bool {
        let normalized = normalize_rule_key(key);
        self.errors.has(key) || self.failed.iter().any(|f| f.key() == normalized)
    }

    /// Normalized `field.rule` keys of all failures.
    pub fn failed_keys(&self) -> Vec<String> {
        self.failed.iter().map(FailedRule::key).collect()
    }

    /// Get a summary string.
    pub fn summary(&self) -> String {
        if self.passed {
            format!("Valid ({})", self.group)
        } else {
            format!(
                "Invalid ({}): {} failed rule(s) across {} field(s)",
                self.group,
                self.failed.len(),
                self.errors.keys().count()
            )
        }
    }

    /// Print the result to stdout.
    pub fn print(&self, format: Option<OutputFormat>) {
        match format {
            Some(OutputFormat::Json) => print_json(self),
            _ => self.print_text(),
        }
    }

    fn print_text(&self) {
        let status = if self.passed {
            style("✓").green().bold()
        } else {
            style("✗").red().bold()
        };
        println!("{} {}", status, self.summary());

        for (field, messages) in self.errors.iter() {
            println!("  {}", style(field).cyan());
            for message in messages {
                println!("    {} {}", style("→").dim(), message);
            }
        }

        if !self.error_codes.is_empty() {
            let codes: Vec<String> = self.error_codes.iter().map(ToString::to_string).collect();
            println!("  {} {}", style("codes:").dim(), codes.join(", "));
        }
    }
}

/// Strict-mode failure carrying every error and the resolved status code.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[error("{message}")]
pub struct ValidationFailure {
    /// First message, or a summary when several rules failed.
    pub message: String,
    /// Resolved code: the first matching custom code, else the default.
    pub status_code: ErrorCode,
    /// All custom codes triggered by the failure.
    pub error_codes: Vec<ErrorCode>,
    /// Messages per field.
    pub errors: MessageBag,
    /// Every failed rule.
    pub failed: Vec<FailedRule>,
}

impl ValidationFailure {
    /// Build the failure from a failed result.
    pub fn new(result: ValidationResult, status_code: ErrorCode) -> Self {
        let message = if result.errors.count() > 1 {
            MULTIPLE_FAILURES_MESSAGE.to_string()
        } else {
            result.errors.all().first().copied().unwrap_or_default().to_string()
        };

        Self {
            message,
            status_code,
            error_codes: result.error_codes,
            errors: result.errors,
            failed: result.failed,
        }
    }

    /// First message of the failure, even when several rules failed.
    pub fn first_message(&self) -> Option<&str> {
        self.errors.all().first().copied()
    }

    /// Print the failure to stdout.
    pub fn print(&self, format: Option<OutputFormat>) {
        match format {
            Some(OutputFormat::Json) => print_json(self),
            _ => {
                println!(
                    "{} {} {}",
                    style("✗").red().bold(),
                    style(&self.status_code).red(),
                    self.message
                );
                for (field, messages) in self.errors.iter() {
                    for message in messages {
                        println!("  {} {}", style(field).cyan(), message);
                    }
                }
            }
        }
    }
}

fn print_json(value: &impl Serialize) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_default()
    );
}
