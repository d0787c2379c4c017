// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Error types for validata.
//!
//! Two classes of errors exist. Configuration errors (unknown groups,
//! unknown rules, malformed rule parameters, unreadable config files) are
//! programmer errors and surface immediately. Data validation failures are
//! never errors during [`Validator::validate`](crate::engine::Validator::validate);
//! only the strict entry point turns them into [`ValidataError::Validation`].

use std::path::PathBuf;
use thiserror::Error;

use crate::engine::ValidationFailure;

/// The main error type for validata operations.
#[derive(Error, Debug)]
pub enum ValidataError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    // Group selection errors
    #[error("Group error: {0}")]
    Group(#[from] GroupError),

    // Rule definition errors
    #[error("Rule error: {0}")]
    Rule(#[from] RuleError),

    // Input data errors
    #[error("Data error: {0}")]
    Data(#[from] DataError),

    // Strict validation failure
    #[error("{0}")]
    Validation(Box<ValidationFailure>),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Generic error with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

impl From<ValidationFailure> for ValidataError {
    fn from(failure: ValidationFailure) -> Self {
        ValidataError::Validation(Box::new(failure))
    }
}

impl ValidataError {
    /// Returns the strict validation failure, if this error is one.
    pub fn as_failure(&self) -> Option<&ValidationFailure> {
        match self {
            ValidataError::Validation(failure) => Some(failure.as_ref()),
            _ => None,
        }
    }

    /// Whether this error stems from configuration rather than data.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ValidataError::Config(_) | ValidataError::Group(_) | ValidataError::Rule(_)
        )
    }
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to parse configuration: {message}")]
    ParseError { message: String },

    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    #[error("Configuration file already exists: {path}")]
    AlreadyExists { path: PathBuf },
}

/// Validation group selection errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GroupError {
    #[error("No group has been provided")]
    Empty,

    #[error("Group [{group}] not found in rules array")]
    NotFound { group: String },
}

/// Errors in rule definitions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    #[error("Unknown validation rule '{rule}'")]
    Unknown { rule: String },

    #[error("Validation rule '{rule}' requires at least {expected} parameter(s)")]
    MissingParameter { rule: String, expected: usize },

    #[error("Invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}

/// Errors in the data handed to a validator.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Failed to parse data: {message}")]
    Parse { message: String },

    #[error("Failed to serialize model: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type alias for validata operations.
pub type Result<T> = std::result::Result<T, ValidataError>;

/// Extension trait for adding context to errors.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E: std::error::Error + 'static> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| ValidataError::WithContext {
            context: context.into(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::NotFound {
            path: PathBuf::from("/path/to/validata.toml"),
        };
        assert!(err.to_string().contains("/path/to/validata.toml"));
    }

    #[test]
    fn test_group_error_display() {
        assert_eq!(GroupError::Empty.to_string(), "No group has been provided");

        let err = GroupError::NotFound {
            group: "update".to_string(),
        };
        assert_eq!(err.to_string(), "Group [update] not found in rules array");
    }

    #[test]
    fn test_rule_error_is_configuration() {
        let err: ValidataError = RuleError::Unknown {
            rule: "frobnicate".to_string(),
        }
        .into();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("frobnicate"));
        assert!(err.as_failure().is_none());
    }

    #[test]
    fn test_context() {
        let io: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        let err = io.context("Reading data.json").unwrap_err();
        assert_eq!(err.to_string(), "Reading data.json: missing");
    }
}
