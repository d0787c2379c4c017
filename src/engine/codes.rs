// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Custom error codes for failed `field.rule` pairs.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::rules::normalize_rule_key;

/// Status used when no failed rule has a custom code ("Unprocessable").
pub const DEFAULT_ERROR_CODE: i64 = 412;

/// A caller-defined error code: numeric or textual.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorCode {
    Number(i64),
    Text(String),
}

impl Default for ErrorCode {
    fn default() -> Self {
        ErrorCode::Number(DEFAULT_ERROR_CODE)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::Number(code) => write!(f, "{}", code),
            ErrorCode::Text(code) => f.write_str(code),
        }
    }
}

impl From<i64> for ErrorCode {
    fn from(code: i64) -> Self {
        ErrorCode::Number(code)
    }
}

impl From<&str> for ErrorCode {
    fn from(code: &str) -> Self {
        ErrorCode::Text(code.to_string())
    }
}

/// `field.rule` to error code, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorCodeMap {
    codes: IndexMap<String, ErrorCode>,
}

impl ErrorCodeMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a code for a `field.rule` key, builder style.
    pub fn with(mut self, key: impl Into<String>, code: impl Into<ErrorCode>) -> Self {
        self.insert(key, code);
        self
    }

    /// Add a code for a `field.rule` key.
    pub fn insert(&mut self, key: impl Into<String>, code: impl Into<ErrorCode>) {
        self.codes.insert(key.into(), code.into());
    }

    /// Codes whose key is among `failed_keys`, in map order, without duplicates.
    ///
    /// `failed_keys` must already be normalized with
    /// [`normalize_rule_key`](crate::rules::normalize_rule_key).
    pub fn matching(&self, failed_keys: &[String]) -> Vec<ErrorCode> {
        let mut matched: Vec<ErrorCode> = Vec::new();

        for (key, code) in &self.codes {
            let key = normalize_rule_key(key);
            if failed_keys.contains(&key) && !matched.contains(code) {
                matched.push(code.clone());
            }
        }

        matched
    }

    /// The code for a strict failure: the first match, else `default`.
    pub fn resolve(&self, failed_keys: &[String], default: &ErrorCode) -> ErrorCode {
        self.matching(failed_keys)
            .into_iter()
            .next()
            .unwrap_or_else(|| default.clone())
    }

    /// Number of configured codes.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether no codes are configured.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Merge `other` into this map; its codes win.
    pub fn extend(&mut self, other: ErrorCodeMap) {
        self.codes.extend(other.codes);
    }
}
