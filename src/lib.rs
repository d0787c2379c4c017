// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! validata - Declarative validation engine
//!
//! Validates structured data against rule sets organised in named groups
//! (`create`, `update`, ...). Rule expressions may embed `{:dotted.path}`
//! placeholders that are filled from the data under validation before the
//! rules run.
//!
//! # Features
//!
//! - **Rule Templates**: `max:{:limits.name}` resolves against the data
//! - **Validation Groups**: one rule set per scenario
//! - **Checksum Validators**: IBAN, ISBN-10/13, BIC, hex colors, usernames
//! - **Aggregated Results**: every failure is collected, never thrown
//! - **Strict Mode**: a single failure with a resolved error code
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use validata::engine::{ErrorCode, ErrorCodeMap, Validator};
//! use validata::rules::RuleSet;
//!
//! let rules = RuleSet::new().with_group(
//!     "create",
//!     vec![("email", "required|email"), ("iban", "nullable|iban")],
//! );
//!
//! let validator = Validator::new(rules)
//!     .set_error_codes(ErrorCodeMap::new().with("email.email", 4001))
//!     .with(json!({ "email": "nope", "iban": "GB82WEST12345698765432" }));
//!
//! let result = validator.validate().unwrap();
//! assert!(result.key_failed("email.email"));
//!
//! let err = validator.validate_or_fail().unwrap_err();
//! assert_eq!(err.as_failure().unwrap().status_code, ErrorCode::Number(4001));
//! ```

// Module declarations
pub mod binding;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod patterns;
pub mod rules;

// Re-exports for convenience
pub use config::ValidataConfig;
pub use engine::{ValidationEngine, ValidationResult, Validator};
pub use error::{Result, ValidataError};

/// Version information embedded at compile time.
pub mod version {
    /// The current version of validata.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    /// The git SHA at compile time (if available).
    pub const GIT_SHA: Option<&str> = option_env!("VERGEN_GIT_SHA");

    /// The git commit date at compile time (if available).
    pub const GIT_COMMIT_DATE: Option<&str> = option_env!("VERGEN_GIT_COMMIT_DATE");

    /// Get a formatted version string.
    pub fn version_string() -> String {
        let short = |sha: &str| sha.chars().take(7).collect::<String>();
        match (GIT_SHA, GIT_COMMIT_DATE) {
            (Some(sha), Some(date)) => format!("{} ({} {})", VERSION, short(sha), date),
            (Some(sha), None) => format!("{} ({})", VERSION, short(sha)),
            _ => VERSION.to_string(),
        }
    }

}
