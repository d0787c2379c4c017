// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Validation engine.
//!
//! [`ValidationEngine`] evaluates expanded rules against data and collects
//! every failure. [`Validator`] is the configured, fluent front-end that
//! callers use: select a group, hand over data or a model, then call
//! `validate` or `validate_or_fail`.

mod codes;
mod evaluator;
mod messages;
mod result;
mod validator;

pub use codes::{ErrorCode, ErrorCodeMap, DEFAULT_ERROR_CODE};
pub use evaluator::ValidationEngine;
pub use messages::{default_template, MessageFormatter};
pub use result::{
    FailedRule, MessageBag, ValidationFailure, ValidationResult, MULTIPLE_FAILURES_MESSAGE,
};
pub use validator::Validator;
