// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Variable binding for rule templates.
//!
//! Flattens the data under validation into `{:dotted.path}` keys so rule
//! expressions can reference other values, e.g. `max:{:limits.name}`.

mod binder;

pub use binder::{placeholder_key, resolve_path, Bindings};
pub(crate) use binder::render_value;
