//! Typed parameter schemas and token coercion.
//!
//! This crate defines the foundational types for an embeddable command
//! shell:
//!
//! - [`TypeSpec`] — closed sum type describing what a parameter accepts
//!   (primitives, choices, optionals, ordered unions, lists, mappings).
//! - [`ParamSpec`] — a named parameter with type, optional default, and
//!   help text.
//! - [`CommandSpec`] — the full parameter schema of a registered command.
//! - [`Coercer`] — the type-coercion engine turning raw command-line
//!   tokens into typed [`Value`]s.
//!
//! Validation ([`validate_command`]) catches structural errors such as
//! duplicate parameters, required-after-defaulted ordering, and defaults
//! that do not conform to their declared type.
//!
//! Coercion is deterministic. Union alternatives are tried in declared
//! order and the first success wins, so `int | string` on `"123"` always
//! yields the integer.
//!
//! # Example
//!
//! ```
//! use cmdshell_core::{Coercer, CommandSpec, ParamSpec, TypeSpec, validate_command};
//! use serde_json::json;
//!
//! let spec = CommandSpec::new("greet")
//!     .with_help("Greet a value of flexible type")
//!     .with_param(ParamSpec::with_default(
//!         "value",
//!         TypeSpec::union([TypeSpec::Int, TypeSpec::Str]),
//!         json!("default"),
//!     ));
//! assert!(validate_command(&spec).is_empty());
//!
//! let coercer = Coercer::new();
//! let value_spec = &spec.params[0].type_spec;
//! assert_eq!(coercer.coerce("123", value_spec).unwrap(), json!(123));
//! assert_eq!(coercer.coerce("hello", value_spec).unwrap(), json!("hello"));
//! ```

mod coerce;
mod types;
mod validate;

pub use coerce::{
    Coercer, CoercionError, DEFAULT_LIST_SEPARATOR, EMPTY_MARKERS, FALSY_TOKENS, TRUTHY_TOKENS,
};
pub use types::*;
pub use validate::{ValidationError, validate_command};
