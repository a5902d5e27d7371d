//! Embeddable command shell runtime.
//!
//! This crate turns the schemas and coercion engine of [`cmdshell_core`]
//! into a working shell:
//!
//! - [`tokenize`] — splits a raw line into a command name, positional
//!   tokens, and flags, honoring quotes.
//! - [`CommandRegistry`] — append-only name → command table, validated at
//!   registration.
//! - [`bind_arguments`] — binds tokens against a command's parameter
//!   schema, producing fully-populated [`BoundArgs`].
//! - [`Shell`] — the dispatcher: lookup, bind, invoke, render, with every
//!   failure contained at its boundary.
//! - [`format_value`] — the auto-formatter choosing plain, list, table,
//!   flat, or tree rendering from the value's shape.
//! - [`ShellContext`] — the single output sink, active [`FormatMode`], and
//!   host settings store handed to every handler.
//!
//! # Example
//!
//! ```
//! use cmdshell_core::{CommandSpec, ParamSpec, TypeSpec};
//! use cmdshell_runtime::{MemorySink, Shell, ShellContext};
//! use serde_json::json;
//!
//! let sink = MemorySink::new();
//! let mut shell = Shell::with_context(ShellContext::with_sink(Box::new(sink.clone())));
//! shell
//!     .register(
//!         CommandSpec::new("greet")
//!             .with_help("Greet a value of flexible type")
//!             .with_param(ParamSpec::with_default(
//!                 "value",
//!                 TypeSpec::union([TypeSpec::Int, TypeSpec::Str]),
//!                 json!("default"),
//!             )),
//!         |_, args| Ok(args.get("value").clone()),
//!     )
//!     .unwrap();
//!
//! assert_eq!(shell.execute("greet 123").unwrap(), json!(123));
//! assert_eq!(shell.execute("greet hello").unwrap(), json!("hello"));
//! ```

mod bind;
mod context;
mod dispatch;
mod error;
mod format;
mod registry;
mod token;

pub use bind::{BoundArgs, bind_arguments};
pub use context::{MemorySink, ShellContext};
pub use dispatch::Shell;
pub use error::{Result, ShellError};
pub use format::{
    FLAT_MAP_MAX_ENTRIES, FormatMode, SHORT_SEQUENCE_MAX, UnknownFormatMode, format_value,
};
pub use registry::{
    CommandDescriptor, CommandRegistry, Handler, HandlerError, HandlerResult, RegistryError,
};
pub use token::{ParseError, ParsedInvocation, tokenize};
