//! Command dispatch.
//!
//! The [`Shell`] is the central switchboard: it looks the command up,
//! tokenizes the line, binds arguments through the coercion engine, runs
//! the handler, and renders the returned value. Every failure is contained
//! at this boundary — reported as a diagnostic on the output sink and
//! returned as a non-fatal error — so a hosting loop can keep issuing
//! commands regardless of what the previous one did.

use cmdshell_core::{Coercer, CoercionError, CommandSpec, Value};
use serde_json::Map;
use tracing::debug;

use crate::bind::{BoundArgs, bind_arguments};
use crate::context::ShellContext;
use crate::error::{Result, ShellError};
use crate::format::format_value;
use crate::registry::{CommandRegistry, HandlerResult, RegistryError};
use crate::token::tokenize;

/// An embeddable command shell: registry, context, and coercion engine.
///
/// Execution is strictly sequential; one command runs to completion before
/// the next is dispatched. There is no cancellation or timeout — a handler
/// that never returns blocks the shell.
///
/// # Examples
///
/// ```
/// use cmdshell_core::{CommandSpec, ParamSpec, TypeSpec};
/// use cmdshell_runtime::{MemorySink, Shell, ShellContext};
/// use serde_json::json;
///
/// let sink = MemorySink::new();
/// let mut shell = Shell::with_context(ShellContext::with_sink(Box::new(sink.clone())));
/// shell
///     .register(
///         CommandSpec::new("add")
///             .with_param(ParamSpec::required("a", TypeSpec::Int))
///             .with_param(ParamSpec::required("b", TypeSpec::Int)),
///         |_, args| {
///             let sum = args.get("a").as_i64().unwrap_or(0) + args.get("b").as_i64().unwrap_or(0);
///             Ok(json!(sum))
///         },
///     )
///     .unwrap();
///
/// let value = shell.execute("add 2 3").unwrap();
/// assert_eq!(value, json!(5));
/// assert_eq!(sink.contents(), "5\n");
/// ```
pub struct Shell {
    registry: CommandRegistry,
    context: ShellContext,
    coercer: Coercer,
}

impl Shell {
    /// Creates a shell writing to stdout.
    pub fn new() -> Self {
        Self::with_context(ShellContext::new())
    }

    /// Creates a shell over a host-constructed context.
    pub fn with_context(context: ShellContext) -> Self {
        Self {
            registry: CommandRegistry::new(),
            context,
            coercer: Coercer::new(),
        }
    }

    /// Replaces the coercion engine (e.g. for a custom list separator).
    pub fn with_coercer(mut self, coercer: Coercer) -> Self {
        self.coercer = coercer;
        self
    }

    /// Registers a command; see [`CommandRegistry::register`].
    pub fn register(
        &mut self,
        spec: CommandSpec,
        handler: impl Fn(&mut ShellContext, &BoundArgs) -> HandlerResult + 'static,
    ) -> std::result::Result<(), RegistryError> {
        self.registry.register(spec, handler)
    }

    /// `(name, help)` pairs in registration order.
    pub fn commands(&self) -> Vec<(&str, Option<&str>)> {
        self.registry.commands()
    }

    /// All registered command specs, for listing export.
    pub fn specs(&self) -> Vec<&CommandSpec> {
        self.registry.specs()
    }

    /// The execution context.
    pub fn context(&self) -> &ShellContext {
        &self.context
    }

    /// Mutable access to the execution context.
    pub fn context_mut(&mut self) -> &mut ShellContext {
        &mut self.context
    }

    /// Executes one command line.
    ///
    /// Returns the handler's raw value for programmatic callers and writes
    /// its rendering (per the context's format mode) to the sink; empty
    /// renderings write nothing. On failure a diagnostic line is written
    /// to the same sink and the error is returned; the registry and later
    /// invocations are unaffected. Blank lines are a quiet no-op.
    pub fn execute(&mut self, line: &str) -> Result<Value> {
        if line.trim().is_empty() {
            return Ok(Value::Null);
        }
        match self.dispatch(line) {
            Ok(value) => {
                let rendered = format_value(&value, self.context.mode());
                if !rendered.is_empty() {
                    self.context.print(&rendered);
                }
                Ok(value)
            }
            Err(error) => {
                self.context.print(&format!("error: {error}"));
                Err(error)
            }
        }
    }

    fn dispatch(&mut self, line: &str) -> Result<Value> {
        let invocation = tokenize(line)?;
        debug!(command = %invocation.command, "dispatching");

        let Some(descriptor) = self.registry.get(&invocation.command) else {
            return Err(ShellError::UnknownCommand(invocation.command));
        };

        let args = bind_arguments(&descriptor.spec, &invocation, &self.coercer)?;
        debug!(command = %descriptor.spec.name, params = args.len(), "invoking handler");

        let command = descriptor.spec.name.clone();
        descriptor
            .invoke(&mut self.context, &args)
            .map_err(|source| ShellError::Handler { command, source })
    }

    /// Invokes a command with already-constructed values, bypassing the
    /// tokenizer and coercion engine.
    ///
    /// Values are checked against each parameter's declared type with
    /// [`TypeSpec::admits`](cmdshell_core::TypeSpec::admits); this is the
    /// only route to mapping-typed parameters, which token coercion
    /// rejects. Nothing is rendered.
    pub fn invoke(&mut self, name: &str, values: Map<String, Value>) -> Result<Value> {
        let Some(descriptor) = self.registry.get(name) else {
            return Err(ShellError::UnknownCommand(name.to_string()));
        };
        let spec = &descriptor.spec;

        for key in values.keys() {
            if spec.find_param(key).is_none() {
                return Err(ShellError::UnknownParameter(key.clone()));
            }
        }

        let mut bound = Map::new();
        for param in &spec.params {
            if let Some(value) = values.get(&param.name) {
                if !param.type_spec.admits(value) {
                    return Err(ShellError::Coercion {
                        parameter: param.name.clone(),
                        source: CoercionError {
                            expected: param.type_spec.describe(),
                            got: value.to_string(),
                            attempted: Vec::new(),
                        },
                    });
                }
                bound.insert(param.name.clone(), value.clone());
            } else if let Some(default) = &param.default {
                bound.insert(param.name.clone(), default.clone());
            } else if param.type_spec.accepts_absent() {
                bound.insert(param.name.clone(), Value::Null);
            } else {
                return Err(ShellError::MissingArgument(param.name.clone()));
            }
        }

        let command = spec.name.clone();
        let args = BoundArgs::from(bound);
        debug!(command = %command, params = args.len(), "invoking handler directly");
        descriptor
            .invoke(&mut self.context, &args)
            .map_err(|source| ShellError::Handler { command, source })
    }
}

impl Default for Shell {
    fn default() -> Self {
        Self::new()
    }
}
