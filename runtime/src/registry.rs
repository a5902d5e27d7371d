//! Command registration and lookup.
//!
//! The [`CommandRegistry`] maps command names to [`CommandDescriptor`]s
//! (validated spec + handler). It is filled during a startup registration
//! phase and treated as read-only afterwards; there is no deletion, and
//! lookups during dispatch need no locking because dispatch is strictly
//! sequential.

use std::collections::HashMap;
use std::fmt;

use cmdshell_core::{CommandSpec, ValidationError, Value, validate_command};
use thiserror::Error;

use crate::bind::BoundArgs;
use crate::context::ShellContext;

/// Failure raised inside a command handler.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// What a command handler returns.
pub type HandlerResult = Result<Value, HandlerError>;

/// A registered command body.
///
/// Handlers receive the shared execution context (for direct prints and
/// host state) and their fully-bound arguments, and return the value the
/// formatter will render.
pub type Handler = Box<dyn Fn(&mut ShellContext, &BoundArgs) -> HandlerResult>;

/// Registration errors.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A command with this name already exists; the registry is
    /// append-only and never replaces.
    #[error("command '{0}' is already registered")]
    DuplicateCommand(String),

    /// The spec failed structural validation.
    #[error("invalid spec for command '{name}': {source}")]
    InvalidSpec {
        /// The offending command.
        name: String,
        /// First validation failure found.
        #[source]
        source: ValidationError,
    },
}

/// A validated spec paired with its handler.
///
/// Created once at registration and immutable thereafter; owned
/// exclusively by the registry.
pub struct CommandDescriptor {
    /// The command's parameter schema and help text.
    pub spec: CommandSpec,
    handler: Handler,
}

impl CommandDescriptor {
    /// Runs the handler with bound arguments.
    pub fn invoke(&self, context: &mut ShellContext, args: &BoundArgs) -> HandlerResult {
        (self.handler)(context, args)
    }
}

impl fmt::Debug for CommandDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDescriptor")
            .field("spec", &self.spec)
            .finish_non_exhaustive()
    }
}

/// Insertion-ordered, append-only command table.
///
/// # Examples
///
/// ```
/// use cmdshell_core::CommandSpec;
/// use cmdshell_runtime::CommandRegistry;
/// use serde_json::json;
///
/// let mut registry = CommandRegistry::new();
/// registry
///     .register(CommandSpec::new("ping").with_help("Reply with pong"), |_, _| {
///         Ok(json!("pong"))
///     })
///     .unwrap();
///
/// assert!(registry.get("ping").is_some());
/// assert_eq!(registry.commands(), vec![("ping", Some("Reply with pong"))]);
/// ```
#[derive(Debug, Default)]
pub struct CommandRegistry {
    order: Vec<String>,
    commands: HashMap<String, CommandDescriptor>,
}

impl CommandRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a command, validating its spec first.
    pub fn register(
        &mut self,
        spec: CommandSpec,
        handler: impl Fn(&mut ShellContext, &BoundArgs) -> HandlerResult + 'static,
    ) -> Result<(), RegistryError> {
        if let Some(error) = validate_command(&spec).into_iter().next() {
            return Err(RegistryError::InvalidSpec {
                name: spec.name,
                source: error,
            });
        }
        if self.commands.contains_key(&spec.name) {
            return Err(RegistryError::DuplicateCommand(spec.name));
        }
        self.order.push(spec.name.clone());
        self.commands.insert(
            spec.name.clone(),
            CommandDescriptor {
                spec,
                handler: Box::new(handler),
            },
        );
        Ok(())
    }

    /// Looks up a command by name.
    pub fn get(&self, name: &str) -> Option<&CommandDescriptor> {
        self.commands.get(name)
    }

    /// `(name, help)` pairs in registration order, for help/usage
    /// surfaces.
    pub fn commands(&self) -> Vec<(&str, Option<&str>)> {
        self.order
            .iter()
            .filter_map(|name| self.commands.get(name))
            .map(|descriptor| (descriptor.spec.name.as_str(), descriptor.spec.help.as_deref()))
            .collect()
    }

    /// All command specs in registration order, for listing export.
    pub fn specs(&self) -> Vec<&CommandSpec> {
        self.order
            .iter()
            .filter_map(|name| self.commands.get(name))
            .map(|descriptor| &descriptor.spec)
            .collect()
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether nothing has been registered yet.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
