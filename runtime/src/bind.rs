//! Argument binding.
//!
//! Binds a tokenized invocation against a command's parameter schema:
//! positional tokens in declaration order, then flags by name, then
//! defaults. The result is a fully-populated [`BoundArgs`] in declaration
//! order, or the first binding error encountered.

use cmdshell_core::{Coercer, CommandSpec, Value};
use serde_json::Map;

use crate::error::ShellError;
use crate::token::{ParseError, ParsedInvocation};

const NULL: Value = Value::Null;

/// Coerced arguments ready for handler invocation.
///
/// Fully populated before the handler runs: every declared parameter is
/// present, with defaults applied and absent optionals bound to `Null`.
/// Entries iterate in parameter declaration order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoundArgs {
    values: Map<String, Value>,
}

impl BoundArgs {
    /// The value bound to a parameter; `Null` for names the command does
    /// not declare.
    pub fn get(&self, name: &str) -> &Value {
        self.values.get(name).unwrap_or(&NULL)
    }

    /// Whether a parameter of this name was bound.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// `(name, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }

    /// Number of bound parameters.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the command declares no parameters.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<Map<String, Value>> for BoundArgs {
    fn from(values: Map<String, Value>) -> Self {
        Self { values }
    }
}

/// Binds a tokenized invocation against a command spec.
///
/// # Examples
///
/// ```
/// use cmdshell_core::{Coercer, CommandSpec, ParamSpec, TypeSpec};
/// use cmdshell_runtime::{bind_arguments, tokenize};
/// use serde_json::json;
///
/// let spec = CommandSpec::new("add")
///     .with_param(ParamSpec::required("a", TypeSpec::Int))
///     .with_param(ParamSpec::required("b", TypeSpec::Int))
///     .with_param(ParamSpec::with_default("verbose", TypeSpec::Bool, json!(false)));
///
/// let invocation = tokenize("add 2 3").unwrap();
/// let args = bind_arguments(&spec, &invocation, &Coercer::new()).unwrap();
/// assert_eq!(args.get("a"), &json!(2));
/// assert_eq!(args.get("b"), &json!(3));
/// assert_eq!(args.get("verbose"), &json!(false));
/// ```
pub fn bind_arguments(
    spec: &CommandSpec,
    invocation: &ParsedInvocation,
    coercer: &Coercer,
) -> Result<BoundArgs, ShellError> {
    if invocation.positional.len() > spec.params.len() {
        let surplus = invocation.positional[spec.params.len()].clone();
        return Err(ParseError::UnexpectedArgument(surplus).into());
    }

    let mut bound: Map<String, Value> = Map::new();

    for (param, token) in spec.params.iter().zip(&invocation.positional) {
        let value = coercer
            .coerce(token, &param.type_spec)
            .map_err(|source| ShellError::Coercion {
                parameter: param.name.clone(),
                source,
            })?;
        bound.insert(param.name.clone(), value);
    }

    for (name, raw) in &invocation.flags {
        let Some(param) = spec.find_param(name) else {
            return Err(ShellError::UnknownParameter(name.clone()));
        };
        if bound.contains_key(&param.name) {
            return Err(ParseError::DuplicateFlag(param.name.clone()).into());
        }
        let token = match raw {
            Some(token) => token.as_str(),
            // A bare presence flag reads as "true" for boolean
            // parameters; anything else still needs a value.
            None if param.type_spec.accepts_presence() => "true",
            None => return Err(ShellError::MissingArgument(param.name.clone())),
        };
        let value = coercer
            .coerce(token, &param.type_spec)
            .map_err(|source| ShellError::Coercion {
                parameter: param.name.clone(),
                source,
            })?;
        bound.insert(param.name.clone(), value);
    }

    let mut values = Map::new();
    for param in &spec.params {
        if let Some(value) = bound.remove(&param.name) {
            values.insert(param.name.clone(), value);
        } else if let Some(default) = &param.default {
            values.insert(param.name.clone(), default.clone());
        } else if param.type_spec.accepts_absent() {
            values.insert(param.name.clone(), Value::Null);
        } else {
            return Err(ShellError::MissingArgument(param.name.clone()));
        }
    }

    Ok(BoundArgs::from(values))
}
