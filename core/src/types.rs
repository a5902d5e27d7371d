//! Schema type definitions for command parameters.
//!
//! This module defines the data model used to describe what a registered
//! command accepts: a [`CommandSpec`] carries an ordered list of
//! [`ParamSpec`]s, and each parameter declares its [`TypeSpec`]. Specs are
//! built once at registration time and never change afterwards; the
//! coercion engine matches exhaustively over the closed [`TypeSpec`] sum.
//!
//! Runtime values are represented as [`Value`] (re-exported
//! `serde_json::Value`); object entries keep their insertion order, which
//! the table, tree, and JSON renderers rely on.

use serde::{Deserialize, Serialize};

pub use serde_json::Value;

/// Declared type of a command parameter.
///
/// Every parameter carries exactly one `TypeSpec`, built at registration
/// time. The coercion engine resolves raw tokens against it with a fixed,
/// deterministic rule set; see the crate-level docs for the resolution
/// order.
///
/// # Examples
///
/// ```
/// use cmdshell_core::TypeSpec;
///
/// let spec = TypeSpec::default();
/// assert_eq!(spec, TypeSpec::Any);
///
/// let level = TypeSpec::union([TypeSpec::Int, TypeSpec::Str]);
/// assert_eq!(level.describe(), "int | string");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub enum TypeSpec {
    /// Signed decimal integer.
    Int,
    /// Decimal or exponential numeral.
    Float,
    /// Boolean with flexible truthy/falsy tokens.
    Bool,
    /// Verbatim string (quotes already stripped by the tokenizer).
    Str,
    /// One of a fixed, ordered set of named variants.
    Choice(Vec<ChoiceVariant>),
    /// Inner type, or absent/`none`/`null` for the empty value.
    Optional(Box<TypeSpec>),
    /// Ordered alternatives, tried in declared order (first success wins).
    Union(Vec<TypeSpec>),
    /// Homogeneous sequence, split on a separator at coercion time.
    List(Box<TypeSpec>),
    /// Key/value mapping; not reachable from token coercion.
    Map {
        key: Box<TypeSpec>,
        value: Box<TypeSpec>,
    },
    /// Unconverted passthrough (the default).
    #[default]
    Any,
}

/// A named variant of a [`TypeSpec::Choice`].
///
/// The name is what the user types; the value is what the handler receives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceVariant {
    /// Token matched case-sensitively against user input.
    pub name: String,
    /// Value bound when the variant matches.
    pub value: Value,
}

impl TypeSpec {
    /// Wraps an inner type as optional.
    pub fn optional(inner: TypeSpec) -> Self {
        TypeSpec::Optional(Box::new(inner))
    }

    /// Builds a union over the given alternatives, in declared order.
    ///
    /// # Examples
    ///
    /// ```
    /// use cmdshell_core::TypeSpec;
    ///
    /// let u = TypeSpec::union([TypeSpec::Int, TypeSpec::Str]);
    /// assert!(matches!(u, TypeSpec::Union(ref alts) if alts.len() == 2));
    /// ```
    pub fn union(alternatives: impl IntoIterator<Item = TypeSpec>) -> Self {
        TypeSpec::Union(alternatives.into_iter().collect())
    }

    /// Builds a list over the given element type.
    pub fn list(element: TypeSpec) -> Self {
        TypeSpec::List(Box::new(element))
    }

    /// Builds a mapping over the given key and value types.
    pub fn map(key: TypeSpec, value: TypeSpec) -> Self {
        TypeSpec::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// Builds a choice from `(name, value)` pairs, in declared order.
    ///
    /// # Examples
    ///
    /// ```
    /// use cmdshell_core::TypeSpec;
    /// use serde_json::json;
    ///
    /// let level = TypeSpec::choice([
    ///     ("debug", json!("debug")),
    ///     ("info", json!("info")),
    /// ]);
    /// assert_eq!(level.describe(), "choice(debug|info)");
    /// ```
    pub fn choice<S: Into<String>>(variants: impl IntoIterator<Item = (S, Value)>) -> Self {
        TypeSpec::Choice(
            variants
                .into_iter()
                .map(|(name, value)| ChoiceVariant {
                    name: name.into(),
                    value,
                })
                .collect(),
        )
    }

    /// Human-readable type description used in diagnostics.
    ///
    /// # Examples
    ///
    /// ```
    /// use cmdshell_core::TypeSpec;
    ///
    /// assert_eq!(TypeSpec::Int.describe(), "int");
    /// assert_eq!(TypeSpec::list(TypeSpec::Int).describe(), "list<int>");
    /// assert_eq!(
    ///     TypeSpec::optional(TypeSpec::Str).describe(),
    ///     "optional<string>",
    /// );
    /// ```
    pub fn describe(&self) -> String {
        match self {
            TypeSpec::Int => "int".to_string(),
            TypeSpec::Float => "float".to_string(),
            TypeSpec::Bool => "bool".to_string(),
            TypeSpec::Str => "string".to_string(),
            TypeSpec::Choice(variants) => {
                let names: Vec<&str> = variants.iter().map(|v| v.name.as_str()).collect();
                format!("choice({})", names.join("|"))
            }
            TypeSpec::Optional(inner) => format!("optional<{}>", inner.describe()),
            TypeSpec::Union(alternatives) => alternatives
                .iter()
                .map(TypeSpec::describe)
                .collect::<Vec<_>>()
                .join(" | "),
            TypeSpec::List(element) => format!("list<{}>", element.describe()),
            TypeSpec::Map { key, value } => {
                format!("map<{}, {}>", key.describe(), value.describe())
            }
            TypeSpec::Any => "any".to_string(),
        }
    }

    /// Checks whether an already-constructed value conforms to this type.
    ///
    /// Used to validate declared defaults and values supplied through the
    /// non-textual invocation path, where no token coercion happens.
    ///
    /// # Examples
    ///
    /// ```
    /// use cmdshell_core::TypeSpec;
    /// use serde_json::json;
    ///
    /// assert!(TypeSpec::Int.admits(&json!(42)));
    /// assert!(!TypeSpec::Int.admits(&json!(4.2)));
    /// assert!(TypeSpec::optional(TypeSpec::Str).admits(&json!(null)));
    /// assert!(TypeSpec::list(TypeSpec::Int).admits(&json!([1, 2, 3])));
    /// ```
    pub fn admits(&self, value: &Value) -> bool {
        match self {
            TypeSpec::Int => value.as_i64().is_some(),
            TypeSpec::Float => value.is_number(),
            TypeSpec::Bool => value.is_boolean(),
            TypeSpec::Str => value.is_string(),
            TypeSpec::Choice(variants) => variants.iter().any(|v| &v.value == value),
            TypeSpec::Optional(inner) => value.is_null() || inner.admits(value),
            TypeSpec::Union(alternatives) => alternatives.iter().any(|alt| alt.admits(value)),
            TypeSpec::List(element) => value
                .as_array()
                .is_some_and(|items| items.iter().all(|item| element.admits(item))),
            TypeSpec::Map { key, value: val } => value.as_object().is_some_and(|entries| {
                entries
                    .iter()
                    .all(|(k, v)| key.admits(&Value::String(k.clone())) && val.admits(v))
            }),
            TypeSpec::Any => true,
        }
    }

    /// Whether a bare presence flag (`--verbose` with no value) can bind
    /// this type as `true`.
    pub fn accepts_presence(&self) -> bool {
        match self {
            TypeSpec::Bool => true,
            TypeSpec::Optional(inner) => inner.accepts_presence(),
            TypeSpec::Union(alternatives) => alternatives.iter().any(TypeSpec::accepts_presence),
            _ => false,
        }
    }

    /// Whether an entirely absent argument binds this type as `Null`.
    pub fn accepts_absent(&self) -> bool {
        match self {
            TypeSpec::Optional(_) => true,
            TypeSpec::Union(alternatives) => alternatives.iter().any(TypeSpec::accepts_absent),
            _ => false,
        }
    }
}

/// Schema for a single command parameter.
///
/// A parameter's position in the [`CommandSpec`] doubles as its positional
/// index, and its name doubles as its flag name (`--name`; kebab-case on
/// the command line reaches snake_case parameters). A parameter is required
/// exactly when it has no default.
///
/// # Examples
///
/// ```
/// use cmdshell_core::{ParamSpec, TypeSpec};
/// use serde_json::json;
///
/// let a = ParamSpec::required("a", TypeSpec::Int);
/// assert!(a.is_required());
///
/// let verbose = ParamSpec::with_default("verbose", TypeSpec::Bool, json!(false))
///     .with_help("Show detailed output");
/// assert!(!verbose.is_required());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamSpec {
    /// Parameter name; also the long flag name.
    pub name: String,
    /// Declared type.
    pub type_spec: TypeSpec,
    /// Default value; its presence makes the parameter optional.
    pub default: Option<Value>,
    /// Short help text.
    pub help: Option<String>,
}

impl ParamSpec {
    /// Creates a required parameter (no default).
    pub fn required(name: &str, type_spec: TypeSpec) -> Self {
        Self {
            name: name.to_string(),
            type_spec,
            default: None,
            help: None,
        }
    }

    /// Creates a parameter with a default value.
    pub fn with_default(name: &str, type_spec: TypeSpec, default: Value) -> Self {
        Self {
            name: name.to_string(),
            type_spec,
            default: Some(default),
            help: None,
        }
    }

    /// Adds help text.
    pub fn with_help(mut self, help: &str) -> Self {
        self.help = Some(help.to_string());
        self
    }

    /// A parameter is required exactly when no default was supplied.
    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

/// Complete schema for a registered command.
///
/// Created once at registration and immutable thereafter. The parameter
/// order is the positional binding order; required parameters must precede
/// defaulted ones (enforced by [`validate_command`](crate::validate_command)).
///
/// # Examples
///
/// ```
/// use cmdshell_core::{CommandSpec, ParamSpec, TypeSpec, validate_command};
/// use serde_json::json;
///
/// let spec = CommandSpec::new("add")
///     .with_help("Add two numbers")
///     .with_param(ParamSpec::required("a", TypeSpec::Int))
///     .with_param(ParamSpec::required("b", TypeSpec::Int))
///     .with_param(ParamSpec::with_default("verbose", TypeSpec::Bool, json!(false)));
///
/// assert_eq!(spec.params.len(), 3);
/// assert!(spec.find_param("verbose").is_some());
/// assert!(validate_command(&spec).is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CommandSpec {
    /// Command name; the registry's unique key.
    pub name: String,
    /// Help text shown in command listings.
    pub help: Option<String>,
    /// Ordered parameter schemas.
    pub params: Vec<ParamSpec>,
}

impl CommandSpec {
    /// Creates a command spec with the given name.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Adds help text.
    pub fn with_help(mut self, help: &str) -> Self {
        self.help = Some(help.to_string());
        self
    }

    /// Appends a parameter.
    pub fn with_param(mut self, param: ParamSpec) -> Self {
        self.params.push(param);
        self
    }

    /// Finds a parameter by name.
    pub fn find_param(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }

    /// All parameter names, in declaration order.
    pub fn param_names(&self) -> Vec<&str> {
        self.params.iter().map(|p| p.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_describe_nested_types() {
        let spec = TypeSpec::list(TypeSpec::union([TypeSpec::Int, TypeSpec::Float]));
        assert_eq!(spec.describe(), "list<int | float>");

        let spec = TypeSpec::map(TypeSpec::Str, TypeSpec::Any);
        assert_eq!(spec.describe(), "map<string, any>");
    }

    #[test]
    fn test_admits_rejects_float_for_int() {
        assert!(TypeSpec::Int.admits(&json!(3)));
        assert!(!TypeSpec::Int.admits(&json!(3.5)));
        assert!(TypeSpec::Float.admits(&json!(3)));
        assert!(TypeSpec::Float.admits(&json!(3.5)));
    }

    #[test]
    fn test_admits_choice_by_value() {
        let level = TypeSpec::choice([("debug", json!("debug")), ("info", json!("info"))]);
        assert!(level.admits(&json!("debug")));
        assert!(!level.admits(&json!("trace")));
    }

    #[test]
    fn test_admits_map() {
        let spec = TypeSpec::map(TypeSpec::Str, TypeSpec::Int);
        assert!(spec.admits(&json!({"a": 1, "b": 2})));
        assert!(!spec.admits(&json!({"a": "one"})));
        assert!(!spec.admits(&json!([1, 2])));
    }

    #[test]
    fn test_presence_and_absence_acceptance() {
        assert!(TypeSpec::Bool.accepts_presence());
        assert!(TypeSpec::optional(TypeSpec::Bool).accepts_presence());
        assert!(!TypeSpec::Int.accepts_presence());

        assert!(TypeSpec::optional(TypeSpec::Int).accepts_absent());
        assert!(!TypeSpec::Int.accepts_absent());
    }

    #[test]
    fn test_command_spec_builder() {
        let spec = CommandSpec::new("greet")
            .with_help("Greet someone")
            .with_param(ParamSpec::with_default(
                "value",
                TypeSpec::union([TypeSpec::Int, TypeSpec::Str]),
                json!("default"),
            ));

        assert_eq!(spec.name, "greet");
        assert_eq!(spec.param_names(), vec!["value"]);
        assert!(!spec.params[0].is_required());
    }
}
