//! Token-to-value coercion.
//!
//! The [`Coercer`] converts raw command-line tokens into typed [`Value`]s
//! according to a declared [`TypeSpec`]. Resolution is deterministic:
//! primitives match exact token grammars, choices match variant names
//! case-sensitively, and unions try their alternatives **in declared
//! order**, the first success winning. `int | string` on `"123"` is
//! therefore always the integer, never the string.
//!
//! # Examples
//!
//! ```
//! use cmdshell_core::{Coercer, TypeSpec};
//! use serde_json::json;
//!
//! let coercer = Coercer::new();
//! assert_eq!(coercer.coerce("42", &TypeSpec::Int).unwrap(), json!(42));
//! assert_eq!(coercer.coerce("yes", &TypeSpec::Bool).unwrap(), json!(true));
//!
//! let union = TypeSpec::union([TypeSpec::Int, TypeSpec::Str]);
//! assert_eq!(coercer.coerce("123", &union).unwrap(), json!(123));
//! assert_eq!(coercer.coerce("12x", &union).unwrap(), json!("12x"));
//! ```

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use thiserror::Error;

use crate::{ChoiceVariant, TypeSpec};

/// Tokens accepted as boolean `true` (compared lowercased).
pub const TRUTHY_TOKENS: &[&str] = &["true", "1", "yes", "on"];

/// Tokens accepted as boolean `false` (compared lowercased).
pub const FALSY_TOKENS: &[&str] = &["false", "0", "no", "off"];

/// Tokens that coerce an optional parameter to the empty value.
pub const EMPTY_MARKERS: &[&str] = &["none", "null", ""];

/// Default separator for list-typed tokens.
pub const DEFAULT_LIST_SEPARATOR: char = ',';

/// Exact token grammars for numeric primitives.
struct NumberPatterns {
    /// Optional sign followed by decimal digits, nothing else.
    int: Regex,
    /// Decimal or exponential numeral.
    float: Regex,
}

impl NumberPatterns {
    fn new() -> Self {
        Self {
            int: Regex::new(r"^[+-]?[0-9]+$").unwrap(),
            float: Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?$").unwrap(),
        }
    }
}

static PATTERNS: LazyLock<NumberPatterns> = LazyLock::new(NumberPatterns::new);

/// A token could not be converted to its declared type.
///
/// For unions, `attempted` lists every alternative that was tried before
/// the coercion was given up.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot interpret {got:?} as {expected}{}", attempts_suffix(.attempted))]
pub struct CoercionError {
    /// Description of the expected type.
    pub expected: String,
    /// The offending raw token.
    pub got: String,
    /// Union alternatives tried, in declared order; empty for non-unions.
    pub attempted: Vec<String>,
}

impl CoercionError {
    fn new(expected: impl Into<String>, got: &str) -> Self {
        Self {
            expected: expected.into(),
            got: got.to_string(),
            attempted: Vec::new(),
        }
    }
}

fn attempts_suffix(attempted: &[String]) -> String {
    if attempted.is_empty() {
        String::new()
    } else {
        format!(" (tried {})", attempted.join(", "))
    }
}

/// The type-coercion engine.
///
/// Stateless apart from the list separator; cheap to clone. One engine is
/// shared by all commands of a shell.
///
/// # Examples
///
/// ```
/// use cmdshell_core::{Coercer, TypeSpec};
/// use serde_json::json;
///
/// let coercer = Coercer::with_list_separator(';');
/// let spec = TypeSpec::list(TypeSpec::Int);
/// assert_eq!(coercer.coerce("1;2;3", &spec).unwrap(), json!([1, 2, 3]));
/// ```
#[derive(Debug, Clone)]
pub struct Coercer {
    list_separator: char,
}

impl Default for Coercer {
    fn default() -> Self {
        Self {
            list_separator: DEFAULT_LIST_SEPARATOR,
        }
    }
}

impl Coercer {
    /// Creates an engine with the default comma list separator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine with a custom list separator.
    pub fn with_list_separator(separator: char) -> Self {
        Self {
            list_separator: separator,
        }
    }

    /// Converts a raw token into a value of the declared type.
    ///
    /// # Examples
    ///
    /// ```
    /// use cmdshell_core::{Coercer, TypeSpec};
    ///
    /// let coercer = Coercer::new();
    /// let err = coercer.coerce("4.5", &TypeSpec::Int).unwrap_err();
    /// assert_eq!(err.expected, "int");
    /// assert_eq!(err.got, "4.5");
    /// ```
    pub fn coerce(&self, token: &str, spec: &TypeSpec) -> Result<Value, CoercionError> {
        match spec {
            TypeSpec::Int => coerce_int(token),
            TypeSpec::Float => coerce_float(token),
            TypeSpec::Bool => coerce_bool(token),
            TypeSpec::Str => Ok(Value::String(token.to_string())),
            TypeSpec::Choice(variants) => coerce_choice(token, variants, spec),
            TypeSpec::Optional(inner) => {
                if is_empty_marker(token) {
                    Ok(Value::Null)
                } else {
                    self.coerce(token, inner)
                }
            }
            TypeSpec::Union(alternatives) => self.coerce_union(token, alternatives, spec),
            TypeSpec::List(element) => self.coerce_list(token, element),
            TypeSpec::Map { .. } => Err(CoercionError::new(spec.describe(), token)),
            TypeSpec::Any => Ok(Value::String(token.to_string())),
        }
    }

    fn coerce_union(
        &self,
        token: &str,
        alternatives: &[TypeSpec],
        spec: &TypeSpec,
    ) -> Result<Value, CoercionError> {
        let mut attempted = Vec::with_capacity(alternatives.len());
        for alternative in alternatives {
            match self.coerce(token, alternative) {
                Ok(value) => return Ok(value),
                Err(_) => attempted.push(alternative.describe()),
            }
        }
        Err(CoercionError {
            expected: spec.describe(),
            got: token.to_string(),
            attempted,
        })
    }

    fn coerce_list(&self, token: &str, element: &TypeSpec) -> Result<Value, CoercionError> {
        if token.is_empty() {
            return Ok(Value::Array(Vec::new()));
        }
        let mut items = Vec::new();
        for piece in token.split(self.list_separator) {
            items.push(self.coerce(piece, element)?);
        }
        Ok(Value::Array(items))
    }
}

fn is_empty_marker(token: &str) -> bool {
    EMPTY_MARKERS.contains(&token.to_lowercase().as_str())
}

fn coerce_bool(token: &str) -> Result<Value, CoercionError> {
    let lowered = token.to_lowercase();
    if TRUTHY_TOKENS.contains(&lowered.as_str()) {
        Ok(Value::Bool(true))
    } else if FALSY_TOKENS.contains(&lowered.as_str()) {
        Ok(Value::Bool(false))
    } else {
        Err(CoercionError::new("bool", token))
    }
}

fn coerce_int(token: &str) -> Result<Value, CoercionError> {
    if !PATTERNS.int.is_match(token) {
        return Err(CoercionError::new("int", token));
    }
    token
        .parse::<i64>()
        .map(Value::from)
        .map_err(|_| CoercionError::new("int", token))
}

fn coerce_float(token: &str) -> Result<Value, CoercionError> {
    if !PATTERNS.float.is_match(token) {
        return Err(CoercionError::new("float", token));
    }
    let parsed: f64 = token
        .parse()
        .map_err(|_| CoercionError::new("float", token))?;
    serde_json::Number::from_f64(parsed)
        .map(Value::Number)
        .ok_or_else(|| CoercionError::new("float", token))
}

fn coerce_choice(
    token: &str,
    variants: &[ChoiceVariant],
    spec: &TypeSpec,
) -> Result<Value, CoercionError> {
    variants
        .iter()
        .find(|variant| variant.name == token)
        .map(|variant| variant.value.clone())
        .ok_or_else(|| CoercionError::new(spec.describe(), token))
}
