//! Command spec validation.
//!
//! Validates structural invariants of [`CommandSpec`]s at registration
//! time, catching errors such as duplicate parameters, required parameters
//! declared after defaulted ones, degenerate unions, and defaults that do
//! not conform to their declared type.
//!
//! # Examples
//!
//! ```
//! use cmdshell_core::{CommandSpec, ParamSpec, TypeSpec, validate_command};
//! use serde_json::json;
//!
//! let spec = CommandSpec::new("add")
//!     .with_param(ParamSpec::required("a", TypeSpec::Int))
//!     .with_param(ParamSpec::with_default("verbose", TypeSpec::Bool, json!(false)));
//! assert!(validate_command(&spec).is_empty());
//!
//! // Invalid: required parameter after a defaulted one.
//! let bad = CommandSpec::new("add")
//!     .with_param(ParamSpec::with_default("verbose", TypeSpec::Bool, json!(false)))
//!     .with_param(ParamSpec::required("a", TypeSpec::Int));
//! assert!(!validate_command(&bad).is_empty());
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::{CommandSpec, TypeSpec};

/// Command spec validation errors.
///
/// Each variant describes a specific structural problem found during
/// validation. The `Display` impl provides a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Command name is empty or whitespace-only.
    #[error("command name cannot be empty")]
    EmptyCommandName,
    /// Command name contains whitespace or looks like a flag.
    #[error("invalid command name: {0:?}")]
    InvalidCommandName(String),
    /// Parameter name is empty, contains whitespace, or looks like a flag.
    #[error("invalid parameter name: {0:?}")]
    InvalidParameterName(String),
    /// Two parameters share the same name.
    #[error("duplicate parameter: {0}")]
    DuplicateParameter(String),
    /// A required parameter is declared after one with a default.
    #[error("required parameter '{0}' follows a defaulted parameter")]
    RequiredAfterDefaulted(String),
    /// A union was declared with fewer than two alternatives.
    #[error("parameter '{0}': union needs at least two alternatives")]
    UnionTooNarrow(String),
    /// A choice was declared with no variants.
    #[error("parameter '{0}': choice needs at least one variant")]
    EmptyChoice(String),
    /// Two variants of one choice share the same name.
    #[error("parameter '{parameter}': duplicate choice variant '{variant}'")]
    DuplicateChoiceVariant {
        /// Owning parameter.
        parameter: String,
        /// Offending variant name.
        variant: String,
    },
    /// A declared default does not conform to the declared type.
    #[error("parameter '{parameter}': default value does not conform to {expected}")]
    DefaultMismatch {
        /// Owning parameter.
        parameter: String,
        /// Description of the declared type.
        expected: String,
    },
}

/// Validates a command spec.
///
/// Checks the command name, parameter names and ordering, type structure,
/// and default conformance. Returns on the first error found.
///
/// # Examples
///
/// ```
/// use cmdshell_core::{CommandSpec, ParamSpec, TypeSpec, ValidationError, validate_command};
///
/// let bad = CommandSpec::new("sum")
///     .with_param(ParamSpec::required("values", TypeSpec::Union(vec![TypeSpec::Int])));
/// let errors = validate_command(&bad);
/// assert!(errors.iter().any(|e| matches!(e, ValidationError::UnionTooNarrow(_))));
/// ```
pub fn validate_command(spec: &CommandSpec) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if spec.name.trim().is_empty() {
        errors.push(ValidationError::EmptyCommandName);
        return errors;
    }
    if !is_valid_name(&spec.name) {
        errors.push(ValidationError::InvalidCommandName(spec.name.clone()));
        return errors;
    }

    let mut seen: HashSet<&str> = HashSet::new();
    let mut first_defaulted: Option<&str> = None;

    for param in &spec.params {
        if !is_valid_name(&param.name) {
            errors.push(ValidationError::InvalidParameterName(param.name.clone()));
            return errors;
        }
        if !seen.insert(param.name.as_str()) {
            errors.push(ValidationError::DuplicateParameter(param.name.clone()));
            return errors;
        }

        if param.is_required() {
            if first_defaulted.is_some() {
                errors.push(ValidationError::RequiredAfterDefaulted(param.name.clone()));
                return errors;
            }
        } else {
            first_defaulted.get_or_insert(param.name.as_str());
        }

        errors.extend(validate_type(&param.name, &param.type_spec));
        if !errors.is_empty() {
            return errors;
        }

        if let Some(default) = &param.default {
            if !param.type_spec.admits(default) {
                errors.push(ValidationError::DefaultMismatch {
                    parameter: param.name.clone(),
                    expected: param.type_spec.describe(),
                });
                return errors;
            }
        }
    }

    errors
}

fn validate_type(parameter: &str, spec: &TypeSpec) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    match spec {
        TypeSpec::Union(alternatives) => {
            if alternatives.len() < 2 {
                errors.push(ValidationError::UnionTooNarrow(parameter.to_string()));
                return errors;
            }
            for alternative in alternatives {
                errors.extend(validate_type(parameter, alternative));
                if !errors.is_empty() {
                    return errors;
                }
            }
        }
        TypeSpec::Choice(variants) => {
            if variants.is_empty() {
                errors.push(ValidationError::EmptyChoice(parameter.to_string()));
                return errors;
            }
            let mut seen: HashSet<&str> = HashSet::new();
            for variant in variants {
                if !seen.insert(variant.name.as_str()) {
                    errors.push(ValidationError::DuplicateChoiceVariant {
                        parameter: parameter.to_string(),
                        variant: variant.name.clone(),
                    });
                    return errors;
                }
            }
        }
        TypeSpec::Optional(inner) | TypeSpec::List(inner) => {
            errors.extend(validate_type(parameter, inner));
        }
        TypeSpec::Map { key, value } => {
            errors.extend(validate_type(parameter, key));
            if errors.is_empty() {
                errors.extend(validate_type(parameter, value));
            }
        }
        TypeSpec::Int | TypeSpec::Float | TypeSpec::Bool | TypeSpec::Str | TypeSpec::Any => {}
    }

    errors
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('-')
        && !name.contains('=')
        && !name.chars().any(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::ParamSpec;

    use super::*;

    #[test]
    fn test_accepts_valid_spec() {
        let spec = CommandSpec::new("log")
            .with_param(ParamSpec::required("message", TypeSpec::Str))
            .with_param(ParamSpec::with_default(
                "level",
                TypeSpec::choice([("debug", json!("debug")), ("info", json!("info"))]),
                json!("info"),
            ));
        assert!(validate_command(&spec).is_empty());
    }

    #[test]
    fn test_rejects_empty_command_name() {
        let spec = CommandSpec::new("  ");
        assert_eq!(validate_command(&spec), vec![ValidationError::EmptyCommandName]);
    }

    #[test]
    fn test_rejects_flag_like_command_name() {
        let spec = CommandSpec::new("--add");
        assert_eq!(
            validate_command(&spec),
            vec![ValidationError::InvalidCommandName("--add".to_string())],
        );
    }

    #[test]
    fn test_rejects_duplicate_parameter() {
        let spec = CommandSpec::new("add")
            .with_param(ParamSpec::required("a", TypeSpec::Int))
            .with_param(ParamSpec::required("a", TypeSpec::Int));
        assert_eq!(
            validate_command(&spec),
            vec![ValidationError::DuplicateParameter("a".to_string())],
        );
    }

    #[test]
    fn test_rejects_required_after_defaulted() {
        let spec = CommandSpec::new("add")
            .with_param(ParamSpec::with_default("a", TypeSpec::Int, json!(0)))
            .with_param(ParamSpec::required("b", TypeSpec::Int));
        assert_eq!(
            validate_command(&spec),
            vec![ValidationError::RequiredAfterDefaulted("b".to_string())],
        );
    }

    #[test]
    fn test_rejects_nested_degenerate_union() {
        let spec = CommandSpec::new("run").with_param(ParamSpec::required(
            "target",
            TypeSpec::list(TypeSpec::Union(vec![TypeSpec::Int])),
        ));
        assert_eq!(
            validate_command(&spec),
            vec![ValidationError::UnionTooNarrow("target".to_string())],
        );
    }

    #[test]
    fn test_rejects_duplicate_choice_variant() {
        let spec = CommandSpec::new("log").with_param(ParamSpec::required(
            "level",
            TypeSpec::choice([("info", json!(1)), ("info", json!(2))]),
        ));
        let errors = validate_command(&spec);
        assert_eq!(
            errors,
            vec![ValidationError::DuplicateChoiceVariant {
                parameter: "level".to_string(),
                variant: "info".to_string(),
            }],
        );
    }

    #[test]
    fn test_rejects_nonconforming_default() {
        let spec = CommandSpec::new("add").with_param(ParamSpec::with_default(
            "a",
            TypeSpec::Int,
            json!("zero"),
        ));
        assert_eq!(
            validate_command(&spec),
            vec![ValidationError::DefaultMismatch {
                parameter: "a".to_string(),
                expected: "int".to_string(),
            }],
        );
    }

    #[test]
    fn test_null_default_conforms_to_optional() {
        let spec = CommandSpec::new("list").with_param(ParamSpec::with_default(
            "pattern",
            TypeSpec::optional(TypeSpec::Str),
            json!(null),
        ));
        assert!(validate_command(&spec).is_empty());
    }
}
