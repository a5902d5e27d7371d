//! Command-line tokenization.
//!
//! Splits a raw line into a command name, ordered positional tokens, and
//! named flag tokens. Whitespace separates tokens outside single or double
//! quotes; quotes group text and are stripped. `--name value` and
//! `--name=value` are flag tokens; a flag with no following value is a
//! presence flag (the binder turns it into `true` for boolean parameters).
//! Positional tokens may not follow the first flag.

use std::collections::HashMap;

use thiserror::Error;

/// Errors produced while splitting a command line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The line contained no tokens.
    #[error("empty command line")]
    EmptyLine,
    /// A quote was opened but never closed.
    #[error("unbalanced quote in command line")]
    UnbalancedQuote,
    /// A positional token appeared after the first flag.
    #[error("positional argument {0:?} after flags")]
    PositionalAfterFlags(String),
    /// The same flag was given more than once, or a flag re-bound a
    /// positionally-bound parameter.
    #[error("parameter '{0}' bound more than once")]
    DuplicateFlag(String),
    /// A flag token with no usable name (`--` or `--=x`).
    #[error("malformed flag: {0:?}")]
    MalformedFlag(String),
    /// More positional tokens than the command has parameters.
    #[error("unexpected argument: {0:?}")]
    UnexpectedArgument(String),
}

/// A tokenized command line, before any type coercion.
///
/// Transient: built per call and discarded once arguments are bound.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedInvocation {
    /// First token of the line.
    pub command: String,
    /// Tokens before the first flag, in order.
    pub positional: Vec<String>,
    /// Flag name (normalized to snake_case) to raw value; `None` marks a
    /// presence flag.
    pub flags: HashMap<String, Option<String>>,
}

/// One whitespace- or quote-delimited unit of the raw line.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RawToken {
    text: String,
    /// Whether the token started inside quotes; quoted tokens are never
    /// flags.
    quoted: bool,
}

fn is_flag(token: &RawToken) -> bool {
    !token.quoted && token.text.starts_with("--")
}

/// Flag names accept kebab-case on the command line (`--list-all`) and
/// reach snake_case parameters (`list_all`).
fn normalize_flag_name(name: &str) -> String {
    name.replace('-', "_")
}

/// Tokenizes a raw command line.
///
/// # Examples
///
/// ```
/// use cmdshell_runtime::tokenize;
///
/// let parsed = tokenize("add 2 3 --verbose true").unwrap();
/// assert_eq!(parsed.command, "add");
/// assert_eq!(parsed.positional, vec!["2", "3"]);
/// assert_eq!(parsed.flags["verbose"], Some("true".to_string()));
///
/// let parsed = tokenize("log 'System started' --level info").unwrap();
/// assert_eq!(parsed.positional, vec!["System started"]);
/// ```
pub fn tokenize(line: &str) -> Result<ParsedInvocation, ParseError> {
    let mut tokens = split_tokens(line)?.into_iter().peekable();
    let command = tokens.next().ok_or(ParseError::EmptyLine)?;

    let mut positional = Vec::new();
    let mut flags: HashMap<String, Option<String>> = HashMap::new();
    let mut seen_flag = false;

    while let Some(token) = tokens.next() {
        if is_flag(&token) {
            seen_flag = true;
            let body = &token.text[2..];
            let (raw_name, inline_value) = match body.split_once('=') {
                Some((name, value)) => (name, Some(value.to_string())),
                None => (body, None),
            };
            if raw_name.is_empty() {
                return Err(ParseError::MalformedFlag(token.text.clone()));
            }
            let name = normalize_flag_name(raw_name);
            let value = match inline_value {
                Some(value) => Some(value),
                None => match tokens.peek() {
                    Some(next) if !is_flag(next) => tokens.next().map(|t| t.text),
                    _ => None,
                },
            };
            if flags.insert(name.clone(), value).is_some() {
                return Err(ParseError::DuplicateFlag(name));
            }
        } else if seen_flag {
            return Err(ParseError::PositionalAfterFlags(token.text));
        } else {
            positional.push(token.text);
        }
    }

    Ok(ParsedInvocation {
        command: command.text,
        positional,
        flags,
    })
}

fn split_tokens(line: &str) -> Result<Vec<RawToken>, ParseError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quoted = false;
    let mut quote: Option<char> = None;

    for ch in line.chars() {
        match quote {
            Some(open) => {
                if ch == open {
                    quote = None;
                } else {
                    current.push(ch);
                }
            }
            None if ch == '\'' || ch == '"' => {
                if !in_token {
                    in_token = true;
                    quoted = true;
                }
                quote = Some(ch);
            }
            None if ch.is_whitespace() => {
                if in_token {
                    tokens.push(RawToken {
                        text: std::mem::take(&mut current),
                        quoted,
                    });
                    in_token = false;
                    quoted = false;
                }
            }
            None => {
                in_token = true;
                current.push(ch);
            }
        }
    }

    if quote.is_some() {
        return Err(ParseError::UnbalancedQuote);
    }
    if in_token {
        tokens.push(RawToken {
            text: current,
            quoted,
        });
    }

    Ok(tokens)
}
