//! Error types for command dispatch.
//!
//! Provides the unified error surface of the dispatcher boundary: line
//! parsing, command lookup, argument binding, token coercion, and handler
//! failures all converge on [`ShellError`]. The dispatcher converts every
//! variant into a diagnostic on the output sink and a non-fatal return;
//! nothing here terminates the hosting process.

use cmdshell_core::CoercionError;
use thiserror::Error;

use crate::registry::HandlerError;
use crate::token::ParseError;

/// Errors that can occur while executing a command line.
#[derive(Debug, Error)]
pub enum ShellError {
    /// Malformed line: quoting, flag syntax, or positional placement.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The command name is not registered.
    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    /// A flag does not match any declared parameter.
    #[error("unknown parameter '--{0}'")]
    UnknownParameter(String),

    /// A required parameter received no token and has no default.
    #[error("missing required parameter '{0}'")]
    MissingArgument(String),

    /// A token could not be coerced to its parameter's declared type.
    #[error("parameter '{parameter}': {source}")]
    Coercion {
        /// The offending parameter.
        parameter: String,
        /// The underlying coercion failure.
        #[source]
        source: CoercionError,
    },

    /// The handler itself failed; the original failure is carried along.
    #[error("command '{command}' failed: {source}")]
    Handler {
        /// The command whose handler failed.
        command: String,
        /// The failure raised inside the handler.
        #[source]
        source: HandlerError,
    },
}

/// Convenience alias for results with [`ShellError`].
pub type Result<T> = std::result::Result<T, ShellError>;
