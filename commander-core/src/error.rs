//! Error types for Commander.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`BuildError`] - Errors raised while constructing adapters or dispatchers
//! - [`CommandError`] - Errors surfaced by a single command execution

use std::time::Duration;
use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result alias for command execution.
pub type CommandResult<T> = Result<T, CommandError>;

/// Errors that can occur while building an adapter or a dispatcher.
///
/// These are always raised synchronously at construction time, never while a
/// command is executing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// No handler was supplied.
    #[error("missing required argument `handler`")]
    MissingHandler,

    /// No decorator sequence was supplied. An empty sequence is valid.
    #[error("missing required argument `decorators`")]
    MissingDecorators,

    /// An adapter is already registered for this command type.
    #[error("an adapter is already registered for command `{0}`")]
    DuplicateCommand(&'static str),
}

impl BuildError {
    /// The name of the offending constructor parameter, if any.
    pub fn param(&self) -> Option<&'static str> {
        match self {
            BuildError::MissingHandler => Some("handler"),
            BuildError::MissingDecorators => Some("decorators"),
            BuildError::DuplicateCommand(_) => None,
        }
    }
}

/// Errors that can occur while executing a command.
#[derive(Error, Debug)]
pub enum CommandError {
    /// A required argument was absent.
    #[error("missing required argument `{param}`")]
    MissingArgument {
        /// Name of the absent parameter.
        param: &'static str,
    },

    /// The command's runtime type does not match the adapter's bound type.
    #[error("argument `{param}` has type `{actual}`, expected `{expected}`")]
    TypeMismatch {
        /// Name of the offending parameter.
        param: &'static str,
        /// The type the adapter is bound to.
        expected: &'static str,
        /// The runtime type that was supplied.
        actual: &'static str,
    },

    /// Execution was cancelled through its cancellation token.
    #[error("command execution was cancelled")]
    Cancelled,

    /// Execution did not complete in time.
    #[error("command timed out after {0:?}")]
    Timeout(Duration),

    /// The command was rejected before reaching its handler.
    #[error("command rejected: {0}")]
    Rejected(String),

    /// No adapter is registered for the command type.
    #[error("no adapter registered for command `{0}`")]
    NotRegistered(&'static str),

    /// A failure raised by a handler or decorator.
    #[error(transparent)]
    Custom(BoxError),
}

impl CommandError {
    /// Wrap an arbitrary error as a handler/decorator failure.
    pub fn custom<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        CommandError::Custom(err.into())
    }

    /// Returns `true` if this error signals cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, CommandError::Cancelled)
    }

    /// Returns `true` for an absent or mistyped command argument.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            CommandError::MissingArgument { .. } | CommandError::TypeMismatch { .. }
        )
    }

    /// The name of the offending parameter for argument errors.
    pub fn param(&self) -> Option<&'static str> {
        match self {
            CommandError::MissingArgument { param } | CommandError::TypeMismatch { param, .. } => {
                Some(param)
            }
            _ => None,
        }
    }
}

impl From<BoxError> for CommandError {
    fn from(err: BoxError) -> Self {
        CommandError::Custom(err)
    }
}
