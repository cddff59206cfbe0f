//! Validation Decorator - Reject invalid commands before they reach a handler.

use commander_core::{CancellationToken, Command, CommandError, CommandResult, Decorator, Next};

/// Commands that can check their own invariants.
pub trait Validate {
    /// Returns a human-readable reason if the command is invalid.
    fn validate(&self) -> Result<(), String>;
}

/// A Decorator that short-circuits invalid commands.
///
/// Invalid commands fail with [`CommandError::Rejected`]; the rest of the
/// chain is never invoked for them.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidationDecorator;

impl ValidationDecorator {
    /// Create a new `ValidationDecorator`.
    pub fn new() -> Self {
        Self
    }
}

impl<C: Command + Validate> Decorator<C> for ValidationDecorator {
    async fn execute<'a>(
        &'a self,
        command: C,
        cancel: &'a CancellationToken,
        next: Next<'a, C>,
    ) -> CommandResult<C::Output> {
        if let Err(reason) = command.validate() {
            return Err(CommandError::Rejected(reason));
        }
        next.run(command, cancel).await
    }
}
