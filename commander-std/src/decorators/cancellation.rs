//! Cancellation Decorator - Abort in-flight execution when the token fires.

use commander_core::{CancellationToken, Command, CommandError, CommandResult, Decorator, Next};

/// A Decorator that races the rest of the chain against the cancellation token.
///
/// Handlers that never look at the token still stop promptly: once
/// cancellation is requested, the inner future is dropped and the call fails
/// with [`CommandError::Cancelled`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CancellationDecorator;

impl CancellationDecorator {
    /// Create a new `CancellationDecorator`.
    pub fn new() -> Self {
        Self
    }
}

impl<C: Command> Decorator<C> for CancellationDecorator {
    async fn execute<'a>(
        &'a self,
        command: C,
        cancel: &'a CancellationToken,
        next: Next<'a, C>,
    ) -> CommandResult<C::Output> {
        tokio::select! {
            biased;
            _ = cancel.wait() => Err(CommandError::Cancelled),
            result = next.run(command, cancel) => result,
        }
    }
}
