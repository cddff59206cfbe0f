//! Retry Decorator - Re-run the rest of the chain on transient failures.

use commander_core::{CancellationToken, Command, CommandError, CommandResult, Decorator, Next};
use std::time::Duration;

/// A Decorator that re-invokes the rest of the chain when it fails.
///
/// The command is cloned for every attempt. Cancellation, rejection and
/// argument errors are never retried, and no further attempt is made once
/// the token is signaled. After `max_attempts` the last error is returned.
///
/// # Example
///
/// ```rust,ignore
/// use commander::decorators::RetryDecorator;
/// use std::time::Duration;
///
/// let adapter = CommandAdapter::builder(FlakyHandler)
///     .decorate(RetryDecorator::new(3).with_delay(Duration::from_millis(50)))
///     .build();
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RetryDecorator {
    max_attempts: u32,
    delay: Duration,
}

impl RetryDecorator {
    /// Create a `RetryDecorator` making at most `max_attempts` attempts in total.
    ///
    /// A value of zero is treated as one.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay: Duration::ZERO,
        }
    }

    /// Wait `delay` between attempts.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Maximum number of attempts, including the first.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Delay between attempts.
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

fn is_retryable(err: &CommandError) -> bool {
    !matches!(
        err,
        CommandError::Cancelled
            | CommandError::Rejected(_)
            | CommandError::MissingArgument { .. }
            | CommandError::TypeMismatch { .. }
            | CommandError::NotRegistered(_)
    )
}

impl<C: Command + Clone> Decorator<C> for RetryDecorator {
    async fn execute<'a>(
        &'a self,
        command: C,
        cancel: &'a CancellationToken,
        next: Next<'a, C>,
    ) -> CommandResult<C::Output> {
        let mut attempt = 1;
        loop {
            match next.run(command.clone(), cancel).await {
                Err(err)
                    if attempt < self.max_attempts
                        && is_retryable(&err)
                        && !cancel.is_cancelled() =>
                {
                    tracing::debug!(
                        attempt,
                        max_attempts = self.max_attempts,
                        error = %err,
                        "Retrying command"
                    );
                    attempt += 1;
                    if !self.delay.is_zero() {
                        tokio::select! {
                            biased;
                            _ = cancel.wait() => return Err(CommandError::Cancelled),
                            _ = tokio::time::sleep(self.delay) => {}
                        }
                    }
                    cancel.check()?;
                }
                result => return result,
            }
        }
    }
}
