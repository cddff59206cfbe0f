//! Timeout Decorator - Time-limited execution.
//!
//! **Note**: This decorator uses `tokio::time` and requires a tokio runtime
//! with the time driver enabled.

use commander_core::{CancellationToken, Command, CommandError, CommandResult, Decorator, Next};
use std::time::Duration;

/// A Decorator that bounds the rest of the chain with a timeout.
///
/// If the inner links do not complete within the configured duration, their
/// future is dropped and the call fails with [`CommandError::Timeout`].
///
/// # Example
///
/// ```rust,ignore
/// use commander::decorators::TimeoutDecorator;
///
/// let adapter = CommandAdapter::builder(SlowHandler)
///     .decorate(TimeoutDecorator::secs(5))
///     .build();
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TimeoutDecorator {
    duration: Duration,
}

impl TimeoutDecorator {
    /// Create a new `TimeoutDecorator`.
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }

    /// Create a `TimeoutDecorator` with the timeout specified in seconds.
    pub fn secs(seconds: u64) -> Self {
        Self::new(Duration::from_secs(seconds))
    }

    /// Create a `TimeoutDecorator` with the timeout specified in milliseconds.
    pub fn millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }

    /// Get the configured timeout duration.
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl<C: Command> Decorator<C> for TimeoutDecorator {
    async fn execute<'a>(
        &'a self,
        command: C,
        cancel: &'a CancellationToken,
        next: Next<'a, C>,
    ) -> CommandResult<C::Output> {
        match tokio::time::timeout(self.duration, next.run(command, cancel)).await {
            Ok(result) => result,
            Err(_) => Err(CommandError::Timeout(self.duration)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use commander_core::CommandAdapter;

    struct Sleep(Duration);
    impl Command for Sleep {
        type Output = ();
    }

    fn adapter(timeout: TimeoutDecorator) -> CommandAdapter<Sleep> {
        CommandAdapter::builder(|cmd: Sleep, _cancel: CancellationToken| async move {
            tokio::time::sleep(cmd.0).await;
            Ok::<_, CommandError>(())
        })
        .decorate(timeout)
        .build()
    }

    #[test]
    fn test_timeout_constructors() {
        assert_eq!(TimeoutDecorator::secs(10).duration(), Duration::from_secs(10));
        assert_eq!(TimeoutDecorator::millis(500).duration(), Duration::from_millis(500));
    }

    #[tokio::test]
    async fn test_timeout_trigger() {
        let result = adapter(TimeoutDecorator::millis(10))
            .execute(Sleep(Duration::from_millis(200)), &CancellationToken::none())
            .await;

        let err = result.unwrap_err();
        assert!(matches!(err, CommandError::Timeout(d) if d == Duration::from_millis(10)));
        assert!(err.to_string().contains("10ms"));
    }

    #[tokio::test]
    async fn test_timeout_success() {
        let result = adapter(TimeoutDecorator::millis(500))
            .execute(Sleep(Duration::from_millis(1)), &CancellationToken::none())
            .await;
        assert!(result.is_ok());
    }
}
