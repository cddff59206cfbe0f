//! Logging Decorator - Observability for command execution.

use commander_core::{CancellationToken, Command, CommandResult, Decorator, Next};
use std::{any::type_name, time::Instant};
use tracing::Instrument;

/// A Decorator that logs command execution.
///
/// Opens an `info`-level `command` span around the rest of the chain, so
/// anything the inner decorators and the handler log is attributed to the
/// command. Completion is logged at `debug`, failures at `warn`. The result
/// is returned unchanged.
///
/// # Example
///
/// ```rust,ignore
/// use commander::{CommandAdapter, decorators::LoggingDecorator};
///
/// let adapter = CommandAdapter::builder(CreateUserHandler)
///     .decorate(LoggingDecorator::named("users"))
///     .build();
/// ```
pub struct LoggingDecorator {
    name: &'static str,
}

impl LoggingDecorator {
    /// Create a new `LoggingDecorator` with a default name.
    pub fn new() -> Self {
        Self { name: "command" }
    }

    /// Create a new `LoggingDecorator` with a custom name.
    ///
    /// The name is recorded on the span to identify the pipeline.
    pub fn named(name: &'static str) -> Self {
        Self { name }
    }

    /// The pipeline name recorded on the span.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Default for LoggingDecorator {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Command> Decorator<C> for LoggingDecorator {
    async fn execute<'a>(
        &'a self,
        command: C,
        cancel: &'a CancellationToken,
        next: Next<'a, C>,
    ) -> CommandResult<C::Output> {
        let span = tracing::info_span!(
            "command",
            pipeline = %self.name,
            command = type_name::<C>()
        );

        async move {
            tracing::debug!("Executing command");
            let started = Instant::now();
            let result = next.run(command, cancel).await;
            let elapsed_ms = started.elapsed().as_millis() as u64;

            match &result {
                Ok(_) => tracing::debug!(elapsed_ms, "Command completed"),
                Err(err) if err.is_cancelled() => tracing::debug!(elapsed_ms, "Command cancelled"),
                Err(err) => tracing::warn!(elapsed_ms, error = %err, "Command failed"),
            }
            result
        }
        .instrument(span)
        .await
    }
}
