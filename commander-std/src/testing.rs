//! Testing utilities for Commander.
//!
//! This module provides building blocks for observing how a chain executes.
//!
//! # Features
//!
//! - [`TraceLog`]: A shared, ordered log of what ran
//! - [`RecordingDecorator`]: A decorator that logs entry and exit around `next`
//! - [`ShortCircuitDecorator`]: A decorator that answers without calling `next`
//! - [`StubHandler`]: A handler that returns a fixed value and counts calls
//! - [`FailingHandler`]: A handler that always fails

use commander_core::{
    CancellationToken, Command, CommandError, CommandResult, Decorator, Handler, Next,
};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

// ============================================================================
// Trace Log
// ============================================================================

/// A cloneable log shared by the links of a chain under test.
///
/// # Example
///
/// ```rust,ignore
/// let trace = TraceLog::new();
/// let adapter = CommandAdapter::builder(StubHandler::new(1).traced(trace.clone()))
///     .decorate(RecordingDecorator::new("outer", trace.clone()))
///     .build();
///
/// adapter.execute(MyCommand, &CancellationToken::none()).await?;
/// assert_eq!(trace.entries(), ["outer-enter", "handler", "outer-exit"]);
/// ```
#[derive(Clone, Default, Debug)]
pub struct TraceLog {
    entries: Arc<Mutex<Vec<String>>>,
}

impl TraceLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn push(&self, entry: impl Into<String>) {
        self.entries.lock().unwrap().push(entry.into());
    }

    /// Get a copy of the recorded entries.
    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().unwrap().clone()
    }

    /// Number of recorded entries.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    /// Returns `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clear all recorded entries.
    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }
}

// ============================================================================
// Recording Decorator
// ============================================================================

/// A decorator that records `"<label>-enter"` and `"<label>-exit"` around `next`.
pub struct RecordingDecorator {
    label: String,
    trace: TraceLog,
    calls: Arc<AtomicUsize>,
}

impl RecordingDecorator {
    /// Create a recording decorator writing to `trace`.
    pub fn new(label: impl Into<String>, trace: TraceLog) -> Self {
        Self {
            label: label.into(),
            trace,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of times this decorator has run.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// A handle on the call counter that outlives moving the decorator into an adapter.
    pub fn counter(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }
}

impl<C: Command> Decorator<C> for RecordingDecorator {
    async fn execute<'a>(
        &'a self,
        command: C,
        cancel: &'a CancellationToken,
        next: Next<'a, C>,
    ) -> CommandResult<C::Output> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.trace.push(format!("{}-enter", self.label));
        let result = next.run(command, cancel).await;
        self.trace.push(format!("{}-exit", self.label));
        result
    }
}

// ============================================================================
// Short-circuit Decorator
// ============================================================================

/// A decorator that returns a fixed value and never calls `next`.
pub struct ShortCircuitDecorator<T> {
    value: T,
    trace: Option<TraceLog>,
}

impl<T> ShortCircuitDecorator<T> {
    /// Create a decorator answering with `value`.
    pub fn new(value: T) -> Self {
        Self { value, trace: None }
    }

    /// Record `"short-circuit"` to `trace` whenever it answers.
    pub fn traced(mut self, trace: TraceLog) -> Self {
        self.trace = Some(trace);
        self
    }
}

impl<C, T> Decorator<C> for ShortCircuitDecorator<T>
where
    C: Command<Output = T>,
    T: Clone + Send + Sync + 'static,
{
    async fn execute<'a>(
        &'a self,
        _command: C,
        _cancel: &'a CancellationToken,
        _next: Next<'a, C>,
    ) -> CommandResult<T> {
        if let Some(trace) = &self.trace {
            trace.push("short-circuit");
        }
        Ok(self.value.clone())
    }
}

// ============================================================================
// Stub Handler
// ============================================================================

/// A handler that returns a fixed value and counts invocations.
///
/// Clones share the same counter.
#[derive(Clone)]
pub struct StubHandler<T> {
    value: T,
    calls: Arc<AtomicUsize>,
    trace: Option<TraceLog>,
}

impl<T> StubHandler<T> {
    /// Create a handler answering with `value`.
    pub fn new(value: T) -> Self {
        Self {
            value,
            calls: Arc::new(AtomicUsize::new(0)),
            trace: None,
        }
    }

    /// Record `"handler"` to `trace` on every invocation.
    pub fn traced(mut self, trace: TraceLog) -> Self {
        self.trace = Some(trace);
        self
    }

    /// Number of times the handler has run.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Reset the counter.
    pub fn reset(&self) {
        self.calls.store(0, Ordering::SeqCst);
    }
}

impl<C, T> Handler<C> for StubHandler<T>
where
    C: Command<Output = T>,
    T: Clone + Send + Sync + 'static,
{
    async fn handle(&self, _command: C, cancel: &CancellationToken) -> CommandResult<T> {
        cancel.check()?;
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(trace) = &self.trace {
            trace.push("handler");
        }
        Ok(self.value.clone())
    }
}

// ============================================================================
// Failing Handler
// ============================================================================

/// A handler that always fails with a custom error carrying `message`.
#[derive(Clone, Debug)]
pub struct FailingHandler {
    message: String,
}

impl FailingHandler {
    /// Create a handler failing with `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl<C: Command> Handler<C> for FailingHandler {
    async fn handle(&self, _command: C, _cancel: &CancellationToken) -> CommandResult<C::Output> {
        Err(CommandError::custom(self.message.clone()))
    }
}
