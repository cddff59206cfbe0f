//! # Command Adapter
//!
//! Binds one command type to exactly one handler and an ordered sequence of
//! decorators, and drives the resulting chain.
//!
//! # Execution Protocol
//!
//! 1. Validate the command (erased path only): it must be present and its
//!    runtime type must be the adapter's bound type.
//! 2. Fail with [`CommandError::Cancelled`] if the token is already signaled.
//! 3. Fold the decorators around the handler, last to first, so the first
//!    decorator is outermost and the handler innermost.
//! 4. Invoke the chain head and return its result unchanged.
//!
//! The adapter never logs, never mutates its inputs and never wraps the
//! errors produced by the chain.

use crate::{
    cancellation::CancellationToken,
    command::{BoxCommand, Command},
    decorator::{Decorator, DynDecorator, Next},
    error::{BuildError, CommandError, CommandResult},
    handler::{DynHandler, Handler},
};
use futures::future::{self, BoxFuture};
use std::{any::type_name, fmt, sync::Arc};

/// A handler shared behind a pointer.
pub type SharedHandler<C> = Arc<dyn DynHandler<C>>;

/// A decorator shared behind a pointer.
pub type SharedDecorator<C> = Arc<dyn DynDecorator<C>>;

/// The per-command-type binding of a handler and its decorators.
///
/// Adapters are immutable after construction and hold no per-call state, so
/// one instance can serve any number of concurrent executions.
///
/// # Example
///
/// ```rust
/// use commander_core::{CancellationToken, Command, CommandAdapter, CommandResult};
///
/// struct Greet(String);
/// impl Command for Greet {
///     type Output = String;
/// }
///
/// # futures::executor::block_on(async {
/// let adapter = CommandAdapter::new(|cmd: Greet, _cancel: CancellationToken| async move {
///     CommandResult::Ok(format!("hello, {}", cmd.0))
/// });
///
/// let reply = adapter
///     .execute(Greet("world".into()), &CancellationToken::none())
///     .await
///     .unwrap();
/// assert_eq!(reply, "hello, world");
/// # });
/// ```
pub struct CommandAdapter<C: Command> {
    handler: SharedHandler<C>,
    decorators: Arc<[SharedDecorator<C>]>,
}

impl<C: Command> CommandAdapter<C> {
    /// Create an adapter with no decorators.
    pub fn new<H: Handler<C>>(handler: H) -> Self {
        Self::from_shared(Arc::new(handler), Vec::new())
    }

    /// Start building an adapter around `handler`.
    pub fn builder<H: Handler<C>>(handler: H) -> AdapterBuilder<C> {
        AdapterBuilder {
            handler: Arc::new(handler),
            decorators: Vec::new(),
        }
    }

    /// Create an adapter from already-shared parts.
    ///
    /// `decorators` is in execution order: the first element is outermost.
    pub fn from_shared(handler: SharedHandler<C>, decorators: Vec<SharedDecorator<C>>) -> Self {
        Self {
            handler,
            decorators: decorators.into(),
        }
    }

    /// Create an adapter from parts that may be missing.
    ///
    /// A missing decorator sequence is an error; an empty one is not.
    pub fn try_new(
        handler: Option<SharedHandler<C>>,
        decorators: Option<Vec<SharedDecorator<C>>>,
    ) -> Result<Self, BuildError> {
        let handler = handler.ok_or(BuildError::MissingHandler)?;
        let decorators = decorators.ok_or(BuildError::MissingDecorators)?;
        Ok(Self::from_shared(handler, decorators))
    }

    /// Number of decorators wrapped around the handler.
    pub fn decorator_count(&self) -> usize {
        self.decorators.len()
    }

    /// Execute a command of the bound type.
    pub async fn execute(&self, command: C, cancel: &CancellationToken) -> CommandResult<C::Output> {
        cancel.check()?;
        self.chain().run(command, cancel).await
    }

    /// Type-erase this adapter.
    pub fn into_erased(self) -> Arc<dyn ErasedAdapter<C::Output>> {
        Arc::new(self)
    }

    /// Fold the decorators around the handler, innermost first.
    fn chain<'a>(&'a self) -> Next<'a, C> {
        let handler = &*self.handler;
        let mut next = Next::new(move |command, cancel| handler.handle_dyn(command, cancel));

        for decorator in self.decorators.iter().rev() {
            let decorator = &**decorator;
            let inner = next;
            next = Next::new(move |command, cancel| {
                decorator.execute_dyn(command, cancel, inner.clone())
            });
        }

        next
    }
}

impl<C: Command> Clone for CommandAdapter<C> {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
            decorators: Arc::clone(&self.decorators),
        }
    }
}

impl<C: Command> fmt::Debug for CommandAdapter<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandAdapter")
            .field("command", &type_name::<C>())
            .field("decorators", &self.decorators.len())
            .finish()
    }
}

/// Builder for [`CommandAdapter`].
pub struct AdapterBuilder<C: Command> {
    handler: SharedHandler<C>,
    decorators: Vec<SharedDecorator<C>>,
}

impl<C: Command> AdapterBuilder<C> {
    /// Append a decorator. Decorators run in the order they are added.
    pub fn decorate<D: Decorator<C>>(mut self, decorator: D) -> Self {
        self.decorators.push(Arc::new(decorator));
        self
    }

    /// Append an already-shared decorator.
    pub fn decorate_shared(mut self, decorator: SharedDecorator<C>) -> Self {
        self.decorators.push(decorator);
        self
    }

    /// Build the adapter.
    pub fn build(self) -> CommandAdapter<C> {
        CommandAdapter::from_shared(self.handler, self.decorators)
    }
}

/// Type-erased execution entry point for adapters producing `R`.
///
/// This is the view a dispatcher holds: the concrete command type is
/// recovered from the [`BoxCommand`] with a single runtime check.
pub trait ErasedAdapter<R>: Send + Sync + 'static {
    /// Diagnostic name of the bound command type.
    fn command_name(&self) -> &'static str;

    /// Validate, downcast and execute an erased command.
    ///
    /// Fails with [`CommandError::MissingArgument`] for `None` and with
    /// [`CommandError::TypeMismatch`] when the runtime type differs from the
    /// bound type; neither case reaches a decorator or the handler.
    fn execute_erased<'a>(
        &'a self,
        command: Option<BoxCommand<R>>,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, CommandResult<R>>;
}

impl<C: Command> ErasedAdapter<C::Output> for CommandAdapter<C> {
    fn command_name(&self) -> &'static str {
        type_name::<C>()
    }

    fn execute_erased<'a>(
        &'a self,
        command: Option<BoxCommand<C::Output>>,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, CommandResult<C::Output>> {
        match downcast::<C>(command) {
            Ok(command) => Box::pin(self.execute(command, cancel)),
            Err(err) => Box::pin(future::ready(Err(err))),
        }
    }
}

fn downcast<C: Command>(command: Option<BoxCommand<C::Output>>) -> CommandResult<C> {
    let command = command.ok_or(CommandError::MissingArgument { param: "command" })?;
    let actual = command.command_name();

    command
        .into_any()
        .downcast::<C>()
        .map(|command| *command)
        .map_err(|_| CommandError::TypeMismatch {
            param: "command",
            expected: type_name::<C>(),
            actual,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::boxed;
    use std::sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    };

    #[derive(Debug, Clone, PartialEq)]
    struct TestCommand(u32);
    impl Command for TestCommand {
        type Output = u32;
    }

    struct WrongCommand;
    impl Command for WrongCommand {
        type Output = u32;
    }

    type Trace = Arc<Mutex<Vec<String>>>;

    struct CountingHandler {
        calls: Arc<AtomicUsize>,
        trace: Trace,
    }

    impl Handler<TestCommand> for CountingHandler {
        async fn handle(&self, command: TestCommand, cancel: &CancellationToken) -> CommandResult<u32> {
            cancel.check()?;
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.trace.lock().unwrap().push("handler".into());
            Ok(command.0 * 10)
        }
    }

    struct Wrapping {
        label: &'static str,
        trace: Trace,
    }

    impl Decorator<TestCommand> for Wrapping {
        async fn execute<'a>(
            &'a self,
            command: TestCommand,
            cancel: &'a CancellationToken,
            next: Next<'a, TestCommand>,
        ) -> CommandResult<u32> {
            self.trace.lock().unwrap().push(format!("{}-enter", self.label));
            let result = next.run(command, cancel).await;
            self.trace.lock().unwrap().push(format!("{}-exit", self.label));
            result
        }
    }

    struct Fixed(u32);

    impl Decorator<TestCommand> for Fixed {
        async fn execute<'a>(
            &'a self,
            _command: TestCommand,
            _cancel: &'a CancellationToken,
            _next: Next<'a, TestCommand>,
        ) -> CommandResult<u32> {
            Ok(self.0)
        }
    }

    struct Fixture {
        calls: Arc<AtomicUsize>,
        trace: Trace,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                calls: Arc::new(AtomicUsize::new(0)),
                trace: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn handler(&self) -> SharedHandler<TestCommand> {
            Arc::new(CountingHandler {
                calls: self.calls.clone(),
                trace: self.trace.clone(),
            })
        }

        fn wrapping(&self, label: &'static str) -> SharedDecorator<TestCommand> {
            Arc::new(Wrapping {
                label,
                trace: self.trace.clone(),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn trace(&self) -> Vec<String> {
            self.trace.lock().unwrap().clone()
        }
    }

    #[test]
    fn test_requires_handler() {
        let fixture = Fixture::new();
        let err = CommandAdapter::<TestCommand>::try_new(None, Some(vec![fixture.wrapping("d1")]))
            .unwrap_err();
        assert_eq!(err, BuildError::MissingHandler);
        assert_eq!(err.param(), Some("handler"));

        let err = CommandAdapter::<TestCommand>::try_new(None, None).unwrap_err();
        assert_eq!(err, BuildError::MissingHandler);
    }

    #[test]
    fn test_requires_decorators() {
        let fixture = Fixture::new();
        let err = CommandAdapter::try_new(Some(fixture.handler()), None).unwrap_err();
        assert_eq!(err, BuildError::MissingDecorators);
        assert_eq!(err.param(), Some("decorators"));
    }

    #[test]
    fn test_empty_decorators_are_valid() {
        let fixture = Fixture::new();
        let adapter = CommandAdapter::try_new(Some(fixture.handler()), Some(Vec::new())).unwrap();
        assert_eq!(adapter.decorator_count(), 0);
    }

    #[tokio::test]
    async fn test_requires_command() {
        let fixture = Fixture::new();
        let adapter = CommandAdapter::from_shared(fixture.handler(), vec![fixture.wrapping("d1")]);

        let err = adapter
            .execute_erased(None, &CancellationToken::none())
            .await
            .unwrap_err();
        assert!(matches!(err, CommandError::MissingArgument { param: "command" }));
        assert!(fixture.trace().is_empty());
    }

    #[tokio::test]
    async fn test_rejects_wrong_command_type() {
        let fixture = Fixture::new();
        let adapter = CommandAdapter::from_shared(fixture.handler(), vec![fixture.wrapping("d1")]);

        let err = adapter
            .execute_erased(Some(boxed(WrongCommand)), &CancellationToken::none())
            .await
            .unwrap_err();
        assert!(err.is_invalid_argument());
        assert_eq!(err.param(), Some("command"));
        match err {
            CommandError::TypeMismatch { expected, actual, .. } => {
                assert!(expected.ends_with("TestCommand"));
                assert!(actual.ends_with("WrongCommand"));
            }
            other => panic!("expected TypeMismatch, got {other:?}"),
        }
        assert!(fixture.trace().is_empty());
        assert_eq!(fixture.calls(), 0);
    }

    #[tokio::test]
    async fn test_interrupts_when_cancelled() {
        let fixture = Fixture::new();
        let adapter = CommandAdapter::from_shared(fixture.handler(), vec![fixture.wrapping("d1")]);

        let result = adapter
            .execute_erased(Some(boxed(TestCommand(1))), &CancellationToken::cancelled())
            .await;
        assert!(matches!(result, Err(CommandError::Cancelled)));
        assert_eq!(fixture.calls(), 0);
    }

    #[tokio::test]
    async fn test_returns_handler_result_without_decorators() {
        let fixture = Fixture::new();
        let adapter = CommandAdapter::from_shared(fixture.handler(), Vec::new());

        let result = adapter
            .execute_erased(Some(boxed(TestCommand(4))), &CancellationToken::none())
            .await;
        assert_eq!(result.unwrap(), 40);
        assert_eq!(fixture.calls(), 1);
    }

    #[tokio::test]
    async fn test_decorators_wrap_in_declared_order() {
        let fixture = Fixture::new();
        let adapter = CommandAdapter::from_shared(
            fixture.handler(),
            vec![
                fixture.wrapping("d1"),
                fixture.wrapping("d2"),
                fixture.wrapping("d3"),
            ],
        );

        let result = adapter.execute(TestCommand(7), &CancellationToken::none()).await;
        assert_eq!(result.unwrap(), 70);
        assert_eq!(fixture.calls(), 1);
        assert_eq!(
            fixture.trace(),
            vec![
                "d1-enter", "d2-enter", "d3-enter", "handler", "d3-exit", "d2-exit", "d1-exit"
            ]
        );
    }

    #[tokio::test]
    async fn test_short_circuit_skips_rest_of_chain() {
        let fixture = Fixture::new();
        let adapter = CommandAdapter::<TestCommand>::builder(CountingHandler {
            calls: fixture.calls.clone(),
            trace: fixture.trace.clone(),
        })
        .decorate(Fixed(99))
        .decorate_shared(fixture.wrapping("d2"))
        .build();

        let result = adapter.execute(TestCommand(1), &CancellationToken::none()).await;
        assert_eq!(result.unwrap(), 99);
        assert_eq!(fixture.calls(), 0);
        assert!(fixture.trace().is_empty());
    }

    #[tokio::test]
    async fn test_adapters_sharing_parts_behave_identically() {
        let fixture = Fixture::new();
        let handler = fixture.handler();
        let decorators = vec![fixture.wrapping("d1")];

        let first = CommandAdapter::from_shared(handler.clone(), decorators.clone());
        let second = CommandAdapter::from_shared(handler, decorators);
        let token = CancellationToken::none();

        let a = first.execute(TestCommand(3), &token).await.unwrap();
        let b = second.execute(TestCommand(3), &token).await.unwrap();
        assert_eq!(a, b);
        assert_eq!(fixture.calls(), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_executions() {
        let fixture = Fixture::new();
        let adapter = Arc::new(CommandAdapter::from_shared(
            fixture.handler(),
            vec![fixture.wrapping("d1")],
        ));

        let tasks: Vec<_> = (0..16)
            .map(|i| {
                let adapter = Arc::clone(&adapter);
                tokio::spawn(async move {
                    adapter
                        .execute(TestCommand(i), &CancellationToken::none())
                        .await
                })
            })
            .collect();

        for (i, task) in tasks.into_iter().enumerate() {
            assert_eq!(task.await.unwrap().unwrap(), i as u32 * 10);
        }
        assert_eq!(fixture.calls(), 16);
    }
}
