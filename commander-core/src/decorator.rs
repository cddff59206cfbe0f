//! # Decorator
//!
//! Cross-cutting behavior wrapped around a handler invocation.
//!
//! A decorator receives the command, the cancellation token and a [`Next`]
//! continuation representing the rest of the chain. It decides whether and
//! when the rest of the chain runs:
//!
//! - **Pass-through**: run pre/post logic around a single `next.run(..)`
//! - **Short-circuit**: return (or fail) without calling `next`
//! - **Repeat**: call `next` more than once (retries)
//! - **Translate**: inspect or rewrite the error returned by `next`

use crate::{cancellation::CancellationToken, command::Command, error::CommandResult};
use futures::future::BoxFuture;
use std::{fmt, future::Future, sync::Arc};

/// The rest of the chain, as seen from one decorator.
///
/// Cloning is cheap; each clone invokes the same downstream links.
pub struct Next<'a, C: Command> {
    inner: Arc<
        dyn Fn(C, &'a CancellationToken) -> BoxFuture<'a, CommandResult<C::Output>>
            + Send
            + Sync
            + 'a,
    >,
}

impl<'a, C: Command> Next<'a, C> {
    /// Build a continuation from a function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(C, &'a CancellationToken) -> BoxFuture<'a, CommandResult<C::Output>>
            + Send
            + Sync
            + 'a,
    {
        Self { inner: Arc::new(f) }
    }

    /// Invoke the rest of the chain.
    pub fn run(
        &self,
        command: C,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, CommandResult<C::Output>> {
        (self.inner)(command, cancel)
    }
}

impl<C: Command> Clone for Next<'_, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: Command> fmt::Debug for Next<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Next").finish_non_exhaustive()
    }
}

/// Wraps a handler invocation with cross-cutting behavior.
///
/// # Example
///
/// ```rust
/// use commander_core::{CancellationToken, Command, CommandResult, Decorator, Next};
///
/// struct Add(u32, u32);
/// impl Command for Add {
///     type Output = u32;
/// }
///
/// /// Doubles whatever the rest of the chain returns.
/// struct Doubling;
///
/// impl Decorator<Add> for Doubling {
///     async fn execute<'a>(
///         &'a self,
///         command: Add,
///         cancel: &'a CancellationToken,
///         next: Next<'a, Add>,
///     ) -> CommandResult<u32> {
///         Ok(next.run(command, cancel).await? * 2)
///     }
/// }
/// ```
///
/// This trait uses native `async fn` for static dispatch.
/// For storage in an adapter, decorators are held as [`DynDecorator`].
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot decorate commands of type `{C}`",
    label = "missing `Decorator<{C}>` implementation",
    note = "Decorators must implement `execute` for the command type `{C}`."
)]
pub trait Decorator<C: Command>: Send + Sync + 'static {
    /// Run this link of the chain.
    fn execute<'a>(
        &'a self,
        command: C,
        cancel: &'a CancellationToken,
        next: Next<'a, C>,
    ) -> impl Future<Output = CommandResult<C::Output>> + Send + 'a;
}

/// Dynamic object-safe version of [`Decorator`].
pub trait DynDecorator<C: Command>: Send + Sync + 'static {
    /// Run this link of the chain (dynamic dispatch version).
    fn execute_dyn<'a>(
        &'a self,
        command: C,
        cancel: &'a CancellationToken,
        next: Next<'a, C>,
    ) -> BoxFuture<'a, CommandResult<C::Output>>;
}

// Blanket implementation: Any type implementing Decorator implements DynDecorator automatically.
impl<C: Command, T: Decorator<C>> DynDecorator<C> for T {
    fn execute_dyn<'a>(
        &'a self,
        command: C,
        cancel: &'a CancellationToken,
        next: Next<'a, C>,
    ) -> BoxFuture<'a, CommandResult<C::Output>> {
        Box::pin(self.execute(command, cancel, next))
    }
}
