//! # Handler
//!
//! The terminal point of a command pipeline: the single capability that
//! performs the operation for one command type.
//!
//! # Usage Patterns
//!
//! 1. **Struct implementation**: `impl Handler<CreateUser> for UserService`
//! 2. **Direct closure**: `|cmd: CreateUser, cancel| async move { ... }`

use crate::{cancellation::CancellationToken, command::Command, error::CommandResult};
use futures::future::BoxFuture;
use std::future::Future;

/// Executes one specific command type and produces its result.
///
/// Exactly one handler is bound to each adapter. The handler receives the
/// command by value together with the caller's cancellation token.
///
/// This trait uses native `async fn` for static dispatch.
/// For storage behind a pointer, use [`DynHandler`].
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot handle commands of type `{C}`",
    label = "missing `Handler<{C}>` implementation",
    note = "Handlers must implement `handle` for the command type `{C}`."
)]
pub trait Handler<C: Command>: Send + Sync + 'static {
    /// Execute the command.
    fn handle(
        &self,
        command: C,
        cancel: &CancellationToken,
    ) -> impl Future<Output = CommandResult<C::Output>> + Send;
}

/// Dynamic object-safe version of [`Handler`].
pub trait DynHandler<C: Command>: Send + Sync + 'static {
    /// Execute the command (dynamic dispatch version).
    fn handle_dyn<'a>(
        &'a self,
        command: C,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, CommandResult<C::Output>>;
}

// Blanket implementation: Any type implementing Handler implements DynHandler automatically.
impl<C: Command, T: Handler<C>> DynHandler<C> for T {
    fn handle_dyn<'a>(
        &'a self,
        command: C,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, CommandResult<C::Output>> {
        Box::pin(self.handle(command, cancel))
    }
}

// Blanket impl for closures. The closure gets its own handle on the token.
impl<F, C, Fut> Handler<C> for F
where
    C: Command,
    F: Fn(C, CancellationToken) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = CommandResult<C::Output>> + Send,
{
    fn handle(
        &self,
        command: C,
        cancel: &CancellationToken,
    ) -> impl Future<Output = CommandResult<C::Output>> + Send {
        (self)(command, cancel.clone())
    }
}
