//! Command traits.

use std::any::{Any, TypeId, type_name};

/// A value representing a requested operation and the type of its result.
///
/// Commands must be `Send + Sync + 'static` so they can cross await points
/// and be identified by their runtime type.
///
/// # Example
///
/// ```rust
/// use commander_core::Command;
///
/// struct CreateUser { name: String }
///
/// impl Command for CreateUser {
///     type Output = u64;
/// }
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a valid Command",
    label = "missing `Command` implementation",
    note = "Commands must implement `Command` and name their `Output` type."
)]
pub trait Command: Send + Sync + 'static {
    /// The result produced by executing this command.
    type Output: Send + 'static;
}

/// Object-safe view of a command whose concrete type is erased but whose
/// result type is known.
///
/// Blanket-implemented for every [`Command`]; the adapter uses it to recover
/// the concrete type at the point of dispatch.
pub trait AnyCommand: Send + Sync + 'static {
    /// The result type of the underlying command.
    type Output;

    /// Runtime identity of the concrete command type.
    fn command_type_id(&self) -> TypeId;

    /// Diagnostic name of the concrete command type.
    fn command_name(&self) -> &'static str;

    /// Convert into `Box<dyn Any>` for downcasting.
    fn into_any(self: Box<Self>) -> Box<dyn Any + Send + Sync>;
}

impl<C: Command> AnyCommand for C {
    type Output = C::Output;

    fn command_type_id(&self) -> TypeId {
        TypeId::of::<C>()
    }

    fn command_name(&self) -> &'static str {
        type_name::<C>()
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send + Sync> {
        self
    }
}

/// A boxed command with result type `R`.
pub type BoxCommand<R> = Box<dyn AnyCommand<Output = R>>;

/// Box a command behind the erased command interface.
pub fn boxed<C: Command>(command: C) -> BoxCommand<C::Output> {
    Box::new(command)
}
