//! Runtime-typed command dispatcher.
//!
//! Maps each command's runtime type to the adapter registered for it. The
//! dispatcher itself never inspects commands beyond their `TypeId`; the
//! adapter performs the single downcast.

use commander_core::{
    BoxCommand, BuildError, CancellationToken, Command, CommandAdapter, CommandError,
    CommandResult, ErasedAdapter, Handler, boxed,
};
use std::{
    any::{Any, TypeId, type_name},
    collections::HashMap,
    fmt,
    sync::Arc,
};

struct Route {
    command: &'static str,
    output: &'static str,
    // Holds an `Arc<dyn ErasedAdapter<C::Output>>`.
    adapter: Box<dyn Any + Send + Sync>,
}

impl Route {
    fn new<C: Command>(adapter: CommandAdapter<C>) -> Self {
        Self {
            command: type_name::<C>(),
            output: type_name::<C::Output>(),
            adapter: Box::new(adapter.into_erased()),
        }
    }
}

/// An immutable registry of command adapters keyed by command type.
///
/// # Example
///
/// ```rust,ignore
/// let mut builder = Dispatcher::builder();
/// builder
///     .register(CommandAdapter::builder(CreateUserHandler).decorate(LoggingDecorator::new()).build())?
///     .handler(DeleteUserHandler)?;
/// let dispatcher = builder.build();
///
/// let id = dispatcher.dispatch(CreateUser { name }, &CancellationToken::none()).await?;
/// ```
pub struct Dispatcher {
    routes: HashMap<TypeId, Route>,
}

impl Dispatcher {
    /// Start building a dispatcher.
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::new()
    }

    /// Dispatch a command to the adapter registered for its type.
    pub async fn dispatch<C: Command>(
        &self,
        command: C,
        cancel: &CancellationToken,
    ) -> CommandResult<C::Output> {
        self.dispatch_boxed(boxed(command), cancel).await
    }

    /// Dispatch an erased command to the adapter registered for its runtime type.
    pub async fn dispatch_boxed<R: Send + 'static>(
        &self,
        command: BoxCommand<R>,
        cancel: &CancellationToken,
    ) -> CommandResult<R> {
        let Some(route) = self.routes.get(&command.command_type_id()) else {
            tracing::warn!(command = command.command_name(), "No adapter registered");
            return Err(CommandError::NotRegistered(command.command_name()));
        };

        let adapter = route
            .adapter
            .downcast_ref::<Arc<dyn ErasedAdapter<R>>>()
            .ok_or(CommandError::TypeMismatch {
                param: "command",
                expected: route.output,
                actual: type_name::<R>(),
            })?;

        adapter.execute_erased(Some(command), cancel).await
    }

    /// Returns `true` if an adapter is registered for `C`.
    pub fn contains<C: Command>(&self) -> bool {
        self.routes.contains_key(&TypeId::of::<C>())
    }

    /// Names of all registered command types.
    pub fn commands(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.routes.values().map(|route| route.command)
    }

    /// Number of registered command types.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns `true` if no adapters are registered.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("commands", &self.commands().collect::<Vec<_>>())
            .finish()
    }
}

/// Builder for constructing a [`Dispatcher`].
#[derive(Default)]
pub struct DispatcherBuilder {
    routes: HashMap<TypeId, Route>,
}

impl DispatcherBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the adapter for command type `C`.
    ///
    /// Each command type has exactly one adapter; registering a second one
    /// fails with [`BuildError::DuplicateCommand`].
    pub fn register<C: Command>(&mut self, adapter: CommandAdapter<C>) -> Result<&mut Self, BuildError> {
        let key = TypeId::of::<C>();
        if self.routes.contains_key(&key) {
            return Err(BuildError::DuplicateCommand(type_name::<C>()));
        }

        tracing::debug!(
            command = type_name::<C>(),
            decorators = adapter.decorator_count(),
            "Registered command adapter"
        );
        self.routes.insert(key, Route::new(adapter));
        Ok(self)
    }

    /// Register an undecorated handler for command type `C`.
    pub fn handler<C, H>(&mut self, handler: H) -> Result<&mut Self, BuildError>
    where
        C: Command,
        H: Handler<C>,
    {
        self.register(CommandAdapter::new(handler))
    }

    /// Build the dispatcher.
    pub fn build(self) -> Dispatcher {
        Dispatcher {
            routes: self.routes,
        }
    }
}
