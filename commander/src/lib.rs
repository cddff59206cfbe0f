//! # commander - In-Process Command Dispatch
//!
//! `commander` binds each command type to exactly one handler, wraps that
//! handler in an ordered chain of decorators, and executes the chain
//! asynchronously with cooperative cancellation.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use commander::prelude::*;
//! use commander::decorators::{LoggingDecorator, TimeoutDecorator};
//!
//! #[derive(Command)]
//! #[command(output = u64)]
//! struct CreateUser { name: String }
//!
//! struct CreateUserHandler;
//! impl Handler<CreateUser> for CreateUserHandler {
//!     async fn handle(&self, cmd: CreateUser, cancel: &CancellationToken) -> CommandResult<u64> {
//!         cancel.check()?;
//!         Ok(42)
//!     }
//! }
//!
//! // First decorator is outermost, the handler runs last.
//! let adapter = CommandAdapter::builder(CreateUserHandler)
//!     .decorate(LoggingDecorator::named("users"))
//!     .decorate(TimeoutDecorator::secs(5))
//!     .build();
//!
//! let mut builder = Dispatcher::builder();
//! builder.register(adapter)?;
//! let dispatcher = builder.build();
//!
//! let id = dispatcher.dispatch(CreateUser { name: "ada".into() }, &CancellationToken::none()).await?;
//! ```

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use commander_core::{
    // Adapter
    AdapterBuilder,
    // Command
    AnyCommand,
    BoxCommand,
    // Errors
    BoxError,
    BuildError,
    // Cancellation
    CancellationToken,
    Command,
    CommandAdapter,
    CommandError,
    CommandResult,
    // Decorator
    Decorator,
    DynDecorator,
    // Handler
    DynHandler,
    ErasedAdapter,
    Handler,
    Next,
    SharedDecorator,
    SharedHandler,
    boxed,
};

// Dispatch
pub use commander_std::dispatcher::{Dispatcher, DispatcherBuilder};

/// Standard decorator implementations.
pub mod decorators {
    pub use commander_std::decorators::{
        CancellationDecorator, LoggingDecorator, RetryDecorator, TimeoutDecorator, Validate,
        ValidationDecorator,
    };
}

/// Testing utilities.
pub mod testing {
    pub use commander_std::testing::{
        FailingHandler, RecordingDecorator, ShortCircuitDecorator, StubHandler, TraceLog,
    };
}

/// Prelude module - common imports for Commander.
///
/// # Usage
///
/// ```rust,ignore
/// use commander::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        CancellationToken, Command, CommandAdapter, CommandError, CommandResult, Decorator,
        Dispatcher, Handler, Next,
    };
}

#[cfg(feature = "macros")]
pub use commander_macros::Command;
