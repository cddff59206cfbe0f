//! # commander-core
//!
//! Core traits and the command adapter for the Commander dispatch library.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! handler and decorator crates that don't need the full `commander-std`
//! implementation.
//!
//! # Building Blocks
//!
//! ## [`Command`]
//!
//! A value naming an operation and its result type (`Command::Output`).
//! [`AnyCommand`] is its object-safe, type-erased view.
//!
//! ## [`Handler`]
//!
//! The single capability that executes one command type. It is the innermost
//! link of every chain.
//!
//! ## [`Decorator`]
//!
//! Cross-cutting behavior around the handler. Each decorator receives a
//! [`Next`] continuation and controls whether and when the rest of the chain
//! runs.
//!
//! ## [`CommandAdapter`]
//!
//! Binds one handler and an ordered decorator sequence to one command type.
//! Exposes a typed `execute` and, through [`ErasedAdapter`], an entry point
//! that accepts a [`BoxCommand`] and checks its runtime type once.
//!
//! # Error Types
//!
//! - [`BuildError`] - Construction errors
//! - [`CommandError`] - Execution errors

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod adapter;
mod cancellation;
mod command;
mod decorator;
mod error;
mod handler;

// Re-exports
pub use adapter::{AdapterBuilder, CommandAdapter, ErasedAdapter, SharedDecorator, SharedHandler};
pub use cancellation::CancellationToken;
pub use command::{AnyCommand, BoxCommand, Command, boxed};
pub use decorator::{Decorator, DynDecorator, Next};
pub use error::{BoxError, BuildError, CommandError, CommandResult};
pub use handler::{DynHandler, Handler};
