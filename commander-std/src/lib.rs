//! # commander-std
//!
//! Standard implementations for the Commander dispatch library.
//!
//! This crate provides:
//! - **Dispatch**: [`Dispatcher`], a registry of adapters keyed by command type
//! - **Standard decorators**: Logging, Validation, Timeout, Retry, Cancellation
//! - **Testing utilities**: trace log, recording decorators and stub handlers

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use commander_core;

// Modules
pub mod decorators;
pub mod dispatcher;
pub mod testing;

pub use dispatcher::{Dispatcher, DispatcherBuilder};
