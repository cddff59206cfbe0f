//! # commander-macros
//!
//! Procedural macros for Commander.
//!
//! - `#[derive(Command)]` - Implements `Command`, with the result type given
//!   by `#[command(output = Type)]` (defaults to `()`)

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod command;

/// Derive macro for implementing the `Command` trait.
///
/// # Example
///
/// ```rust,ignore
/// use commander::Command;
///
/// #[derive(Command)]
/// #[command(output = u64)]
/// struct CreateUser {
///     name: String,
/// }
///
/// // `Output` defaults to `()`.
/// #[derive(Command)]
/// struct DeleteUser {
///     id: u64,
/// }
/// ```
#[proc_macro_derive(Command, attributes(command))]
pub fn derive_command(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    command::derive_command_impl(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
