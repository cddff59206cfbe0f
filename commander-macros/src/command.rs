//! `#[derive(Command)]` implementation.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, Type};

/// Arguments collected from `#[command(...)]` attributes.
struct CommandArgs {
    output: Option<Type>,
}

impl CommandArgs {
    fn from_input(input: &DeriveInput) -> syn::Result<Self> {
        let mut output = None;

        for attr in &input.attrs {
            if !attr.path().is_ident("command") {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("output") {
                    if output.is_some() {
                        return Err(meta.error("duplicate `output` attribute"));
                    }
                    let ty: Type = meta.value()?.parse()?;
                    output = Some(ty);
                    Ok(())
                } else {
                    Err(meta.error("unknown attribute, expected `output`"))
                }
            })?;
        }

        Ok(CommandArgs { output })
    }
}

/// Expand `#[derive(Command)]`.
pub(crate) fn derive_command_impl(input: &DeriveInput) -> syn::Result<TokenStream> {
    let args = CommandArgs::from_input(input)?;
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let output = match args.output {
        Some(ty) => quote! { #ty },
        None => quote! { () },
    };

    Ok(quote! {
        impl #impl_generics ::commander::Command for #name #ty_generics #where_clause {
            type Output = #output;
        }
    })
}
