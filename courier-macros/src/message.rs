//! `#[derive(Message)]`.

use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, Path, parse_macro_input, parse_quote};

/// Implementation of `#[derive(Message)]`.
pub fn derive_message_impl(input: TokenStream) -> TokenStream {
    let mut input = parse_macro_input!(input as DeriveInput);

    let krate = match crate_path(&input) {
        Ok(path) => path,
        Err(err) => return err.to_compile_error().into(),
    };

    for param in input.generics.type_params_mut() {
        param.bounds.push(parse_quote!(::core::marker::Send));
        param.bounds.push(parse_quote!(::core::marker::Sync));
        param.bounds.push(parse_quote!('static));
    }

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics #krate::Message for #name #ty_generics #where_clause {}
    };

    TokenStream::from(expanded)
}

/// The path named by `#[message(crate = ...)]`, or `::courier`.
fn crate_path(input: &DeriveInput) -> syn::Result<Path> {
    let mut krate: Path = parse_quote!(::courier);

    for attr in input.attrs.iter().filter(|attr| attr.path().is_ident("message")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("crate") {
                krate = meta.value()?.parse()?;
                Ok(())
            } else {
                Err(meta.error("unknown message attribute, expected `crate = path`"))
            }
        })?;
    }

    Ok(krate)
}
