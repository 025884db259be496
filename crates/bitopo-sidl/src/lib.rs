//! # bitopo-sidl
//!
//! Derive macro for types that may cross a process boundary.
//!
//! `#[derive(Transferable)]` implements `bitopo_core::Described`, placing the
//! type under the transferability marker in the type graph, and
//! `bitopo_core::Transferable` with a stable type id hashed from the type
//! name at compile time.
//!
//! ```ignore
//! use bitopo_sidl::Transferable;
//!
//! #[derive(Transferable)]
//! struct Delta {
//!     amount: i64,
//! }
//! ```

#![forbid(unsafe_code)]

extern crate proc_macro;

use proc_macro::TokenStream;
use quote::quote;
use sha2::{Digest, Sha256};
use syn::{Data, DeriveInput, Ident, parse_macro_input, parse_quote};

/// Derives `Described` and `Transferable` for a struct or enum.
///
/// The generated `TYPE_ID` matches `bitopo_core::stable_type_id` applied to
/// the type's identifier. Generic types are named with their type arguments
/// (`Envelope<i32>`), require every type parameter to be `Described`, and are
/// transferable only when every type argument is.
#[proc_macro_derive(Transferable)]
pub fn derive_transferable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand(input) {
        Ok(ts) => ts,
        Err(e) => e.to_compile_error().into(),
    }
}

fn expand(input: DeriveInput) -> syn::Result<TokenStream> {
    if let Data::Union(_) = &input.data {
        return Err(syn::Error::new(
            input.ident.span(),
            "Transferable cannot be derived for unions",
        ));
    }

    let ident = &input.ident;
    let name = ident.to_string();
    let type_id = stable_type_id(&name);

    let mut generics = input.generics.clone();
    let params: Vec<Ident> = generics.type_params().map(|p| p.ident.clone()).collect();
    if !params.is_empty() {
        let where_clause = generics.make_where_clause();
        for param in &params {
            where_clause
                .predicates
                .push(parse_quote!(#param: ::bitopo_core::Described));
        }
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let type_info = if params.is_empty() {
        quote! {
            ::bitopo_core::TypeInfo::class(#name).transferable().build()
        }
    } else {
        quote! {
            let args = [#(<#params as ::bitopo_core::Described>::type_info()),*];
            let names: ::std::vec::Vec<&str> = args.iter().map(|arg| arg.name()).collect();
            let builder = ::bitopo_core::TypeInfo::class(
                ::std::format!("{}<{}>", #name, names.join(", ")),
            );
            if args.iter().all(|arg| arg.is_transferable()) {
                builder.transferable().build()
            } else {
                builder.build()
            }
        }
    };

    let expanded = quote! {
        impl #impl_generics ::bitopo_core::Described for #ident #ty_generics #where_clause {
            fn type_info() -> ::bitopo_core::TypeRef {
                #type_info
            }
        }

        impl #impl_generics ::bitopo_core::Transferable for #ident #ty_generics #where_clause {
            const TYPE_ID: u128 = #type_id;
        }
    };

    Ok(expanded.into())
}

// Must agree with bitopo_core::stable_type_id.
fn stable_type_id(name: &str) -> u128 {
    let digest = Sha256::digest(name.as_bytes());
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&digest[..16]);
    u128::from_be_bytes(bytes)
}
