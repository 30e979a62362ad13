//! Derive macros for `sanitise`.
//!
//! This crate generates the traversal code behind `#[derive(Sanitise)]`. It:
//! - reads `#[sanitise(...)]` field and container attributes
//! - resolves context lists into static field descriptors at build time
//! - emits a `Sanitise` implementation that rebuilds the value through the walker
//!
//! It does **not** decide anything at runtime. Matching, masking and hook
//! dispatch live in the main `sanitise` crate.

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::default_trait_access,
    clippy::doc_markdown,
    clippy::if_not_else,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::use_self,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::enum_glob_use,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::option_if_let_else
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

#[allow(unused_extern_crates)]
extern crate proc_macro;

use proc_macro2::TokenStream;
use proc_macro_crate::{crate_name, FoundCrate};
use quote::{format_ident, quote};
use syn::{parse_macro_input, parse_quote, spanned::Spanned, Data, DeriveInput, Result};

mod container;
mod derive_enum;
mod derive_struct;
mod generics;
mod strategy;
mod transform;
mod types;
use container::{parse_container_options, ContainerOptions};
use derive_enum::derive_enum;
use derive_struct::derive_struct;
use generics::{add_predicates, add_sanitise_bounds};

/// Derives `sanitise::Sanitise` for structs and enums.
///
/// # Container Attributes
///
/// - `#[sanitise(hook)]` - After tag-driven masking, run the type's
///   `sanitise::SelfSanitise` impl on the sanitised copy. The type must
///   implement `SelfSanitise`.
///
/// # Field Attributes
///
/// - **No annotation**: The field is never masked directly, but it is walked, so
///   tagged fields nested inside it are still masked. The field type must
///   implement `Sanitise`.
///
/// - `#[sanitise("ctxA,ctxB")]` (or `#[sanitise = "ctxA,ctxB"]`): Under any listed
///   context, the field is replaced with `Default::default()` and nothing inside
///   it is visited. `"*"` matches every context. Tokens are split on `,` and
///   kept verbatim.
///
/// - `#[sanitise(opaque)]`: Copy the field with `Clone` instead of walking it.
///   Use this for foreign types that do not implement `Sanitise`. Combine with a
///   context list (`#[sanitise("logs", opaque)]`) to still mask it.
///
/// Fields holding a shared borrow (`&'a str`, `&'a Inner`, `&'a [u8]`) are
/// copied as-is and never walked. They are described as non-settable: masking
/// one fails at runtime with `SanitiseError::UnwritableField`. `&'a mut T`
/// fields are rejected at compile time.
///
/// Unions are rejected at compile time.
#[proc_macro_derive(Sanitise, attributes(sanitise))]
pub fn derive_sanitise(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

/// Returns the token stream to reference the sanitise crate root.
///
/// Handles crate renaming (e.g., `my_sanitise = { package = "sanitise", ... }`).
/// Inside the sanitise crate itself, `::sanitise` resolves through its
/// `extern crate self as sanitise` alias, which also covers its doctests.
fn crate_root() -> TokenStream {
    match crate_name("sanitise") {
        Ok(FoundCrate::Name(name)) => {
            let ident = format_ident!("{}", name);
            quote! { ::#ident }
        }
        Ok(FoundCrate::Itself) | Err(_) => quote! { ::sanitise },
    }
}

fn crate_path(item: &str) -> TokenStream {
    let root = crate_root();
    let item_ident = format_ident!("{}", item);
    quote! { #root::#item_ident }
}

struct DeriveOutput {
    sanitise_body: TokenStream,
    walked_generics: Vec<syn::Ident>,
    predicates: Vec<syn::WherePredicate>,
}

fn expand(input: DeriveInput) -> Result<TokenStream> {
    let DeriveInput {
        ident,
        generics,
        data,
        attrs,
        ..
    } = input;

    let ContainerOptions { hook } = parse_container_options(&attrs)?;

    let crate_root = crate_root();

    let derive_output = match data {
        Data::Struct(data) => {
            let output = derive_struct(data, &generics)?;
            DeriveOutput {
                sanitise_body: output.sanitise_body,
                walked_generics: output.walked_generics,
                predicates: output.predicates,
            }
        }
        Data::Enum(data) => {
            let output = derive_enum(data, &generics)?;
            DeriveOutput {
                sanitise_body: output.sanitise_body,
                walked_generics: output.walked_generics,
                predicates: output.predicates,
            }
        }
        Data::Union(u) => {
            return Err(syn::Error::new(
                u.union_token.span(),
                "`Sanitise` cannot be derived for unions",
            ));
        }
    };

    let (_, ty_generics, _) = generics.split_for_impl();
    let self_ty: syn::Type = parse_quote!(#ident #ty_generics);

    let mut predicates = derive_output.predicates;
    if hook {
        predicates.push(parse_quote!(#self_ty: #crate_root::SelfSanitise));
    }
    let impl_generics = add_sanitise_bounds(generics.clone(), &derive_output.walked_generics);
    let impl_generics = add_predicates(impl_generics, predicates);
    let (impl_generics, _, where_clause) = impl_generics.split_for_impl();

    let sanitise_body = &derive_output.sanitise_body;
    let hook_impl = if hook {
        quote! {
            fn as_self_sanitise(
                &mut self,
            ) -> ::core::option::Option<&mut dyn #crate_root::SelfSanitise> {
                ::core::option::Option::Some(self)
            }
        }
    } else {
        quote! {}
    };

    Ok(quote! {
        impl #impl_generics #crate_root::Sanitise for #self_ty #where_clause {
            const KIND: #crate_root::NodeKind = #crate_root::NodeKind::Struct;

            #[allow(unused_variables)]
            fn sanitise_with(
                &self,
                walker: &mut #crate_root::Walker<'_>,
            ) -> ::core::result::Result<Self, #crate_root::SanitiseError> {
                #sanitise_body
            }

            #hook_impl
        }
    })
}
