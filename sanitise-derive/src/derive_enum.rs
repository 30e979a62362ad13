//! Enum-specific `Sanitise` derivation.
//!
//! Each variant's fields are handled like struct fields: the generated match
//! rebuilds the same variant from sanitised fields.

use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};
use syn::{ext::IdentExt, spanned::Spanned, DataEnum, Fields, Result, WherePredicate};

use crate::{
    strategy::parse_field_strategy,
    transform::{generate_field_transform, DeriveContext, FieldSpec},
};

pub(crate) struct EnumDeriveOutput {
    pub(crate) sanitise_body: TokenStream,
    pub(crate) walked_generics: Vec<Ident>,
    pub(crate) predicates: Vec<WherePredicate>,
}

pub(crate) fn derive_enum(data: DataEnum, generics: &syn::Generics) -> Result<EnumDeriveOutput> {
    let mut walked_generics = Vec::new();
    let mut predicates = Vec::new();
    let mut ctx = DeriveContext {
        generics,
        walked_generics: &mut walked_generics,
        predicates: &mut predicates,
    };

    if data.variants.is_empty() {
        return Ok(EnumDeriveOutput {
            sanitise_body: quote! { match *self {} },
            walked_generics,
            predicates,
        });
    }

    let mut arms = Vec::new();
    for variant in data.variants {
        let variant_ident = &variant.ident;
        let arm = match variant.fields {
            Fields::Unit => quote! {
                Self::#variant_ident => ::core::result::Result::Ok(Self::#variant_ident)
            },
            Fields::Named(fields) => derive_named_variant(&mut ctx, variant_ident, fields)?,
            Fields::Unnamed(fields) => derive_unnamed_variant(&mut ctx, variant_ident, fields)?,
        };
        arms.push(arm);
    }

    Ok(EnumDeriveOutput {
        sanitise_body: quote! {
            match self {
                #(#arms),*
            }
        },
        walked_generics,
        predicates,
    })
}

fn derive_named_variant(
    ctx: &mut DeriveContext<'_>,
    variant_ident: &Ident,
    fields: syn::FieldsNamed,
) -> Result<TokenStream> {
    let mut members = Vec::new();
    let mut bindings = Vec::new();
    let mut transforms = Vec::new();

    for field in fields.named {
        let span = field.span();
        let strategy = parse_field_strategy(&field.attrs)?;
        let member = field.ident.expect("named field should have an identifier");
        let name = member.unraw().to_string();
        let binding = format_ident!("field_{}", name);

        transforms.push(generate_field_transform(
            ctx,
            &FieldSpec {
                binding: &binding,
                name,
                ty: &field.ty,
                strategy: &strategy,
                span,
            },
        )?);
        members.push(member);
        bindings.push(binding);
    }

    Ok(quote! {
        Self::#variant_ident { #(#members: #bindings),* } => {
            #(#transforms)*
            ::core::result::Result::Ok(Self::#variant_ident { #(#members: #bindings),* })
        }
    })
}

fn derive_unnamed_variant(
    ctx: &mut DeriveContext<'_>,
    variant_ident: &Ident,
    fields: syn::FieldsUnnamed,
) -> Result<TokenStream> {
    let mut bindings = Vec::new();
    let mut transforms = Vec::new();

    for (index, field) in fields.unnamed.into_iter().enumerate() {
        let span = field.span();
        let strategy = parse_field_strategy(&field.attrs)?;
        let binding = format_ident!("field_{index}");

        transforms.push(generate_field_transform(
            ctx,
            &FieldSpec {
                binding: &binding,
                name: index.to_string(),
                ty: &field.ty,
                strategy: &strategy,
                span,
            },
        )?);
        bindings.push(binding);
    }

    Ok(quote! {
        Self::#variant_ident ( #(#bindings),* ) => {
            #(#transforms)*
            ::core::result::Result::Ok(Self::#variant_ident ( #(#bindings),* ))
        }
    })
}
