//! Struct-specific `Sanitise` derivation.
//!
//! This module generates the field-by-field rebuild of a struct and collects
//! the generics and predicates the impl needs.

use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};
use syn::{ext::IdentExt, spanned::Spanned, DataStruct, Fields, Result, WherePredicate};

use crate::{
    strategy::parse_field_strategy,
    transform::{generate_field_transform, DeriveContext, FieldSpec},
};

pub(crate) struct StructDeriveOutput {
    pub(crate) sanitise_body: TokenStream,
    pub(crate) walked_generics: Vec<Ident>,
    pub(crate) predicates: Vec<WherePredicate>,
}

pub(crate) fn derive_struct(data: DataStruct, generics: &syn::Generics) -> Result<StructDeriveOutput> {
    let mut walked_generics = Vec::new();
    let mut predicates = Vec::new();
    let mut ctx = DeriveContext {
        generics,
        walked_generics: &mut walked_generics,
        predicates: &mut predicates,
    };

    let sanitise_body = match data.fields {
        Fields::Named(fields) => derive_named_struct(&mut ctx, fields)?,
        Fields::Unnamed(fields) => derive_unnamed_struct(&mut ctx, fields)?,
        Fields::Unit => quote! { ::core::result::Result::Ok(Self) },
    };

    Ok(StructDeriveOutput {
        sanitise_body,
        walked_generics,
        predicates,
    })
}

fn derive_named_struct(ctx: &mut DeriveContext<'_>, fields: syn::FieldsNamed) -> Result<TokenStream> {
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
        let Self { #(#members: #bindings),* } = self;
        #(#transforms)*
        ::core::result::Result::Ok(Self { #(#members: #bindings),* })
    })
}

fn derive_unnamed_struct(
    ctx: &mut DeriveContext<'_>,
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
        let Self ( #(#bindings),* ) = self;
        #(#transforms)*
        ::core::result::Result::Ok(Self ( #(#bindings),* ))
    })
}
