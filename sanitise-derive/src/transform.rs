//! Shared field transformation logic for struct and enum derivation.
//!
//! Every field becomes a static `FieldDescriptor` plus one call into the
//! walker. The descriptor carries the context tokens resolved at build time,
//! so no annotation is parsed at runtime.

use proc_macro2::{Ident, Span, TokenStream};
use quote::quote_spanned;
use syn::{parse_quote_spanned, Result, WherePredicate};

use crate::{
    crate_path,
    generics::{collect_generics_from_type, mentions_generics},
    strategy::FieldStrategy,
    types::{as_reference, type_display},
};

/// Accumulated state during field processing.
///
/// Groups the generics and predicates collected while generating the fields
/// of a struct or of every variant of an enum.
pub(crate) struct DeriveContext<'a> {
    pub(crate) generics: &'a syn::Generics,
    pub(crate) walked_generics: &'a mut Vec<Ident>,
    pub(crate) predicates: &'a mut Vec<WherePredicate>,
}

/// One field to transform.
pub(crate) struct FieldSpec<'a> {
    /// Local binding holding `&FieldType` in the generated body.
    pub(crate) binding: &'a Ident,
    /// Name used in descriptors and paths (`email`, `0`, ...).
    pub(crate) name: String,
    pub(crate) ty: &'a syn::Type,
    pub(crate) strategy: &'a FieldStrategy,
    pub(crate) span: Span,
}

/// Generates the statements that rebind `field.binding` to its sanitised value.
///
/// ## Field Transformation Rules
///
/// | Field | Generated call | Bounds |
/// |-------|----------------|--------|
/// | untagged | `walker.walk_field` | `T: Sanitise` |
/// | tagged | `walker.field` | `T: Sanitise`, `FieldTy: Default` |
/// | untagged, `opaque` | `walker.copy_field` | `FieldTy: Clone` |
/// | tagged, `opaque` | `walker.masked_copy` | `FieldTy: Clone + Default` |
/// | shared borrow (`&'a T`) | `walker.copy_field` | none |
/// | tagged shared borrow | `walker.ensure_writable`, then `walker.copy_field` | none |
///
/// A borrowed subtree is never walked: the copy shares it with the source.
/// `&'a mut T` fields are rejected.
pub(crate) fn generate_field_transform(
    ctx: &mut DeriveContext<'_>,
    field: &FieldSpec<'_>,
) -> Result<TokenStream> {
    let FieldSpec {
        binding,
        name,
        ty,
        strategy,
        span,
    } = field;
    let span = *span;
    let descriptor_path = crate_path("FieldDescriptor");
    let reference = as_reference(ty);
    let settable = reference.is_none();
    let type_name = type_display(ty);
    let contexts = &strategy.contexts;
    let tagged = strategy.is_tagged();

    let descriptor = quote_spanned! { span =>
        &#descriptor_path {
            name: #name,
            type_name: #type_name,
            contexts: &[#(#contexts),*],
            settable: #settable,
        }
    };

    if let Some(reference) = reference {
        if let Some(mutability) = reference.mutability {
            return Err(syn::Error::new(
                mutability.span,
                "`&mut` fields cannot be copied into a sanitised value; \
                 use an owned type or a shared borrow",
            ));
        }
        let guard = if tagged {
            quote_spanned! { span =>
                walker.ensure_writable(#descriptor, #binding)?;
            }
        } else {
            TokenStream::new()
        };
        return Ok(quote_spanned! { span =>
            #guard
            let #binding = walker.copy_field(#descriptor, #binding);
        });
    }

    if strategy.opaque {
        if tagged {
            push_predicate(ctx, ty, parse_quote_spanned! { span =>
                #ty: ::core::clone::Clone + ::core::default::Default
            });
        } else {
            push_predicate(ctx, ty, parse_quote_spanned! { span =>
                #ty: ::core::clone::Clone
            });
        }
    } else {
        collect_generics_from_type(ty, ctx.generics, ctx.walked_generics);
        if tagged {
            push_predicate(ctx, ty, parse_quote_spanned! { span =>
                #ty: ::core::default::Default
            });
        }
    }

    let call = match (strategy.opaque, tagged) {
        (false, true) => quote_spanned! { span => walker.field(#descriptor, #binding)? },
        (false, false) => quote_spanned! { span => walker.walk_field(#descriptor, #binding)? },
        (true, true) => quote_spanned! { span => walker.masked_copy(#descriptor, #binding)? },
        (true, false) => quote_spanned! { span => walker.copy_field(#descriptor, #binding) },
    };

    Ok(quote_spanned! { span =>
        let #binding = #call;
    })
}

fn push_predicate(ctx: &mut DeriveContext<'_>, ty: &syn::Type, predicate: WherePredicate) {
    // Concrete field types need no predicate; a missing impl is reported at the field.
    if mentions_generics(ty, ctx.generics) {
        ctx.predicates.push(predicate);
    }
}
