//! Generic type parameter handling and trait bound management.
//!
//! Two kinds of bounds are added to the generated impl:
//!
//! - `T: Sanitise` for every type parameter that appears in a walked field.
//!   Container impls forward the bound (`Vec<T>: Sanitise` iff `T: Sanitise`),
//!   so bounding the parameter is enough.
//! - Exact field-type predicates (`Option<T>: Default`, `T: Clone`) for the
//!   zero-value and copy requirements of tagged and opaque fields. Bounding the
//!   parameter would be too strict there: `Option<T>: Default` holds for any
//!   `T`.
//!
//! ## PhantomData Handling
//!
//! `PhantomData<T>` is skipped when collecting generics: it walks as a scalar
//! for every `T`, so a marker parameter never needs `T: Sanitise`.

use syn::{parse_quote, Ident, WherePredicate};

use crate::crate_path;

pub(crate) fn collect_generics_from_type(
    ty: &syn::Type,
    generics: &syn::Generics,
    result: &mut Vec<Ident>,
) {
    match ty {
        syn::Type::Path(path) => {
            if let Some(qself) = &path.qself {
                collect_generics_from_type(&qself.ty, generics, result);
            }
            if let Some(segment) = path.path.segments.last() {
                // PhantomData<T> sanitises without any bound on T.
                if segment.ident == "PhantomData" {
                    return;
                }
            }
            for segment in &path.path.segments {
                if let syn::PathArguments::AngleBracketed(args) = &segment.arguments {
                    for arg in &args.args {
                        if let syn::GenericArgument::Type(inner_ty) = arg {
                            collect_generics_from_type(inner_ty, generics, result);
                        }
                    }
                }
            }
            // `T` or `T::Assoc`: the first segment names the parameter.
            if path.qself.is_none() {
                if let Some(first) = path.path.segments.first() {
                    push_param(&first.ident, generics, result);
                }
            }
        }
        syn::Type::Reference(reference) => {
            collect_generics_from_type(&reference.elem, generics, result);
        }
        syn::Type::Array(array) => collect_generics_from_type(&array.elem, generics, result),
        syn::Type::Slice(slice) => collect_generics_from_type(&slice.elem, generics, result),
        syn::Type::Paren(paren) => collect_generics_from_type(&paren.elem, generics, result),
        syn::Type::Group(group) => collect_generics_from_type(&group.elem, generics, result),
        syn::Type::Tuple(tuple) => {
            for elem in &tuple.elems {
                collect_generics_from_type(elem, generics, result);
            }
        }
        _ => {}
    }
}

fn push_param(ident: &Ident, generics: &syn::Generics, result: &mut Vec<Ident>) {
    for param in generics.type_params() {
        if *ident == param.ident && !result.iter().any(|g| g == &param.ident) {
            result.push(param.ident.clone());
        }
    }
}

/// Returns `true` if `ty` mentions any of the container's type parameters.
pub(crate) fn mentions_generics(ty: &syn::Type, generics: &syn::Generics) -> bool {
    let mut found = Vec::new();
    collect_generics_from_type(ty, generics, &mut found);
    !found.is_empty()
}

/// Adds `Sanitise` bounds to generic parameters used in walked fields.
pub(crate) fn add_sanitise_bounds(
    mut generics: syn::Generics,
    used_generics: &[Ident],
) -> syn::Generics {
    for param in generics.type_params_mut() {
        if used_generics.iter().any(|g| g == &param.ident) {
            let sanitise_path = crate_path("Sanitise");
            param.bounds.push(parse_quote!(#sanitise_path));
        }
    }
    generics
}

/// Appends field-type predicates to the where clause.
pub(crate) fn add_predicates(
    mut generics: syn::Generics,
    predicates: Vec<WherePredicate>,
) -> syn::Generics {
    if !predicates.is_empty() {
        generics.make_where_clause().predicates.extend(predicates);
    }
    generics
}
