//! Type utilities for the derive macro.

use quote::ToTokens;

/// Returns the borrow behind a field type (`&'a T`, `&'a mut T`), if any.
///
/// A sanitised copy cannot point a borrow at a fresh zero value, so borrowed
/// fields are described as non-settable: they are copied as-is and masking
/// them is an error. Parentheses and invisible groups are looked through.
pub(crate) fn as_reference(ty: &syn::Type) -> Option<&syn::TypeReference> {
    match ty {
        syn::Type::Reference(reference) => Some(reference),
        syn::Type::Paren(paren) => as_reference(&paren.elem),
        syn::Type::Group(group) => as_reference(&group.elem),
        _ => None,
    }
}

/// Renders a type the way it was written, for field descriptors.
///
/// Token spacing is normalised so `Option < Box < T > >` reads `Option<Box<T>>`
/// while `& 'a str` keeps its separating space (`&'a str`).
pub(crate) fn type_display(ty: &syn::Type) -> String {
    let raw = ty.to_token_stream().to_string();
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == ' ' {
            let prev = out.chars().last();
            let next = chars.peek().copied();
            let word = |c: Option<char>| c.is_some_and(|c| c.is_alphanumeric() || c == '_');
            if (word(prev) && word(next)) || prev == Some(',') {
                out.push(' ');
            }
            continue;
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use quote::quote;

    use super::*;

    fn parse_type(tokens: proc_macro2::TokenStream) -> syn::Type {
        syn::parse2(tokens).expect("should parse as Type")
    }

    #[test]
    fn shared_reference_detected() {
        let ty = parse_type(quote! { &'a str });
        let reference = as_reference(&ty).unwrap();
        assert!(reference.mutability.is_none());
    }

    #[test]
    fn mutable_reference_detected() {
        let ty = parse_type(quote! { &'a mut Vec<u8> });
        assert!(as_reference(&ty).unwrap().mutability.is_some());
    }

    #[test]
    fn parenthesised_reference_detected() {
        let ty = parse_type(quote! { (&'a [u8]) });
        assert!(as_reference(&ty).is_some());
    }

    #[test]
    fn owned_types_are_not_references() {
        assert!(as_reference(&parse_type(quote! { String })).is_none());
        assert!(as_reference(&parse_type(quote! { Box<str> })).is_none());
        assert!(as_reference(&parse_type(quote! { Cow<'a, str> })).is_none());
    }

    #[test]
    fn generic_types_render_compactly() {
        let ty = parse_type(quote! { Option<Box<T>> });
        assert_eq!(type_display(&ty), "Option<Box<T>>");
    }

    #[test]
    fn map_types_keep_comma_spacing() {
        let ty = parse_type(quote! { HashMap<String, Vec<u8>> });
        assert_eq!(type_display(&ty), "HashMap<String, Vec<u8>>");
    }

    #[test]
    fn references_keep_lifetime_spacing() {
        let ty = parse_type(quote! { &'a str });
        assert_eq!(type_display(&ty), "&'a str");
    }
}
