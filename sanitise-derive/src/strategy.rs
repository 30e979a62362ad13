//! Parsing of `#[sanitise(...)]` field attributes.
//!
//! This module resolves the field annotation once, at build time, into the
//! context tokens and traversal flags the generated code is built from, and
//! produces structured errors for invalid forms.

use proc_macro2::Span;
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    Attribute, Expr, ExprLit, Ident, Lit, LitStr, Meta, Result, Token,
};

/// How a single field is sanitised.
///
/// ## Attribute Mapping
///
/// | Attribute | `contexts` | `opaque` |
/// |-----------|------------|----------|
/// | None | empty | `false` |
/// | `#[sanitise("a,b")]` / `#[sanitise = "a,b"]` | `["a", "b"]` | `false` |
/// | `#[sanitise(opaque)]` | empty | `true` |
/// | `#[sanitise("a", opaque)]` | `["a"]` | `true` |
#[derive(Clone, Debug, Default)]
pub(crate) struct FieldStrategy {
    /// Ordered set of context tokens, verbatim.
    pub(crate) contexts: Vec<String>,
    /// Copy with `Clone` instead of walking.
    pub(crate) opaque: bool,
}

impl FieldStrategy {
    /// A field is tagged when at least one token can ever match.
    pub(crate) fn is_tagged(&self) -> bool {
        self.contexts.iter().any(|token| !token.is_empty())
    }
}

/// Splits an annotation on `,`, keeping first occurrences in order.
///
/// Must agree with `sanitise::parse_contexts`.
pub(crate) fn parse_contexts(tag: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    if tag.is_empty() {
        return tokens;
    }
    for token in tag.split(',') {
        if !tokens.iter().any(|existing| existing == token) {
            tokens.push(token.to_string());
        }
    }
    tokens
}

enum FieldArg {
    Contexts(LitStr),
    Opaque(Span),
}

impl Parse for FieldArg {
    fn parse(input: ParseStream<'_>) -> Result<Self> {
        if input.peek(LitStr) {
            return Ok(Self::Contexts(input.parse()?));
        }
        let ident: Ident = input.parse().map_err(|err| {
            syn::Error::new(
                err.span(),
                "expected a context list (e.g. #[sanitise(\"logs,audit\")]) or `opaque`",
            )
        })?;
        if ident == "opaque" {
            Ok(Self::Opaque(ident.span()))
        } else {
            Err(syn::Error::new(
                ident.span(),
                format!("unknown field option `{ident}`; expected a context list or `opaque`"),
            ))
        }
    }
}

fn set_contexts(strategy: &mut FieldStrategy, seen: &mut bool, lit: &LitStr) -> Result<()> {
    if *seen {
        return Err(syn::Error::new(
            lit.span(),
            "contexts specified more than once; use a single comma-separated list",
        ));
    }
    *seen = true;
    strategy.contexts = parse_contexts(&lit.value());
    Ok(())
}

pub(crate) fn parse_field_strategy(attrs: &[Attribute]) -> Result<FieldStrategy> {
    let mut strategy = FieldStrategy::default();
    let mut found = false;

    for attr in attrs {
        if !attr.path().is_ident("sanitise") {
            continue;
        }
        if found {
            return Err(syn::Error::new(
                attr.span(),
                "multiple #[sanitise] attributes specified on the same field",
            ));
        }
        found = true;

        let mut seen_contexts = false;
        match &attr.meta {
            Meta::Path(_) => {
                return Err(syn::Error::new(
                    attr.span(),
                    "expected a context list (e.g. #[sanitise(\"logs,audit\")])",
                ));
            }
            Meta::List(list) => {
                let args =
                    list.parse_args_with(Punctuated::<FieldArg, Token![,]>::parse_terminated)?;
                if args.is_empty() {
                    return Err(syn::Error::new(
                        attr.span(),
                        "empty #[sanitise()]; expected a context list or `opaque`",
                    ));
                }
                for arg in args {
                    match arg {
                        FieldArg::Contexts(lit) => {
                            set_contexts(&mut strategy, &mut seen_contexts, &lit)?;
                        }
                        FieldArg::Opaque(span) => {
                            if strategy.opaque {
                                return Err(syn::Error::new(span, "`opaque` specified twice"));
                            }
                            strategy.opaque = true;
                        }
                    }
                }
            }
            Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(lit), ..
                }) => set_contexts(&mut strategy, &mut seen_contexts, lit)?,
                other => {
                    return Err(syn::Error::new(
                        other.span(),
                        "expected a string literal context list",
                    ));
                }
            },
        }
    }

    // Default: no annotation means never masked directly, always walked
    Ok(strategy)
}
