//! `#[sanitise(...)]` on the deriving type itself.
//!
//! The only type-level option is `hook`. Field attributes are read in
//! `strategy.rs`.

use syn::{spanned::Spanned, Attribute, Meta, Result};

#[derive(Clone, Debug, Default)]
pub(crate) struct ContainerOptions {
    /// Route the sanitised copy through the type's `SelfSanitise` impl.
    pub(crate) hook: bool,
}

pub(crate) fn parse_container_options(attrs: &[Attribute]) -> Result<ContainerOptions> {
    let mut options = ContainerOptions::default();

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("sanitise")) {
        let Meta::List(list) = &attr.meta else {
            return Err(syn::Error::new(
                attr.meta.span(),
                "a type takes `#[sanitise(hook)]`; contexts belong on fields",
            ));
        };

        list.parse_nested_meta(|meta| {
            if !meta.path.is_ident("hook") {
                return Err(meta.error("the only type-level option is `hook`"));
            }
            if options.hook {
                return Err(meta.error("`hook` is set more than once"));
            }
            options.hook = true;
            Ok(())
        })?;
    }

    Ok(options)
}
