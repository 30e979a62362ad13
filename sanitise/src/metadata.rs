//! Field metadata: context tokens, field descriptors and masking decisions.
//!
//! A field's `#[sanitise("...")]` annotation is a comma-separated list of
//! context tokens. The derive macro resolves it once, at build time, into a
//! static [`FieldDescriptor`]. This module holds the runtime half: the same
//! parsing rule for hand-written schemas, and the matcher that turns
//! `(descriptor, active context)` into a [`Decision`].

/// Token that matches every active context.
pub const WILDCARD: &str = "*";

/// Parses a sanitise annotation into an ordered set of context tokens.
///
/// Tokens are split on `,` and kept verbatim: no trimming, no validation.
/// Duplicates are dropped, keeping the first occurrence. An empty annotation
/// yields an empty set, so the field is never masked directly.
///
/// ```rust
/// use sanitise::parse_contexts;
///
/// assert_eq!(parse_contexts("audit,logs,audit"), vec!["audit", "logs"]);
/// assert!(parse_contexts("").is_empty());
/// ```
pub fn parse_contexts(tag: &str) -> Vec<&str> {
    if tag.is_empty() {
        return Vec::new();
    }

    let mut tokens: Vec<&str> = Vec::new();
    for token in tag.split(',') {
        if !tokens.contains(&token) {
            tokens.push(token);
        }
    }
    tokens
}

/// Returns `true` when `active` is covered by `tokens`.
///
/// A token covers the context when it equals it or is [`WILDCARD`]. Empty
/// tokens (e.g. from a trailing separator) never match anything, not even an
/// empty active context.
pub fn matches<S: AsRef<str>>(tokens: &[S], active: &str) -> bool {
    tokens
        .iter()
        .map(AsRef::as_ref)
        .any(|token| !token.is_empty() && (token == WILDCARD || token == active))
}

/// Static description of one struct field, as seen by the walker.
///
/// The derive emits one of these per field. Hand-written [`crate::Sanitise`]
/// impls build them as constants:
///
/// ```rust
/// use sanitise::FieldDescriptor;
///
/// const PASSWORD: FieldDescriptor =
///     FieldDescriptor::new("password", "String", &["audit", "logs"]);
/// assert!(PASSWORD.settable);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FieldDescriptor {
    /// Field name (or tuple index) used in traversal paths.
    pub name: &'static str,
    /// Declared type, as written in the source.
    pub type_name: &'static str,
    /// Ordered set of context tokens this field is sensitive under.
    pub contexts: &'static [&'static str],
    /// Whether the walker may replace the field with its zero value.
    pub settable: bool,
}

impl FieldDescriptor {
    /// Describes a writable field.
    #[must_use]
    pub const fn new(
        name: &'static str,
        type_name: &'static str,
        contexts: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            type_name,
            contexts,
            settable: true,
        }
    }

    /// Marks the field as read-only; masking it becomes an error.
    #[must_use]
    pub const fn read_only(mut self) -> Self {
        self.settable = false;
        self
    }

    /// Returns `true` if at least one token can ever match.
    pub fn is_tagged(&self) -> bool {
        self.contexts.iter().any(|token| !token.is_empty())
    }
}

/// What the walker does with a field under the active context.
///
/// The two outcomes are exclusive: a masked field is never descended into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Decision {
    /// Replace the field with its zero value.
    Mask,
    /// Recursively sanitise the field's current value.
    Descend,
}

impl Decision {
    /// Decides how `field` is handled under `context`.
    pub fn for_field(field: &FieldDescriptor, context: &str) -> Self {
        if matches(field.contexts, context) {
            Self::Mask
        } else {
            Self::Descend
        }
    }
}
