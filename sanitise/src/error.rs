//! Error type returned by sanitisation.

use thiserror::Error;

/// Errors that abort a sanitise call.
///
/// A failed call produces no usable output; the source value is untouched.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SanitiseError {
    /// A field matched the active context but its storage cannot be written,
    /// e.g. a field holding a shared borrow.
    #[error("cannot mask unwritable field `{path}` of type `{type_name}`")]
    UnwritableField {
        /// Dotted path from the traversal root to the field.
        path: String,
        /// Rust type of the field.
        type_name: &'static str,
    },
}

impl SanitiseError {
    /// Dotted path of the field the error refers to.
    pub fn path(&self) -> &str {
        match self {
            Self::UnwritableField { path, .. } => path,
        }
    }
}
