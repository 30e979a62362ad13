//! The `Sanitise` trait and the node kinds it dispatches on.
//!
//! Every type the walker can traverse implements [`Sanitise`] and declares a
//! [`NodeKind`]. The kind is descriptive (trace events, documentation); the
//! behaviour lives in each impl:
//!
//! | Kind | Behaviour |
//! |------|-----------|
//! | `Scalar` | copied verbatim |
//! | `Pointer` | none stays none; otherwise a new allocation holding the sanitised pointee (`Result` walks whichever side it holds) |
//! | `Dynamic` | unwrapped to the concrete type, sanitised, rewrapped |
//! | `Struct` | rebuilt field by field from the derive's descriptor table |
//! | `Sequence` | same length, element-wise by position (tuples included) |
//! | `Mapping` | new mapping, keys per [`crate::KeyPolicy`], values walked |

use std::{any::Any, fmt};

use super::{hook::SelfSanitise, walker::Walker};
use crate::error::SanitiseError;

/// Structural kind of a value, as seen by the walker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Leaf value with no sanitisable structure.
    Scalar,
    /// Nullable or owning indirection to a single value.
    Pointer,
    /// Slot holding a value whose concrete type is only known at runtime.
    Dynamic,
    /// Record with named or positional fields (structs and enum variants).
    Struct,
    /// Ordered, positional collection.
    Sequence,
    /// Collection keyed by unique keys.
    Mapping,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Scalar => "scalar",
            Self::Pointer => "pointer",
            Self::Dynamic => "dynamic",
            Self::Struct => "struct",
            Self::Sequence => "sequence",
            Self::Mapping => "mapping",
        })
    }
}

/// A type that can produce a sanitised copy of itself.
///
/// Usually derived with `#[derive(Sanitise)]`. Implementations must recurse
/// through [`Walker::walk`] (or the walker's field helpers) rather than
/// calling `sanitise_with` on children directly, so that every node is traced
/// and offered to the hook dispatcher.
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `Sanitise`",
    label = "this type cannot be walked by the sanitiser",
    note = "use `#[derive(Sanitise)]` on the type definition",
    note = "or mark the field `#[sanitise(opaque)]` to copy it with `Clone`"
)]
pub trait Sanitise: Sized {
    /// Structural kind reported in trace events.
    const KIND: NodeKind;

    /// Builds the sanitised counterpart of `self` for the walker's context.
    fn sanitise_with(&self, walker: &mut Walker<'_>) -> Result<Self, SanitiseError>;

    /// Exposes the self-sanitise capability, if the type has opted in.
    ///
    /// The derive overrides this for types annotated `#[sanitise(hook)]`.
    fn as_self_sanitise(&mut self) -> Option<&mut dyn SelfSanitise> {
        None
    }
}

/// Object-safe face of [`Sanitise`], used for dynamic-typed slots.
///
/// Blanket-implemented for every `'static` [`Sanitise`] type; there is no
/// reason to implement it by hand.
pub trait AnySanitise: Any {
    /// Sanitises the concrete value behind the trait object and reboxes it.
    fn sanitise_dyn(&self, walker: &mut Walker<'_>)
        -> Result<Box<dyn AnySanitise>, SanitiseError>;

    /// Borrows the concrete value as `Any`.
    fn as_any(&self) -> &dyn Any;

    /// Name of the concrete type.
    fn concrete_type_name(&self) -> &'static str;
}

impl<T> AnySanitise for T
where
    T: Sanitise + 'static,
{
    fn sanitise_dyn(
        &self,
        walker: &mut Walker<'_>,
    ) -> Result<Box<dyn AnySanitise>, SanitiseError> {
        Ok(Box::new(walker.walk(self)?))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn concrete_type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

impl dyn AnySanitise {
    /// Downcasts to the concrete type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_any().downcast_ref()
    }

    /// Returns `true` if the concrete type is `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.as_any().is::<T>()
    }
}

impl fmt::Debug for dyn AnySanitise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Dynamic")
            .field(&self.concrete_type_name())
            .finish()
    }
}

/// A dynamic-typed slot. Use `Option<Dynamic>` for a slot that may be empty.
pub type Dynamic = Box<dyn AnySanitise>;

impl Sanitise for Box<dyn AnySanitise> {
    const KIND: NodeKind = NodeKind::Dynamic;

    fn sanitise_with(&self, walker: &mut Walker<'_>) -> Result<Self, SanitiseError> {
        // Dispatch through the vtable: `self` is itself `AnySanitise`.
        (**self).sanitise_dyn(walker)
    }
}
