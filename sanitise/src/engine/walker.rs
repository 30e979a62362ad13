//! The graph walker: recursive, deep-cloning traversal state for one call.

use std::any::type_name;

use super::{
    hook,
    node::Sanitise,
    path::{FieldPath, PathSegment},
};
use crate::{
    diagnostics::{DiagnosticSink, TraceEvent},
    error::SanitiseError,
    metadata::{Decision, FieldDescriptor},
    options::{KeyPolicy, SanitiseOptions},
};

/// Traversal state threaded through every [`Sanitise`] impl.
///
/// A walker lives for exactly one sanitise call. It carries the active
/// context, the caller's options, the resolved diagnostic sink and the path
/// from the root to the node currently being built.
///
/// Derived impls only use the field helpers ([`Walker::field`],
/// [`Walker::walk_field`], ...). Hand-written impls for containers use
/// [`Walker::walk`], [`Walker::element`], [`Walker::map_key`] and
/// [`Walker::map_value`].
pub struct Walker<'a> {
    context: &'a str,
    options: SanitiseOptions,
    sink: &'a dyn DiagnosticSink,
    path: FieldPath,
}

impl<'a> Walker<'a> {
    pub(crate) fn new(
        context: &'a str,
        options: SanitiseOptions,
        sink: &'a dyn DiagnosticSink,
    ) -> Self {
        Self {
            context,
            options,
            sink,
            path: FieldPath::root(),
        }
    }

    /// Active context.
    pub fn context(&self) -> &str {
        self.context
    }

    /// Options of the current call.
    pub fn options(&self) -> &SanitiseOptions {
        &self.options
    }

    /// Path from the root to the node being built.
    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    /// Decides whether `field` is masked under the active context.
    pub fn decide(&self, field: &FieldDescriptor) -> Decision {
        Decision::for_field(field, self.context)
    }

    /// Sanitises one node and runs its self-sanitise hook.
    ///
    /// Every recursion goes through here.
    pub fn walk<T: Sanitise>(&mut self, value: &T) -> Result<T, SanitiseError> {
        self.emit(&TraceEvent::Node {
            path: &self.path,
            kind: T::KIND,
            type_name: type_name::<T>(),
        });
        let mut sanitised = value.sanitise_with(self)?;
        if hook::dispatch(&mut sanitised, self.context) {
            self.emit(&TraceEvent::Hook {
                path: &self.path,
                type_name: type_name::<T>(),
            });
        }
        Ok(sanitised)
    }

    /// Tagged, writable field: zero value on a match, otherwise walked.
    pub fn field<T>(&mut self, field: &FieldDescriptor, value: &T) -> Result<T, SanitiseError>
    where
        T: Sanitise + Default,
    {
        self.descend(PathSegment::Field(field.name), |walker| {
            match walker.decide(field) {
                Decision::Mask => {
                    walker.mask::<T>(field)?;
                    Ok(T::default())
                }
                Decision::Descend => walker.walk(value),
            }
        })
    }

    /// Untagged field: always walked.
    pub fn walk_field<T: Sanitise>(
        &mut self,
        field: &FieldDescriptor,
        value: &T,
    ) -> Result<T, SanitiseError> {
        self.descend(PathSegment::Field(field.name), |walker| walker.walk(value))
    }

    /// Tagged `opaque` field: zero value on a match, otherwise cloned.
    pub fn masked_copy<T>(&mut self, field: &FieldDescriptor, value: &T) -> Result<T, SanitiseError>
    where
        T: Clone + Default,
    {
        self.descend(PathSegment::Field(field.name), |walker| {
            match walker.decide(field) {
                Decision::Mask => {
                    walker.mask::<T>(field)?;
                    Ok(T::default())
                }
                Decision::Descend => Ok(value.clone()),
            }
        })
    }

    /// Untagged `opaque` field: cloned verbatim.
    pub fn copy_field<T: Clone>(&mut self, _field: &FieldDescriptor, value: &T) -> T {
        value.clone()
    }

    /// Fails if `field` would be masked, for fields whose storage is read-only.
    ///
    /// The value is only used to name its type in the error.
    pub fn ensure_writable<T: ?Sized>(
        &mut self,
        field: &FieldDescriptor,
        _value: &T,
    ) -> Result<(), SanitiseError> {
        self.descend(PathSegment::Field(field.name), |walker| {
            match walker.decide(field) {
                Decision::Mask => Err(walker.unwritable::<T>()),
                Decision::Descend => Ok(()),
            }
        })
    }

    /// Sequence element at `index`.
    pub fn element<T: Sanitise>(&mut self, index: usize, value: &T) -> Result<T, SanitiseError> {
        self.descend(PathSegment::Index(index), |walker| walker.walk(value))
    }

    /// Mapping key or set element, handled per [`KeyPolicy`].
    pub fn map_key<K>(&mut self, key: &K) -> Result<K, SanitiseError>
    where
        K: Sanitise + Clone,
    {
        match self.options.key_policy {
            KeyPolicy::Sanitise => self.descend(PathSegment::MapKey, |walker| walker.walk(key)),
            KeyPolicy::Preserve => Ok(key.clone()),
        }
    }

    /// Mapping value.
    pub fn map_value<V: Sanitise>(&mut self, value: &V) -> Result<V, SanitiseError> {
        self.descend(PathSegment::MapValue, |walker| walker.walk(value))
    }

    fn mask<T>(&self, field: &FieldDescriptor) -> Result<(), SanitiseError> {
        if !field.settable {
            return Err(self.unwritable::<T>());
        }
        self.emit(&TraceEvent::Mask {
            path: &self.path,
            field,
            context: self.context,
        });
        Ok(())
    }

    pub(crate) fn unwritable<T: ?Sized>(&self) -> SanitiseError {
        SanitiseError::UnwritableField {
            path: self.path.to_string(),
            type_name: type_name::<T>(),
        }
    }

    fn descend<R>(&mut self, segment: PathSegment, f: impl FnOnce(&mut Self) -> R) -> R {
        self.path.push(segment);
        let result = f(self);
        self.path.pop();
        result
    }

    fn emit(&self, event: &TraceEvent<'_>) {
        if self.options.verbosity >= event.verbosity() {
            self.sink.trace(event);
        }
    }
}
