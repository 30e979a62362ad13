//! Traversal paths, used in trace events and error messages.

use std::fmt;

/// One step from a parent node to a child.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Named field, or tuple index rendered as a name (`0`, `1`, ...).
    Field(&'static str),
    /// Position in a sequence.
    Index(usize),
    /// Key of a mapping entry or set element.
    MapKey,
    /// Value of a mapping entry.
    MapValue,
}

/// Location of a node relative to the traversal root.
///
/// Renders as a dotted path: `orders[2].customer.email`, with mapping entries
/// shown as `labels[<key>]` and `labels[<value>]`. The root renders as an
/// empty string.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// Path of the traversal root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns `true` for the traversal root.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Segments from the root down.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub(crate) fn push(&mut self, segment: PathSegment) {
        self.segments.push(segment);
    }

    pub(crate) fn pop(&mut self) {
        self.segments.pop();
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Field(name) => {
                    if position > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(name)?;
                }
                PathSegment::Index(index) => write!(f, "[{index}]")?,
                PathSegment::MapKey => f.write_str("[<key>]")?,
                PathSegment::MapValue => f.write_str("[<value>]")?,
            }
        }
        Ok(())
    }
}
