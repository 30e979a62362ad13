//! Diagnostic sink: where the walker reports what it visits and masks.
//!
//! The engine performs no logging itself. Each call resolves one sink:
//!
//! 1. the sink passed to [`crate::Sanitiser::sink`], if any;
//! 2. otherwise the process-wide sink installed with
//!    [`configure_diagnostic_sink`];
//! 3. otherwise [`NoopSink`].
//!
//! The process-wide sink is snapshotted when a call starts, so reconfiguring
//! it never changes the sink of an in-flight call.

use std::{
    fmt,
    sync::{Arc, PoisonError, RwLock},
};

use crate::{
    engine::{FieldPath, NodeKind},
    metadata::FieldDescriptor,
    options::Verbosity,
};

/// A single trace event emitted during traversal.
#[derive(Clone, Copy, Debug)]
pub enum TraceEvent<'a> {
    /// A node is about to be sanitised.
    Node {
        /// Location of the node.
        path: &'a FieldPath,
        /// Node kind of the value's type.
        kind: NodeKind,
        /// Rust type of the value.
        type_name: &'static str,
    },
    /// A field was replaced by its zero value.
    Mask {
        /// Location of the masked field.
        path: &'a FieldPath,
        /// Descriptor that matched.
        field: &'a FieldDescriptor,
        /// Active context.
        context: &'a str,
    },
    /// A self-sanitise hook ran on a freshly built node.
    Hook {
        /// Location of the node.
        path: &'a FieldPath,
        /// Rust type of the node.
        type_name: &'static str,
    },
}

impl TraceEvent<'_> {
    /// Location of the event.
    pub fn path(&self) -> &FieldPath {
        match self {
            Self::Node { path, .. } | Self::Mask { path, .. } | Self::Hook { path, .. } => path,
        }
    }

    /// Lowest verbosity at which the event is emitted.
    pub fn verbosity(&self) -> Verbosity {
        match self {
            Self::Node { .. } => Verbosity::Nodes,
            Self::Mask { .. } | Self::Hook { .. } => Verbosity::Decisions,
        }
    }
}

impl fmt::Display for TraceEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node {
                path,
                kind,
                type_name,
            } => write!(f, "visit {kind} `{type_name}` at `{path}`"),
            Self::Mask {
                path,
                field,
                context,
            } => write!(
                f,
                "mask `{path}` ({}) under context `{context}`",
                field.type_name
            ),
            Self::Hook { path, type_name } => {
                write!(f, "self-sanitise `{type_name}` at `{path}`")
            }
        }
    }
}

/// Receives trace events. Must be synchronous and cheap.
pub trait DiagnosticSink {
    /// Handles one event.
    fn trace(&self, event: &TraceEvent<'_>);
}

impl<F> DiagnosticSink for F
where
    F: Fn(&TraceEvent<'_>),
{
    fn trace(&self, event: &TraceEvent<'_>) {
        self(event);
    }
}

/// Sink that discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl DiagnosticSink for NoopSink {
    fn trace(&self, _event: &TraceEvent<'_>) {}
}

/// Shared handle to a process-wide sink.
pub type SharedSink = Arc<dyn DiagnosticSink + Send + Sync>;

static INSTALLED_SINK: RwLock<Option<SharedSink>> = RwLock::new(None);

/// Installs the process-wide default sink; `None` resets it to a no-op.
///
/// Intended to be called once during start-up. Calls that pass their own sink
/// through [`crate::Sanitiser::sink`] ignore it.
pub fn configure_diagnostic_sink(sink: Option<SharedSink>) {
    let mut installed = INSTALLED_SINK
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    *installed = sink;
}

/// Snapshot of the process-wide sink.
pub(crate) fn installed_sink() -> Option<SharedSink> {
    INSTALLED_SINK
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}
