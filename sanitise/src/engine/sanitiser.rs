//! Entrypoints: the `Sanitiser` builder and the free functions on top of it.

use super::{node::Sanitise, walker::Walker};
use crate::{
    diagnostics::{installed_sink, DiagnosticSink, NoopSink},
    error::SanitiseError,
    options::{KeyPolicy, SanitiseOptions, Verbosity},
};

/// Configured sanitise call: context, options and an optional sink.
///
/// ```rust
/// use sanitise::{KeyPolicy, Sanitiser, Verbosity};
///
/// let sanitiser = Sanitiser::new("audit")
///     .key_policy(KeyPolicy::Preserve)
///     .verbosity(Verbosity::Quiet);
/// assert_eq!(sanitiser.sanitise(&7_u8).unwrap(), 7);
/// ```
#[derive(Clone, Copy)]
pub struct Sanitiser<'a> {
    context: &'a str,
    options: SanitiseOptions,
    sink: Option<&'a dyn DiagnosticSink>,
}

impl<'a> Sanitiser<'a> {
    /// Sanitiser for `context` with default options.
    pub fn new(context: &'a str) -> Self {
        Self {
            context,
            options: SanitiseOptions::default(),
            sink: None,
        }
    }

    /// Replaces all options.
    #[must_use]
    pub fn with_options(mut self, options: SanitiseOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the mapping key policy.
    #[must_use]
    pub fn key_policy(mut self, key_policy: KeyPolicy) -> Self {
        self.options.key_policy = key_policy;
        self
    }

    /// Sets the diagnostic verbosity.
    #[must_use]
    pub fn verbosity(mut self, verbosity: Verbosity) -> Self {
        self.options.verbosity = verbosity;
        self
    }

    /// Sends this sanitiser's trace events to `sink` instead of the
    /// process-wide one.
    #[must_use]
    pub fn sink(mut self, sink: &'a dyn DiagnosticSink) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Active context.
    pub fn context(&self) -> &'a str {
        self.context
    }

    /// Current options.
    pub fn options(&self) -> &SanitiseOptions {
        &self.options
    }

    /// Returns a sanitised deep copy of `value`. The source is not modified.
    pub fn sanitise<T: Sanitise>(&self, value: &T) -> Result<T, SanitiseError> {
        let installed = installed_sink();
        let sink: &dyn DiagnosticSink = match (self.sink, installed.as_deref()) {
            (Some(sink), _) => sink,
            (None, Some(sink)) => sink,
            (None, None) => &NoopSink,
        };
        Walker::new(self.context, self.options, sink).walk(value)
    }

    /// Replaces `value` with its sanitised copy.
    ///
    /// On error `value` is left exactly as it was.
    pub fn sanitise_in_place<T: Sanitise>(&self, value: &mut T) -> Result<(), SanitiseError> {
        *value = self.sanitise(value)?;
        Ok(())
    }
}

/// Returns a sanitised deep copy of `value` for `context`, with default options.
///
/// ```rust
/// use std::collections::HashMap;
///
/// let mut labels = HashMap::new();
/// labels.insert("team".to_string(), "payments".to_string());
/// let clean = sanitise::sanitise(&labels, "logs").unwrap();
/// assert_eq!(clean, labels);
/// ```
pub fn sanitise<T: Sanitise>(value: &T, context: &str) -> Result<T, SanitiseError> {
    Sanitiser::new(context).sanitise(value)
}

/// Sanitises `value` in place for `context`; on error it is left untouched.
pub fn sanitise_in_place<T: Sanitise>(value: &mut T, context: &str) -> Result<(), SanitiseError> {
    Sanitiser::new(context).sanitise_in_place(value)
}

/// Method-call form of [`sanitise`].
pub trait SanitiseExt: Sanitise {
    /// Returns a sanitised deep copy of `self` for `context`.
    fn sanitised(&self, context: &str) -> Result<Self, SanitiseError> {
        sanitise(self, context)
    }
}

impl<T> SanitiseExt for T where T: Sanitise {}
