//! Caller-side configuration for a sanitise call.

/// How mapping keys (and set elements) are treated.
///
/// Keys may carry structured data with their own tagged fields. Sanitising
/// them can make two distinct source keys collide; the later entry wins.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum KeyPolicy {
    /// Walk keys like any other node.
    #[default]
    Sanitise,
    /// Clone keys verbatim; only values are walked.
    Preserve,
}

/// Which trace events reach the diagnostic sink.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Verbosity {
    /// Nothing is emitted.
    Quiet,
    /// Masking decisions and hook invocations.
    #[default]
    Decisions,
    /// Everything, including one event per visited node.
    Nodes,
}

/// Options for a sanitise call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SanitiseOptions {
    /// Mapping key policy.
    pub key_policy: KeyPolicy,
    /// Diagnostic verbosity.
    pub verbosity: Verbosity,
}

impl SanitiseOptions {
    /// Sets the mapping key policy.
    #[must_use]
    pub const fn with_key_policy(mut self, key_policy: KeyPolicy) -> Self {
        self.key_policy = key_policy;
        self
    }

    /// Sets the diagnostic verbosity.
    #[must_use]
    pub const fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }
}
