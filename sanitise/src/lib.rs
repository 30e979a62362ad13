//! Context-driven sanitisation for structured data.
//!
//! Fields declare the contexts they are sensitive under; a sanitise call names
//! the active context and gets back a deep copy in which every matching field
//! is replaced by its zero value (`Default::default()`).
//!
//! ```rust
//! use sanitise::Sanitise;
//!
//! #[derive(Clone, Debug, Default, PartialEq, Sanitise)]
//! struct Login {
//!     #[sanitise("logs,audit")]
//!     password: String,
//!     #[sanitise("*")]
//!     session_token: String,
//!     username: String,
//! }
//!
//! let login = Login {
//!     password: "hunter2".into(),
//!     session_token: "abc123".into(),
//!     username: "ada".into(),
//! };
//!
//! let for_logs = sanitise::sanitise(&login, "logs").unwrap();
//! assert_eq!(for_logs.password, "");
//! assert_eq!(for_logs.session_token, "");
//! assert_eq!(for_logs.username, "ada");
//! ```
//!
//! Key rules:
//! - `#[sanitise("a,b")]` masks the field under contexts `a` and `b`; `"*"`
//!   masks it under every context.
//! - A masked field is zeroed whole: nothing inside it is visited.
//! - Every other field is walked, so nested tagged fields are still masked.
//! - `#[sanitise(opaque)]` copies a field with `Clone` instead of walking it,
//!   for foreign types that do not implement [`Sanitise`].
//! - `#[sanitise(hook)]` on a type runs its [`SelfSanitise`] impl after
//!   tag-driven masking.
//! - Fields holding shared borrows (`&'a str`) cannot be masked; trying to is
//!   a [`SanitiseError::UnwritableField`].
//!
//! What this crate does:
//! - defines the [`Sanitise`] trait and implements it for std types
//! - walks values, masks fields, dispatches hooks, reports to a
//!   [`DiagnosticSink`]
//! - provides integrations behind feature flags (`serde`, `slog`)
//!
//! What it does not do:
//! - perform I/O or logging on its own
//! - detect cycles (`Rc`/`Arc` graphs are walked as trees)
//! - enforce access control; it only masks data already in hand
//!
//! The `Sanitise` derive macro lives in `sanitise-derive` and is re-exported when
//! the `derive` feature is enabled.

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::default_trait_access,
    clippy::doc_markdown,
    clippy::if_not_else,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::use_self,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::enum_glob_use,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::option_if_let_else,
    clippy::unused_self
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

// Lets derived impls name this crate as `::sanitise` from inside it too.
#[allow(unused_extern_crates)]
extern crate self as sanitise;

#[cfg(feature = "derive")]
pub use sanitise_derive::Sanitise;

// Module declarations
mod diagnostics;
mod engine;
mod error;
mod metadata;
mod options;
#[cfg(feature = "slog")]
pub mod slog;

// Re-exports
pub use diagnostics::{configure_diagnostic_sink, DiagnosticSink, NoopSink, SharedSink, TraceEvent};
pub use engine::{
    sanitise, sanitise_in_place, AnySanitise, Dynamic, FieldPath, NodeKind, PathSegment,
    Sanitise, SanitiseExt, Sanitiser, SelfSanitise, Walker,
};
pub use error::SanitiseError;
pub use metadata::{matches, parse_contexts, Decision, FieldDescriptor, WILDCARD};
pub use options::{KeyPolicy, SanitiseOptions, Verbosity};
