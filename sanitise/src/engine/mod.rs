//! The traversal engine.
//!
//! - **`node`**: what can be walked (`Sanitise`, `NodeKind`, dynamic slots)
//! - **`walker`**: per-call traversal state and field helpers
//! - **`hook`**: the opt-in self-sanitise capability
//! - **`impls`**: std scalars, pointers, sequences and mappings
//! - **`sanitiser`**: entrypoints
//!
//! Field metadata lives in `crate::metadata`.

mod hook;
mod impls;
mod node;
mod path;
mod sanitiser;
mod walker;

pub use hook::SelfSanitise;
pub use node::{AnySanitise, Dynamic, NodeKind, Sanitise};
pub use path::{FieldPath, PathSegment};
pub use sanitiser::{sanitise, sanitise_in_place, SanitiseExt, Sanitiser};
pub use walker::Walker;
