//! Engine module: the provenance session and its lifecycle hooks.
//!
//! Provides the `Provenance` session object, its builder, and the scoped
//! evaluation guard that pairs `before_eval`/`after_eval` on every exit path.

pub mod builder;
pub mod core;
pub mod scope;

pub use self::builder::ProvenanceBuilder;
pub use self::core::{Provenance, SessionState};
pub use self::scope::EvalScope;
