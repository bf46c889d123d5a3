//! State-tree data model.
//!
//! Everything here is passive: descriptors, the arena holding them, the
//! verdict enumeration and the bounded path type used for traversal. None of
//! it runs a callback; that is the engine's job.

mod path;
mod state;
mod tree;
mod verdict;

pub use path::{Path, DEFAULT_MAX_DEPTH};
pub use state::{EventHandler, StateAction, StateDef, StateId};
pub use tree::{Ancestors, StateTree};
pub use verdict::Verdict;
