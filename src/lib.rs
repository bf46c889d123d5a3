//! hsm-engine: a bounded-depth hierarchical state machine runtime
//!
//! States form a static tree. Events enter at the active leaf and walk up
//! through its ancestors; transitions move the active leaf by exiting and
//! entering exactly the states that differ between the two branches, found
//! through a lowest-common-ancestor search.
//!
//! # Core Concepts
//!
//! - **StateTree**: immutable arena of state descriptors built once
//! - **Machine**: per-instance context driving `init`, `dispatch`, `transition`
//! - **Verdict**: handler result; only `Discard` stops propagation
//! - **Fault**: fatal misuse, reported through an injected reporter
//!
//! Every traversal is capped by the const depth `N` (5 unless a tree says
//! otherwise), so the cost of each call is bounded and allocation free.
//!
//! # Example
//!
//! ```rust
//! use hsm_engine::core::{StateTree, Verdict};
//! use hsm_engine::engine::Machine;
//!
//! #[derive(Debug)]
//! enum Ev {
//!     Switch,
//! }
//!
//! let mut builder = StateTree::builder();
//! let root = builder.add_root("Root");
//! let a = builder.add_child(root, "A");
//! let a1 = builder.add_child(a, "A1");
//! let b = builder.add_child(root, "B");
//! let b1 = builder.add_child(b, "B1");
//! for (id, name) in [(a, "A"), (a1, "A1"), (b, "B"), (b1, "B1")] {
//!     builder
//!         .on_entry(id, move |_, log: &mut Vec<String>| log.push(format!("enter {name}")))
//!         .on_exit(id, move |_, log: &mut Vec<String>| log.push(format!("exit {name}")));
//! }
//! builder.on_event(a1, move |m, log: &mut Vec<String>, _: &Ev| {
//!     m.transition(log, b1)?;
//!     Ok(Verdict::Handled)
//! });
//! let tree: StateTree<Vec<String>, Ev> = builder.build().unwrap();
//!
//! let mut log = Vec::new();
//! let mut machine = Machine::new(&tree);
//! machine.init(&mut log, a1).unwrap();
//! log.clear();
//!
//! machine.dispatch(&mut log, &Ev::Switch).unwrap();
//!
//! assert_eq!(log, ["exit A1", "exit A", "enter B", "enter B1"]);
//! assert_eq!(machine.current(), Some(b1));
//! ```

pub mod builder;
pub mod core;
pub mod engine;

// Re-export commonly used types
pub use crate::builder::{BuildError, MachineBuilder, StateTreeBuilder};
pub use crate::core::{StateDef, StateId, StateTree, Verdict, DEFAULT_MAX_DEPTH};
pub use crate::engine::{Fault, FaultReporter, Machine, TransitionInfo};
