//! The dispatch and transition engine.
//!
//! This is the imperative shell around the passive state tree:
//!
//! - **Machine**: per-instance context, `init`/`dispatch`/`transition`/`reset`
//! - **TransitionPlan**: pure LCA search producing the exit/entry sequence
//! - **Fault**: fatal conditions, reported through an injected [`FaultReporter`]
//!
//! Every traversal is bounded by the const depth `N`, so the worst-case cost
//! of any call is known statically.

mod fault;
mod machine;
mod transition;

pub use fault::{Fault, FaultReporter, LogReporter, PanicReporter};
pub use machine::Machine;
pub use transition::{TransitionInfo, TransitionPlan};
