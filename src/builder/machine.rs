//! Builder for configuring machines.

use crate::core::{StateTree, DEFAULT_MAX_DEPTH};
use crate::engine::{FaultReporter, LogReporter, Machine};

/// Construction-time configuration of a [`Machine`].
///
/// The depth limit is the tree's const parameter `N`; the only runtime knob
/// is where faults are reported.
pub struct MachineBuilder<'t, D, E, const N: usize = DEFAULT_MAX_DEPTH> {
    tree: &'t StateTree<D, E, N>,
    reporter: Box<dyn FaultReporter>,
}

impl<'t, D, E, const N: usize> MachineBuilder<'t, D, E, N> {
    /// Create a builder that logs faults through `tracing`.
    pub fn new(tree: &'t StateTree<D, E, N>) -> Self {
        Self {
            tree,
            reporter: Box::new(LogReporter),
        }
    }

    /// Replace the fault reporter.
    pub fn reporter<R>(mut self, reporter: R) -> Self
    where
        R: FaultReporter + 'static,
    {
        self.reporter = Box::new(reporter);
        self
    }

    /// Build an uninitialized machine. Call [`Machine::init`] before
    /// dispatching.
    pub fn build(self) -> Machine<'t, D, E, N> {
        Machine::from_parts(self.tree, self.reporter)
    }
}
