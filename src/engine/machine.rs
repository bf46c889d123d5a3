//! Machine context and the dispatch/transition engine.

use crate::builder::MachineBuilder;
use crate::core::{StateDef, StateId, StateTree, DEFAULT_MAX_DEPTH};
use crate::engine::fault::{Fault, FaultReporter};
use crate::engine::transition::{TransitionInfo, TransitionPlan};
use tracing::{debug, trace};

/// Runtime record of one state machine instance.
///
/// The machine borrows its tree and owns only its position in it: the
/// active leaf and, while a transition runs, the [`TransitionInfo`] record
/// that doubles as the reentrancy guard. Application data is passed to each
/// call and handed through to callbacks untouched.
///
/// All calls are synchronous and run to completion. Sharing a machine across
/// threads requires external serialization (e.g. a `Mutex` per machine).
pub struct Machine<'t, D, E, const N: usize = DEFAULT_MAX_DEPTH> {
    tree: &'t StateTree<D, E, N>,
    current: Option<StateId>,
    transition: Option<TransitionInfo>,
    dispatching: bool,
    completed: u64,
    halted: Option<Fault>,
    reporter: Box<dyn FaultReporter>,
}

impl<'t, D, E, const N: usize> Machine<'t, D, E, N> {
    /// Creates an uninitialized machine that logs faults.
    pub fn new(tree: &'t StateTree<D, E, N>) -> Self {
        MachineBuilder::new(tree).build()
    }

    pub fn builder(tree: &'t StateTree<D, E, N>) -> MachineBuilder<'t, D, E, N> {
        MachineBuilder::new(tree)
    }

    pub(crate) fn from_parts(
        tree: &'t StateTree<D, E, N>,
        reporter: Box<dyn FaultReporter>,
    ) -> Self {
        Self {
            tree,
            current: None,
            transition: None,
            dispatching: false,
            completed: 0,
            halted: None,
            reporter,
        }
    }

    pub fn tree(&self) -> &'t StateTree<D, E, N> {
        self.tree
    }

    /// Active leaf state, `None` before init or after reset.
    pub fn current(&self) -> Option<StateId> {
        self.current
    }

    pub fn current_state(&self) -> Option<&'t StateDef<D, E, N>> {
        let tree = self.tree;
        self.current.map(|id| &tree[id])
    }

    pub fn is_initialized(&self) -> bool {
        self.current.is_some()
    }

    /// Record of the transition in progress, `None` when idle.
    pub fn transition_info(&self) -> Option<&TransitionInfo> {
        self.transition.as_ref()
    }

    /// Number of transitions completed, init and reset included.
    pub fn transition_count(&self) -> u64 {
        self.completed
    }

    /// The fault that halted this machine, if any. A halted machine rejects
    /// every further call with this fault.
    pub fn fault(&self) -> Option<Fault> {
        self.halted
    }

    /// Enters `initial` together with all of its ancestors (outermost first)
    /// and its default-child chain. No handler runs.
    pub fn init(&mut self, data: &mut D, initial: StateId) -> Result<(), Fault> {
        self.ensure_running()?;
        if self.transition.is_some() {
            return Err(self.fail(Fault::ReentrantTransition));
        }
        if self.current.is_some() {
            return Err(self.fail(Fault::AlreadyInitialized));
        }
        self.run(data, Some(initial), None::<fn(&mut Self, &mut D)>)
    }

    /// Offers `event` to the active leaf and then to each ancestor in turn.
    ///
    /// Propagation stops at the first [`Verdict::Discard`](crate::core::Verdict),
    /// or after a handler that fired a transition. States without a handler
    /// are skipped.
    pub fn dispatch(&mut self, data: &mut D, event: &E) -> Result<(), Fault> {
        self.ensure_running()?;
        if self.dispatching || self.transition.is_some() {
            return Err(self.fail(Fault::ReentrantDispatch));
        }
        let Some(leaf) = self.current else {
            return Err(self.fail(Fault::NotInitialized));
        };

        self.dispatching = true;
        let result = self.propagate(data, event, leaf);
        self.dispatching = false;
        result
    }

    /// Moves the active leaf to `target`, running exit callbacks up to the
    /// lowest common ancestor, then entry callbacks down to `target` and its
    /// default-child chain.
    ///
    /// Fatal when called from an entry or exit callback.
    pub fn transition(&mut self, data: &mut D, target: StateId) -> Result<(), Fault> {
        self.transition_with(data, target, None::<fn(&mut Self, &mut D)>)
    }

    /// Like [`Machine::transition`], running `action` after the last exit
    /// and before the first entry.
    pub fn transition_with<F>(
        &mut self,
        data: &mut D,
        target: StateId,
        action: Option<F>,
    ) -> Result<(), Fault>
    where
        F: FnOnce(&mut Self, &mut D),
    {
        self.ensure_running()?;
        if self.transition.is_some() {
            return Err(self.fail(Fault::ReentrantTransition));
        }
        if self.current.is_none() {
            return Err(self.fail(Fault::NotInitialized));
        }
        self.run(data, Some(target), action)
    }

    /// Exits every active state, leaf first, and returns the machine to its
    /// uninitialized state so that [`Machine::init`] may be called again.
    /// Does nothing on an uninitialized machine.
    pub fn reset(&mut self, data: &mut D) -> Result<(), Fault> {
        self.ensure_running()?;
        if self.transition.is_some() {
            return Err(self.fail(Fault::ReentrantTransition));
        }
        if self.current.is_none() {
            return Ok(());
        }
        self.run(data, None, None::<fn(&mut Self, &mut D)>)
    }

    fn propagate(&mut self, data: &mut D, event: &E, leaf: StateId) -> Result<(), Fault> {
        let tree = self.tree;
        let epoch = self.completed;
        let mut cursor = Some(leaf);
        let mut visited = 0;

        while let Some(id) = cursor {
            if visited == N {
                return Err(self.fail(Fault::DepthExceeded {
                    from: leaf,
                    limit: N,
                }));
            }
            visited += 1;

            let state = &tree[id];
            if let Some(outcome) = state.handle(self, data, event) {
                let verdict = outcome.map_err(|fault| self.fail(fault))?;
                self.ensure_running()?;
                trace!(state = state.name(), ?verdict, "handled event");
                if !verdict.propagates() {
                    break;
                }
                if self.completed != epoch {
                    trace!(state = state.name(), "transition fired, dispatch ends");
                    break;
                }
            }
            cursor = state.parent();
        }
        Ok(())
    }

    fn run<F>(
        &mut self,
        data: &mut D,
        target: Option<StateId>,
        action: Option<F>,
    ) -> Result<(), Fault>
    where
        F: FnOnce(&mut Self, &mut D),
    {
        let tree = self.tree;
        let plan = TransitionPlan::<N>::compute(tree, self.current, target)
            .map_err(|fault| self.fail(fault))?;

        debug!(
            source = ?self.current.map(|id| tree.name_of(id)),
            target = ?target.map(|id| tree.name_of(id)),
            lca = ?plan.lca().map(|id| tree.name_of(id)),
            exits = plan.exits().len(),
            entries = plan.entries().len() + plan.descent().len(),
            "transition"
        );

        self.transition = Some(TransitionInfo {
            source: self.current,
            target,
            last_exited: None,
            last_entered: None,
        });

        for &id in plan.exits() {
            trace!(state = tree.name_of(id), "exit");
            tree[id].exit(self, data);
            self.checkpoint()?;
            self.record(|info| info.last_exited = Some(id));
        }

        if let Some(action) = action {
            action(self, data);
            self.checkpoint()?;
        }

        for &id in plan.entries().iter().chain(plan.descent()) {
            trace!(state = tree.name_of(id), "entry");
            tree[id].enter(self, data);
            self.checkpoint()?;
            self.record(|info| info.last_entered = Some(id));
        }

        self.current = plan.landing();
        self.transition = None;
        self.completed += 1;
        Ok(())
    }

    fn record(&mut self, update: impl FnOnce(&mut TransitionInfo)) {
        if let Some(info) = self.transition.as_mut() {
            update(info);
        }
    }

    /// Aborts a running transition if a callback halted the machine.
    fn checkpoint(&mut self) -> Result<(), Fault> {
        match self.halted {
            Some(fault) => {
                self.transition = None;
                Err(fault)
            }
            None => Ok(()),
        }
    }

    fn ensure_running(&self) -> Result<(), Fault> {
        match self.halted {
            Some(fault) => Err(fault),
            None => Ok(()),
        }
    }

    /// Reports and latches `fault`. Only the first fault is reported; later
    /// ones collapse into it.
    fn fail(&mut self, fault: Fault) -> Fault {
        if let Some(latched) = self.halted {
            return latched;
        }
        self.reporter.report(&fault);
        self.halted = Some(fault);
        fault
    }
}

impl<D, E, const N: usize> std::fmt::Debug for Machine<'_, D, E, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Machine")
            .field("current", &self.current.map(|id| self.tree.name_of(id)))
            .field("transition", &self.transition)
            .field("completed", &self.completed)
            .field("halted", &self.halted)
            .finish()
    }
}
