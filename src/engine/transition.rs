//! Transition planning (LCA search) and the in-progress transition record.
//!
//! Planning is pure: it only reads the tree. Every path is built and
//! depth-checked here, before the machine runs a single callback, so a
//! depth fault never leaves a half-exited configuration behind.

use crate::core::{Path, StateId, StateTree};
use crate::engine::Fault;
use serde::{Deserialize, Serialize};

/// Diagnostic record of the transition currently executing.
///
/// Present only while [`Machine::transition`](super::Machine::transition)
/// (or init/reset) runs, so callbacks can ask where they are in the move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionInfo {
    /// Active leaf when the transition started; `None` during init.
    pub source: Option<StateId>,
    /// Requested target; `None` during reset.
    pub target: Option<StateId>,
    /// Most recent state whose exit step completed.
    pub last_exited: Option<StateId>,
    /// Most recent state whose entry step completed.
    pub last_entered: Option<StateId>,
}

/// Exit/entry sequence for moving the active leaf from `source` to `target`.
///
/// # Example
///
/// ```rust
/// use hsm_engine::core::StateTree;
/// use hsm_engine::engine::TransitionPlan;
///
/// let mut builder = StateTree::builder();
/// let root = builder.add_root("Root");
/// let a = builder.add_child(root, "A");
/// let a1 = builder.add_child(a, "A1");
/// let b = builder.add_child(root, "B");
/// let b1 = builder.add_child(b, "B1");
/// let tree: StateTree<(), ()> = builder.build().unwrap();
///
/// let plan = TransitionPlan::<5>::compute(&tree, Some(a1), Some(b1)).unwrap();
/// assert_eq!(plan.exits(), &[a1, a]);
/// assert_eq!(plan.entries(), &[b, b1]);
/// assert_eq!(plan.lca(), Some(root));
/// assert_eq!(plan.landing(), Some(b1));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransitionPlan<const N: usize> {
    exits: Path<N>,
    entries: Path<N>,
    descent: Path<N>,
    lca: Option<StateId>,
    landing: Option<StateId>,
}

impl<const N: usize> TransitionPlan<N> {
    /// Computes the plan against the tree's own depth limit `N`.
    ///
    /// `source` is `None` for an uninitialized machine: nothing is exited
    /// and the whole target branch is entered. `target` is `None` for a
    /// reset: the whole source branch is exited and nothing is entered.
    pub fn compute<D, E>(
        tree: &StateTree<D, E, N>,
        source: Option<StateId>,
        target: Option<StateId>,
    ) -> Result<Self, Fault> {
        for id in source.into_iter().chain(target) {
            if !tree.contains(id) {
                return Err(Fault::UnknownState(id));
            }
        }

        let mut exit_path = Path::<N>::new();
        if let Some(source) = source {
            for id in tree.ancestors(source) {
                exit_path.push(id, source)?;
            }
        }

        let Some(target) = target else {
            return Ok(Self {
                exits: exit_path,
                entries: Path::new(),
                descent: Path::new(),
                lca: None,
                landing: None,
            });
        };

        // The whole target branch is walked, not just the part below the
        // LCA, so the landing depth can be checked against N.
        let mut enter_path = Path::<N>::new();
        let mut common: Option<(usize, usize)> = None;
        for id in tree.ancestors(target) {
            if common.is_none() {
                if let Some(exit_index) = exit_path.position(id) {
                    common = Some((exit_index, enter_path.len()));
                }
            }
            enter_path.push(id, target)?;
        }

        let target_depth = enter_path.len();
        let mut descent = Path::<N>::new();
        let mut cursor = tree[target].default_child();
        while let Some(child) = cursor {
            if target_depth + descent.len() == Path::<N>::CAPACITY {
                return Err(Fault::DepthExceeded {
                    from: target,
                    limit: Path::<N>::CAPACITY,
                });
            }
            descent.push(child, target)?;
            cursor = tree[child].default_child();
        }

        // No common state means disjoint roots or no source: exit and
        // enter everything.
        let lca = common.map(|(exit_index, _)| exit_path[exit_index]);
        let (exit_count, enter_count) = common.unwrap_or((exit_path.len(), enter_path.len()));

        let mut exits = exit_path;
        exits.truncate(exit_count);
        let mut entries = enter_path;
        entries.truncate(enter_count);
        entries.reverse();

        let landing = descent.last().copied().unwrap_or(target);

        Ok(Self {
            exits,
            entries,
            descent,
            lca,
            landing: Some(landing),
        })
    }

    /// States to exit, leaf first. Never contains the LCA.
    pub fn exits(&self) -> &[StateId] {
        &self.exits
    }

    /// States to enter, outermost first, ending with the target. Never
    /// contains the LCA.
    pub fn entries(&self) -> &[StateId] {
        &self.entries
    }

    /// Default-child chain entered below the target, outermost first.
    pub fn descent(&self) -> &[StateId] {
        &self.descent
    }

    /// Lowest common ancestor; `None` when the branches share no state.
    pub fn lca(&self) -> Option<StateId> {
        self.lca
    }

    /// Active leaf once the plan has run; `None` for a reset.
    pub fn landing(&self) -> Option<StateId> {
        self.landing
    }
}
