//! Immutable arena of state descriptors.

use super::path::DEFAULT_MAX_DEPTH;
use super::state::{StateDef, StateId};
use std::ops::Index;

/// A built state tree (strictly, a rooted forest linked by `parent`).
///
/// Trees come out of [`StateTreeBuilder`](crate::builder::StateTreeBuilder)
/// and never change afterwards. Machines borrow them, so one tree can drive
/// any number of machines.
pub struct StateTree<D, E, const N: usize = DEFAULT_MAX_DEPTH> {
    pub(crate) states: Vec<StateDef<D, E, N>>,
}

impl<D, E, const N: usize> StateTree<D, E, N> {
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn contains(&self, id: StateId) -> bool {
        id.0 < self.states.len()
    }

    pub fn state(&self, id: StateId) -> Option<&StateDef<D, E, N>> {
        self.states.get(id.0)
    }

    /// Looks a state up by name.
    pub fn find(&self, name: &str) -> Option<StateId> {
        self.states
            .iter()
            .position(|state| state.name == name)
            .map(StateId)
    }

    pub fn ids(&self) -> impl Iterator<Item = StateId> + '_ {
        (0..self.states.len()).map(StateId)
    }

    pub fn roots(&self) -> impl Iterator<Item = StateId> + '_ {
        self.ids().filter(|id| self[*id].is_root())
    }

    pub fn children(&self, parent: StateId) -> impl Iterator<Item = StateId> + '_ {
        self.ids().filter(move |id| self[*id].parent == Some(parent))
    }

    /// Walks from `id` (inclusive) up to its root.
    pub fn ancestors(&self, id: StateId) -> Ancestors<'_, D, E, N> {
        Ancestors {
            tree: self,
            next: self.contains(id).then_some(id),
        }
    }

    /// Number of states from the root down to `id`, both included.
    pub fn depth(&self, id: StateId) -> usize {
        self.ancestors(id).count()
    }

    /// Depth of the deepest state, or of the deepest landing state reached
    /// through default children, whichever is larger. A machine whose depth
    /// limit is below this value will fault on some transition.
    pub fn max_depth(&self) -> usize {
        self.ids()
            .map(|id| {
                let below = std::iter::successors(self[id].default_child, |child| {
                    self[*child].default_child
                })
                .count();
                self.depth(id) + below
            })
            .max()
            .unwrap_or(0)
    }

    /// True when `ancestor` is `state` or lies on its path to the root.
    pub fn is_ancestor(&self, ancestor: StateId, state: StateId) -> bool {
        self.ancestors(state).any(|id| id == ancestor)
    }

    /// Name of `id`, or `"?"` for an id from another tree. For log fields.
    pub(crate) fn name_of(&self, id: StateId) -> &str {
        self.state(id).map_or("?", StateDef::name)
    }
}

/// Panics on an id from another tree; engine code only indexes with ids
/// it has already validated.
impl<D, E, const N: usize> Index<StateId> for StateTree<D, E, N> {
    type Output = StateDef<D, E, N>;

    fn index(&self, id: StateId) -> &StateDef<D, E, N> {
        &self.states[id.0]
    }
}

impl<D, E, const N: usize> std::fmt::Debug for StateTree<D, E, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateTree")
            .field("states", &self.states)
            .finish()
    }
}

/// Iterator returned by [`StateTree::ancestors`].
pub struct Ancestors<'t, D, E, const N: usize> {
    tree: &'t StateTree<D, E, N>,
    next: Option<StateId>,
}

impl<D, E, const N: usize> Iterator for Ancestors<'_, D, E, N> {
    type Item = StateId;

    fn next(&mut self) -> Option<StateId> {
        let current = self.next?;
        self.next = self.tree[current].parent;
        Some(current)
    }
}
