//! Builder for state trees.

use crate::builder::error::BuildError;
use crate::core::{StateDef, StateId, StateTree, Verdict, DEFAULT_MAX_DEPTH};
use crate::engine::{Fault, Machine};
use std::collections::HashSet;

/// Builder for constructing an immutable [`StateTree`].
///
/// States are added parent first, so the `parent` links can never form a
/// cycle. Capabilities and default children are attached by id once the
/// states exist, which lets a handler capture the id of a state declared
/// after it.
pub struct StateTreeBuilder<D, E, const N: usize = DEFAULT_MAX_DEPTH> {
    states: Vec<StateDef<D, E, N>>,
    errors: Vec<BuildError>,
}

impl<D, E, const N: usize> StateTree<D, E, N> {
    pub fn builder() -> StateTreeBuilder<D, E, N> {
        StateTreeBuilder::new()
    }
}

impl<D, E, const N: usize> StateTreeBuilder<D, E, N> {
    pub fn new() -> Self {
        Self {
            states: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Add a state with no parent.
    pub fn add_root(&mut self, name: impl Into<String>) -> StateId {
        self.push(name.into(), None)
    }

    /// Add a state nested in `parent`.
    pub fn add_child(&mut self, parent: StateId, name: impl Into<String>) -> StateId {
        if !self.contains(parent) {
            self.errors.push(BuildError::UnknownState(parent));
        }
        self.push(name.into(), Some(parent))
    }

    /// Set the state entered automatically below `state`.
    pub fn default_child(&mut self, state: StateId, child: StateId) -> &mut Self {
        let duplicate = match self.slot(state) {
            Some(def) if def.default_child.is_some() => Some(def.name.clone()),
            Some(def) => {
                def.default_child = Some(child);
                None
            }
            None => None,
        };
        if let Some(name) = duplicate {
            self.errors.push(BuildError::DuplicateDefaultChild(name));
        }
        self
    }

    pub fn on_entry<F>(&mut self, state: StateId, f: F) -> &mut Self
    where
        F: Fn(&mut Machine<'_, D, E, N>, &mut D) + Send + Sync + 'static,
    {
        if let Some(def) = self.slot(state) {
            def.on_entry = Some(Box::new(f));
        }
        self
    }

    pub fn on_exit<F>(&mut self, state: StateId, f: F) -> &mut Self
    where
        F: Fn(&mut Machine<'_, D, E, N>, &mut D) + Send + Sync + 'static,
    {
        if let Some(def) = self.slot(state) {
            def.on_exit = Some(Box::new(f));
        }
        self
    }

    pub fn on_event<F>(&mut self, state: StateId, f: F) -> &mut Self
    where
        F: Fn(&mut Machine<'_, D, E, N>, &mut D, &E) -> Result<Verdict, Fault>
            + Send
            + Sync
            + 'static,
    {
        if let Some(def) = self.slot(state) {
            def.on_event = Some(Box::new(f));
        }
        self
    }

    /// Validate and freeze the tree.
    ///
    /// Nesting depth is not checked here: the limit belongs to the machines
    /// running the tree and is enforced while they build their paths. Use
    /// [`StateTree::max_depth`] to check ahead of time.
    pub fn build(self) -> Result<StateTree<D, E, N>, BuildError> {
        if let Some(error) = self.errors.into_iter().next() {
            return Err(error);
        }
        if self.states.is_empty() {
            return Err(BuildError::EmptyTree);
        }

        let mut names = HashSet::new();
        for def in &self.states {
            if !names.insert(def.name.as_str()) {
                return Err(BuildError::DuplicateName(def.name.clone()));
            }
        }

        for (index, def) in self.states.iter().enumerate() {
            let Some(child) = def.default_child else {
                continue;
            };
            let child_def = self
                .states
                .get(child.0)
                .ok_or(BuildError::UnknownState(child))?;
            if child_def.parent != Some(StateId(index)) {
                return Err(BuildError::NotAChild {
                    state: def.name.clone(),
                    child: child_def.name.clone(),
                });
            }
        }

        Ok(StateTree {
            states: self.states,
        })
    }

    fn push(&mut self, name: String, parent: Option<StateId>) -> StateId {
        let id = StateId(self.states.len());
        self.states.push(StateDef::new(name, parent));
        id
    }

    fn contains(&self, id: StateId) -> bool {
        id.0 < self.states.len()
    }

    /// Descriptor for `id`, recording an error for a foreign id.
    fn slot(&mut self, id: StateId) -> Option<&mut StateDef<D, E, N>> {
        if !self.contains(id) {
            self.errors.push(BuildError::UnknownState(id));
        }
        self.states.get_mut(id.0)
    }
}

impl<D, E, const N: usize> Default for StateTreeBuilder<D, E, N> {
    fn default() -> Self {
        Self::new()
    }
}
