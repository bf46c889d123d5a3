//! State descriptors: the passive nodes of a state tree.
//!
//! A descriptor never changes once its tree is built. The engine reads its
//! links and invokes its optional capabilities; it never owns or mutates it.

use super::path::DEFAULT_MAX_DEPTH;
use super::verdict::Verdict;
use crate::engine::{Fault, Machine};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle to a state inside a [`StateTree`](super::StateTree).
///
/// Ids are handed out by [`StateTreeBuilder`](crate::builder::StateTreeBuilder)
/// and are only meaningful for the tree that builder produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateId(pub(crate) usize);

impl StateId {
    /// Position of the state in its tree's arena.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Entry or exit callback.
pub type StateAction<D, E, const N: usize> =
    Box<dyn Fn(&mut Machine<'_, D, E, N>, &mut D) + Send + Sync>;

/// Event handler. Returning `Err` halts the machine with that fault.
pub type EventHandler<D, E, const N: usize> =
    Box<dyn Fn(&mut Machine<'_, D, E, N>, &mut D, &E) -> Result<Verdict, Fault> + Send + Sync>;

/// Immutable descriptor of one state.
///
/// `D` is the application data threaded through every callback, `E` the
/// event type and `N` the maximum nesting depth of the machines that run
/// the tree.
pub struct StateDef<D, E, const N: usize = DEFAULT_MAX_DEPTH> {
    pub(crate) name: String,
    pub(crate) parent: Option<StateId>,
    pub(crate) default_child: Option<StateId>,
    pub(crate) on_entry: Option<StateAction<D, E, N>>,
    pub(crate) on_exit: Option<StateAction<D, E, N>>,
    pub(crate) on_event: Option<EventHandler<D, E, N>>,
}

impl<D, E, const N: usize> StateDef<D, E, N> {
    pub(crate) fn new(name: String, parent: Option<StateId>) -> Self {
        Self {
            name,
            parent,
            default_child: None,
            on_entry: None,
            on_exit: None,
            on_event: None,
        }
    }

    /// Diagnostic name, unique within the tree.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Enclosing state, `None` for a root.
    pub fn parent(&self) -> Option<StateId> {
        self.parent
    }

    /// State entered automatically when this one is a transition target.
    pub fn default_child(&self) -> Option<StateId> {
        self.default_child
    }

    /// A leaf has no default child and is a valid resting state.
    pub fn is_leaf(&self) -> bool {
        self.default_child.is_none()
    }

    pub fn is_composite(&self) -> bool {
        self.default_child.is_some()
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn has_handler(&self) -> bool {
        self.on_event.is_some()
    }

    pub(crate) fn enter(&self, machine: &mut Machine<'_, D, E, N>, data: &mut D) {
        if let Some(on_entry) = &self.on_entry {
            on_entry(machine, data);
        }
    }

    pub(crate) fn exit(&self, machine: &mut Machine<'_, D, E, N>, data: &mut D) {
        if let Some(on_exit) = &self.on_exit {
            on_exit(machine, data);
        }
    }

    /// Runs the handler if there is one. `None` means no handler, which
    /// dispatch treats as an implicit forward.
    pub(crate) fn handle(
        &self,
        machine: &mut Machine<'_, D, E, N>,
        data: &mut D,
        event: &E,
    ) -> Option<Result<Verdict, Fault>> {
        self.on_event
            .as_ref()
            .map(|on_event| on_event(machine, data, event))
    }
}

impl<D, E, const N: usize> fmt::Debug for StateDef<D, E, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateDef")
            .field("name", &self.name)
            .field("parent", &self.parent)
            .field("default_child", &self.default_child)
            .field("on_entry", &self.on_entry.is_some())
            .field("on_exit", &self.on_exit.is_some())
            .field("on_event", &self.on_event.is_some())
            .finish()
    }
}
