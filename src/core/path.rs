//! Fixed-capacity state paths used for bounded tree traversal.

use super::state::StateId;
use crate::engine::Fault;
use std::ops::Deref;

/// Nesting depth used when a tree or machine does not name one.
pub const DEFAULT_MAX_DEPTH: usize = 5;

/// Sequence of at most `N` state ids, stored inline.
///
/// Overflow is a [`Fault::DepthExceeded`], never truncation or growth. The
/// `origin` passed to [`Path::push`] names the state the walk started from
/// so the fault points at the offending branch.
#[derive(Clone, Copy)]
pub struct Path<const N: usize> {
    ids: [StateId; N],
    len: usize,
}

impl<const N: usize> Path<N> {
    /// Maximum number of ids the path holds.
    pub const CAPACITY: usize = N;

    pub fn new() -> Self {
        Self {
            ids: [StateId(0); N],
            len: 0,
        }
    }

    pub fn push(&mut self, id: StateId, origin: StateId) -> Result<(), Fault> {
        if self.len == Self::CAPACITY {
            return Err(Fault::DepthExceeded {
                from: origin,
                limit: Self::CAPACITY,
            });
        }
        self.ids[self.len] = id;
        self.len += 1;
        Ok(())
    }

    /// Index of the first occurrence of `id`.
    pub fn position(&self, id: StateId) -> Option<usize> {
        self.iter().position(|candidate| *candidate == id)
    }

    /// Keeps the first `len` entries.
    pub fn truncate(&mut self, len: usize) {
        self.len = self.len.min(len);
    }

    /// Reverses the stored entries in place.
    pub fn reverse(&mut self) {
        self.ids[..self.len].reverse();
    }

    pub fn as_slice(&self) -> &[StateId] {
        &self.ids[..self.len]
    }
}

impl<const N: usize> Default for Path<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> PartialEq for Path<N> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<const N: usize> Eq for Path<N> {}

impl<const N: usize> Deref for Path<N> {
    type Target = [StateId];

    fn deref(&self) -> &[StateId] {
        self.as_slice()
    }
}

impl<const N: usize> std::fmt::Debug for Path<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}
