//! Handler verdicts and their propagation semantics.

use crate::engine::Fault;
use serde::{Deserialize, Serialize};

/// Value an event handler returns to steer dispatch.
///
/// Only [`Verdict::Discard`] stops the event from reaching the parent state.
/// A handled event still propagates; ancestors observe it too.
///
/// # Example
///
/// ```rust
/// use hsm_engine::core::Verdict;
///
/// assert!(Verdict::Handled.propagates());
/// assert!(!Verdict::IGNORE.propagates());
/// assert_eq!(Verdict::try_from(3), Ok(Verdict::Forward));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Verdict {
    /// Not handled here; forward to the parent.
    Unhandled = 0,
    /// Handled here; ancestors still observe the event.
    Handled = 1,
    /// Consumed or suppressed; stop propagation.
    Discard = 2,
    /// Explicitly forward to the parent.
    Forward = 3,
}

impl Verdict {
    pub const IGNORE: Verdict = Verdict::Discard;
    pub const PROPAGATE: Verdict = Verdict::Forward;

    /// Whether dispatch continues to the parent state after this verdict.
    pub fn propagates(self) -> bool {
        match self {
            Verdict::Unhandled | Verdict::Handled | Verdict::Forward => true,
            Verdict::Discard => false,
        }
    }
}

impl TryFrom<u8> for Verdict {
    type Error = Fault;

    /// Decodes a raw verdict, e.g. one produced by a handler table shared
    /// with foreign code. Unknown values are a fault.
    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(Verdict::Unhandled),
            1 => Ok(Verdict::Handled),
            2 => Ok(Verdict::Discard),
            3 => Ok(Verdict::Forward),
            other => Err(Fault::UnknownVerdict(other)),
        }
    }
}

impl From<Verdict> for u8 {
    fn from(verdict: Verdict) -> Self {
        verdict as u8
    }
}
