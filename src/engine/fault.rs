//! Fatal engine conditions and the injectable reporting hook.

use crate::core::StateId;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

/// Unrecoverable conditions detected by the engine.
///
/// Each one signals a programming error or a misconfigured tree. A machine
/// that raised a fault is halted; see [`Machine::fault`](super::Machine::fault).
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum Fault {
    #[error("machine used before init")]
    NotInitialized,

    #[error("machine already initialized; reset it before calling init again")]
    AlreadyInitialized,

    #[error("state {0} does not belong to this tree")]
    UnknownState(StateId),

    #[error("path from state {from} exceeds the maximum depth of {limit}")]
    DepthExceeded { from: StateId, limit: usize },

    #[error("transition requested while another transition is in progress")]
    ReentrantTransition,

    #[error("dispatch requested while the machine is dispatching or transitioning")]
    ReentrantDispatch,

    #[error("unrecognized handler verdict {0}")]
    UnknownVerdict(u8),
}

/// Receives every fault before the engine halts the machine.
///
/// Installed once per machine through
/// [`MachineBuilder::reporter`](crate::builder::MachineBuilder::reporter).
/// Closures taking `&Fault` implement it directly.
pub trait FaultReporter: Send + Sync {
    fn report(&self, fault: &Fault);
}

/// Default reporter: logs the fault at error level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl FaultReporter for LogReporter {
    fn report(&self, fault: &Fault) {
        error!(%fault, "state machine halted");
    }
}

/// Traps on the first fault, for hosts where a halted machine must take
/// the process down with it.
#[derive(Debug, Clone, Copy, Default)]
pub struct PanicReporter;

impl FaultReporter for PanicReporter {
    fn report(&self, fault: &Fault) {
        panic!("state machine fault: {fault}");
    }
}

impl<F> FaultReporter for F
where
    F: Fn(&Fault) + Send + Sync,
{
    fn report(&self, fault: &Fault) {
        self(fault)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn fault_messages_name_the_problem() {
        let fault = Fault::DepthExceeded {
            from: StateId(3),
            limit: 5,
        };
        assert_eq!(
            fault.to_string(),
            "path from state #3 exceeds the maximum depth of 5"
        );
        assert_eq!(
            Fault::UnknownVerdict(9).to_string(),
            "unrecognized handler verdict 9"
        );
    }

    #[test]
    fn closure_reporter_receives_fault() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let reporter = move |fault: &Fault| sink.lock().unwrap().push(*fault);

        reporter.report(&Fault::ReentrantTransition);

        assert_eq!(*seen.lock().unwrap(), vec![Fault::ReentrantTransition]);
    }

    #[test]
    fn log_reporter_does_not_panic() {
        LogReporter.report(&Fault::NotInitialized);
    }

    #[test]
    #[should_panic(expected = "state machine fault")]
    fn panic_reporter_traps() {
        PanicReporter.report(&Fault::AlreadyInitialized);
    }

    #[test]
    fn fault_serializes_correctly() {
        let fault = Fault::UnknownState(StateId(12));
        let json = serde_json::to_string(&fault).unwrap();
        let deserialized: Fault = serde_json::from_str(&json).unwrap();
        assert_eq!(fault, deserialized);
    }
}
