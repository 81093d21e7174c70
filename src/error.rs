use thiserror::Error;

use crate::timer::TimerPhase;

/// Transition-guard failures raised by the timer state machine.
///
/// These are always local to the call site: a rejected transition leaves the
/// state untouched. `IllegalTransition` surfacing to a user indicates a
/// missing guard in the caller, not a timer fault.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("{0}")]
    Validation(String),

    #[error("cannot {op} while {phase:?}")]
    IllegalTransition { op: &'static str, phase: TimerPhase },
}

impl EngineError {
    pub fn validation(message: impl Into<String>) -> Self {
        EngineError::Validation(message.into())
    }
}
