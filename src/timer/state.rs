use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::credits::{format_clock, progress_percent};
use crate::error::EngineError;

/// Preset durations offered by duration selectors, in minutes. Callers may
/// also configure arbitrary positive durations.
pub const PRESET_MINUTES: [u32; 6] = [15, 25, 30, 45, 60, 90];

/// 25-minute Pomodoro, the configuration a fresh timer starts with.
pub const DEFAULT_DURATION_SECONDS: u32 = 25 * 60;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum TimerPhase {
    #[default]
    Idle,
    Running,
    Paused,
    Completed,
}

/// Outcome of a single `tick()`. Ticks arriving outside `Running` are
/// ignored, never queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Advanced { remaining_seconds: u32 },
    Completed { elapsed_seconds: u32 },
    Ignored,
}

/// One-shot handoff produced by a `stop()` transition; everything the
/// reconciler needs, detached from the timer's own mutable state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopSummary {
    pub cycle_id: Option<Uuid>,
    pub subject_id: Option<String>,
    pub elapsed_seconds: u32,
}

/// Countdown state machine for one focus cycle.
///
/// Single-writer: all transitions are synchronous and run on the caller's
/// task. `elapsed_seconds()` (`total - remaining`) is the only measure of
/// studied time; `remaining_seconds` changes exclusively under `tick()` while
/// `Running`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerState {
    pub phase: TimerPhase,
    pub subject_id: Option<String>,
    pub total_seconds: u32,
    pub remaining_seconds: u32,
    pub cycle_id: Option<Uuid>,
    pub started_at: Option<DateTime<Utc>>,
}

impl Default for TimerState {
    fn default() -> Self {
        Self {
            phase: TimerPhase::Idle,
            subject_id: None,
            total_seconds: DEFAULT_DURATION_SECONDS,
            remaining_seconds: DEFAULT_DURATION_SECONDS,
            cycle_id: None,
            started_at: None,
        }
    }
}

impl TimerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.total_seconds.saturating_sub(self.remaining_seconds)
    }

    pub fn clock(&self) -> String {
        format_clock(self.remaining_seconds)
    }

    pub fn progress_percent(&self) -> f64 {
        progress_percent(self.total_seconds, self.remaining_seconds)
    }

    /// Sets the duration and subject for the next cycle. Legal only while
    /// `Idle`: changing `total_seconds` mid-cycle would corrupt the
    /// elapsed-time invariant, so rejection here is a hard precondition.
    pub fn configure(
        &mut self,
        duration_seconds: u32,
        subject_id: &str,
    ) -> Result<(), EngineError> {
        if self.phase != TimerPhase::Idle {
            return Err(EngineError::IllegalTransition {
                op: "configure",
                phase: self.phase,
            });
        }
        if duration_seconds == 0 {
            return Err(EngineError::validation("duration must be positive"));
        }

        self.total_seconds = duration_seconds;
        self.remaining_seconds = duration_seconds;
        self.subject_id = if subject_id.is_empty() {
            None
        } else {
            Some(subject_id.to_string())
        };
        self.cycle_id = None;
        self.started_at = None;
        Ok(())
    }

    /// Begins a cycle. Requires `Idle` and a configured subject.
    pub fn start(&mut self) -> Result<(), EngineError> {
        if self.phase != TimerPhase::Idle {
            return Err(EngineError::IllegalTransition {
                op: "start",
                phase: self.phase,
            });
        }
        if self.subject_id.is_none() {
            return Err(EngineError::validation("no subject selected"));
        }

        self.phase = TimerPhase::Running;
        self.remaining_seconds = self.total_seconds;
        self.cycle_id = Some(Uuid::new_v4());
        self.started_at = Some(Utc::now());
        Ok(())
    }

    /// Advances the countdown by one second. The completing tick transitions
    /// to `Completed` synchronously, so completion fires exactly once and the
    /// counter never underflows.
    pub fn tick(&mut self) -> Tick {
        if self.phase != TimerPhase::Running {
            return Tick::Ignored;
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            self.phase = TimerPhase::Completed;
            Tick::Completed {
                elapsed_seconds: self.total_seconds,
            }
        } else {
            Tick::Advanced {
                remaining_seconds: self.remaining_seconds,
            }
        }
    }

    /// Toggles `Running` and `Paused`; a second pause in a row resumes.
    /// Never touches `remaining_seconds`.
    pub fn pause(&mut self) -> Result<TimerPhase, EngineError> {
        match self.phase {
            TimerPhase::Running => {
                self.phase = TimerPhase::Paused;
                Ok(TimerPhase::Paused)
            }
            TimerPhase::Paused => {
                self.phase = TimerPhase::Running;
                Ok(TimerPhase::Running)
            }
            phase => Err(EngineError::IllegalTransition { op: "pause", phase }),
        }
    }

    /// Explicit `Paused` to `Running` edge.
    pub fn resume(&mut self) -> Result<(), EngineError> {
        if self.phase != TimerPhase::Paused {
            return Err(EngineError::IllegalTransition {
                op: "resume",
                phase: self.phase,
            });
        }
        self.phase = TimerPhase::Running;
        Ok(())
    }

    /// Terminates the cycle early, returning the handoff for reconciliation.
    /// The state returns to `Idle` with the countdown restored regardless of
    /// whether the caller decides the elapsed time is worth persisting.
    pub fn stop(&mut self) -> Result<StopSummary, EngineError> {
        if !matches!(self.phase, TimerPhase::Running | TimerPhase::Paused) {
            return Err(EngineError::IllegalTransition {
                op: "stop",
                phase: self.phase,
            });
        }

        let summary = StopSummary {
            cycle_id: self.cycle_id,
            subject_id: self.subject_id.clone(),
            elapsed_seconds: self.elapsed_seconds(),
        };

        self.phase = TimerPhase::Idle;
        self.remaining_seconds = self.total_seconds;
        self.cycle_id = None;
        self.started_at = None;
        Ok(summary)
    }

    /// Discards progress without persisting anything. Rejected while actively
    /// running (the caller must stop or pause first).
    pub fn reset(&mut self) -> Result<(), EngineError> {
        if self.phase == TimerPhase::Running {
            return Err(EngineError::IllegalTransition {
                op: "reset",
                phase: self.phase,
            });
        }

        self.phase = TimerPhase::Idle;
        self.remaining_seconds = self.total_seconds;
        self.cycle_id = None;
        self.started_at = None;
        Ok(())
    }
}
