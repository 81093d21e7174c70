pub mod controller;
pub mod state;

pub use controller::{FocusController, TimerSnapshot};
pub use state::{
    StopSummary, Tick, TimerPhase, TimerState, DEFAULT_DURATION_SECONDS, PRESET_MINUTES,
};
